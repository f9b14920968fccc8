//! Capturing adapters: turn raised failures of listed kinds into `Outcome::Err`.
//!
//! Everything funnels through [`capture`], which both the synchronous
//! [`Catcher`] and the asynchronous [`Capture`] future apply to the wrapped
//! computation's final `Result`.

use core::future::Future;
use core::marker::PhantomData;
use core::pin::Pin;
use core::task::{Context, Poll};

use crate::failure::{AnyFailure, Failure, Kind};
use crate::outcome::Outcome;
use crate::raised::{Fallible, Raised};

// ============================================================
// Kinds - the set of failure kinds an adapter captures
// ============================================================

/// A non-empty, ordered list of failure kinds, written as a tuple.
///
/// `(A,)` captures as `A` itself. Two to eight kinds capture as
/// [`AnyFailure`], which remembers the concrete kind.
///
/// Matching is by concrete type via downcast. `()` and [`Raised`] do not
/// implement `Kinds`, so an adapter can never capture everything.
///
/// [`AnyFailure`] is not a listable kind either: raising one unwraps it, so
/// it would never match. Debug builds panic when it is listed.
pub trait Kinds {
    /// The failure type placed in `Outcome::Err`.
    type Caught: Failure;

    /// Take the raised failure if it is one of the listed kinds, otherwise
    /// hand it back untouched.
    fn capture(raised: Raised) -> core::result::Result<Self::Caught, Raised>;
}

impl<A: Failure> Kinds for (A,) {
    type Caught = A;

    #[inline]
    fn capture(raised: Raised) -> core::result::Result<A, Raised> {
        debug_assert_listable::<A>();
        raised.downcast::<A>()
    }
}

macro_rules! impl_kinds {
    ($($kind:ident),+) => {
        impl<$($kind: Failure),+> Kinds for ($($kind,)+) {
            type Caught = AnyFailure;

            fn capture(raised: Raised) -> core::result::Result<AnyFailure, Raised> {
                $( debug_assert_listable::<$kind>(); )+
                $(
                    let raised = match raised.downcast::<$kind>() {
                        Ok(failure) => return Ok(AnyFailure::new(failure)),
                        Err(raised) => raised,
                    };
                )+
                Err(raised)
            }
        }
    };
}

#[inline]
fn debug_assert_listable<F: Failure>() {
    debug_assert!(
        !Kind::of::<F>().is::<AnyFailure>(),
        "`AnyFailure` is not a capturable kind; list the concrete failure kinds instead"
    );
}

impl_kinds!(A, B);
impl_kinds!(A, B, C);
impl_kinds!(A, B, C, D);
impl_kinds!(A, B, C, D, E);
impl_kinds!(A, B, C, D, E, F);
impl_kinds!(A, B, C, D, E, F, G);
impl_kinds!(A, B, C, D, E, F, G, H);

// ============================================================
// capture - shared matching/wrapping routine
// ============================================================

/// Translate a finished computation into an [`Outcome`].
///
/// - `Ok(v)` becomes `Ok(Outcome::Ok(v))`
/// - an error of one of the kinds in `K` becomes `Ok(Outcome::Err(e))`,
///   holding the original error value
/// - any other error stays raised as `Err(Raised)`
pub fn capture<K, T, X>(result: core::result::Result<T, X>) -> Fallible<Outcome<T, K::Caught>>
where
    K: Kinds,
    X: Into<Raised>,
{
    let raised = match result {
        Ok(value) => return Ok(Outcome::Ok(value)),
        Err(e) => e.into(),
    };

    match K::capture(raised) {
        Ok(failure) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(kind = %failure.kind(), "captured failure");
            Ok(Outcome::Err(failure))
        }
        Err(raised) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(error = %raised, "failure not in capture list, propagating");
            Err(raised)
        }
    }
}

// ============================================================
// Synchronous adapter
// ============================================================

/// Capturing adapter for plain functions, see [`catch`].
pub struct Catcher<K> {
    _kinds: PhantomData<fn() -> K>,
}

/// Build a synchronous adapter capturing the kinds in `K`.
///
/// ```
/// use poltergeist::{catch, Outcome};
/// use std::num::ParseIntError;
///
/// let parse = catch::<(ParseIntError,)>().wrap(|s: &str| s.parse::<i32>());
///
/// assert_eq!(parse("7").unwrap(), Outcome::Ok(7));
/// assert!(parse("x").unwrap().is_err());
/// ```
pub fn catch<K: Kinds>() -> Catcher<K> {
    Catcher { _kinds: PhantomData }
}

impl<K: Kinds> Catcher<K> {
    /// Run `f` now and capture its result.
    #[inline]
    pub fn call<T, X, F>(&self, f: F) -> Fallible<Outcome<T, K::Caught>>
    where
        F: FnOnce() -> core::result::Result<T, X>,
        X: Into<Raised>,
    {
        capture::<K, T, X>(f())
    }

    /// Wrap `f` into a function with the same parameter that returns an
    /// `Outcome` instead of the bare error.
    ///
    /// Several parameters are passed as a tuple.
    pub fn wrap<A, T, X, F>(self, f: F) -> impl Fn(A) -> Fallible<Outcome<T, K::Caught>>
    where
        F: Fn(A) -> core::result::Result<T, X>,
        X: Into<Raised>,
    {
        move |args| capture::<K, T, X>(f(args))
    }
}

impl<K> Clone for Catcher<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Catcher<K> {}

// ============================================================
// Asynchronous adapter
// ============================================================

/// Capturing adapter for futures, see [`catch_async`].
pub struct AsyncCatcher<K> {
    _kinds: PhantomData<fn() -> K>,
}

/// Build an asynchronous adapter capturing the kinds in `K`.
///
/// The returned futures poll the wrapped future directly: they suspend
/// exactly where it suspends, and dropping them drops it.
pub fn catch_async<K: Kinds>() -> AsyncCatcher<K> {
    AsyncCatcher { _kinds: PhantomData }
}

impl<K: Kinds> AsyncCatcher<K> {
    /// Capture the result of `future` once it completes.
    #[inline]
    pub fn call<Fut, T, X>(&self, future: Fut) -> Capture<Fut, K>
    where
        Fut: Future<Output = core::result::Result<T, X>>,
        X: Into<Raised>,
    {
        Capture::new(future)
    }

    /// Wrap an async function into one with the same parameter whose future
    /// resolves to an `Outcome`.
    pub fn wrap<A, Fut, T, X, F>(self, f: F) -> impl Fn(A) -> Capture<Fut, K>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = core::result::Result<T, X>>,
        X: Into<Raised>,
    {
        move |args| Capture::new(f(args))
    }
}

impl<K> Clone for AsyncCatcher<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for AsyncCatcher<K> {}

/// Future returned by [`AsyncCatcher`]; resolves to the captured outcome.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Capture<Fut, K> {
    inner: Fut,
    _kinds: PhantomData<fn() -> K>,
}

impl<Fut, K> Capture<Fut, K> {
    fn new(inner: Fut) -> Self {
        Self {
            inner,
            _kinds: PhantomData,
        }
    }
}

impl<Fut, K, T, X> Future for Capture<Fut, K>
where
    Fut: Future<Output = core::result::Result<T, X>>,
    K: Kinds,
    X: Into<Raised>,
{
    type Output = Fallible<Outcome<T, K::Caught>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // SAFETY: `inner` is structurally pinned. It is never moved out of
        // `Capture`, and `Capture` has no `Drop` impl and is only `Unpin`
        // when `Fut` is.
        let inner = unsafe { self.map_unchecked_mut(|this| &mut this.inner) };
        inner.poll(cx).map(capture::<K, T, X>)
    }
}
