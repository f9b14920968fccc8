//! The two-variant outcome value.

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::failure::Failure;
use crate::raised::{Fallible, Raised};

/// Either a success payload or a captured failure.
///
/// `Outcome` is plain data: built once, by hand or by an adapter, and consumed
/// by one of its extraction methods.
///
/// Equality is variant-local. Two `Ok`s compare their payloads; two `Err`s
/// compare only the failure [`kind`](Failure::kind) and
/// [`args`](Failure::args), never other state such as a chained cause.
///
/// # Examples
///
/// ```
/// use poltergeist::Outcome;
/// use std::num::ParseIntError;
///
/// let parsed: Outcome<i32, ParseIntError> = "12".parse::<i32>().into();
/// match parsed {
///     Outcome::Ok(n) => assert_eq!(n, 12),
///     Outcome::Err(e) => panic!("unexpected {e}"),
/// }
/// ```
#[must_use = "an `Outcome` may hold a failure that should be handled"]
#[derive(Clone, Copy)]
pub enum Outcome<T, E: Failure> {
    /// A successful payload.
    Ok(T),
    /// A captured failure.
    Err(E),
}

impl<T, E: Failure> Outcome<T, E> {
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    #[inline]
    pub fn is_err(&self) -> bool {
        matches!(self, Outcome::Err(_))
    }

    /// The success payload, or `None` on `Err`.
    #[inline]
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Ok(v) => Some(v),
            Outcome::Err(_) => None,
        }
    }

    /// The held failure, or `None` on `Ok`.
    #[inline]
    pub fn err(self) -> Option<E> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Err(e) => Some(e),
        }
    }

    /// Borrow the success payload.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Ok(v) => Some(v),
            Outcome::Err(_) => None,
        }
    }

    /// Borrow the held failure.
    #[inline]
    pub fn failure(&self) -> Option<&E> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Err(e) => Some(e),
        }
    }

    /// Return the success payload.
    ///
    /// # Panics
    ///
    /// On `Err`, panics with the failure itself as the panic payload, so it can
    /// be recovered with `downcast` after `std::panic::catch_unwind`.
    ///
    /// The default panic hook only prints `Box<dyn Any>` for such a payload,
    /// so the failure is described on stderr first, e.g.
    /// ``called `Outcome::unwrap()` on Err(StringError("disk full"))``.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Err(e) => {
                let location = core::panic::Location::caller();
                eprintln!("called `Outcome::unwrap()` on {} at {}", Described(&e), location);
                #[cfg(feature = "tracing")]
                tracing::error!(failure = %Described(&e), %location, "unwrapped a failure");
                std::panic::panic_any(e)
            }
        }
    }

    /// Return the success payload, or `default` on `Err`.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Err(_) => default,
        }
    }

    #[inline]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(|_| T::default())
    }

    /// Return the success payload, or compute one from the failure.
    ///
    /// `op` is never invoked on `Ok`.
    #[inline]
    pub fn unwrap_or_else<F: FnOnce(E) -> T>(self, op: F) -> T {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Err(e) => op(e),
        }
    }

    /// Raise the held failure through `?` instead of panicking.
    ///
    /// ```
    /// use poltergeist::{Fallible, Outcome, StringError};
    ///
    /// fn first(o: Outcome<u8, StringError>) -> Fallible<u8> {
    ///     let v = o.raise()?;
    ///     Ok(v + 1)
    /// }
    ///
    /// assert_eq!(first(Outcome::Ok(1)).unwrap(), 2);
    /// assert!(first(Outcome::Err(StringError::new("no"))).is_err());
    /// ```
    #[inline]
    pub fn raise(self) -> Fallible<T> {
        match self {
            Outcome::Ok(v) => Ok(v),
            Outcome::Err(e) => Err(Raised::new(e)),
        }
    }

    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, op: F) -> Outcome<U, E> {
        match self {
            Outcome::Ok(v) => Outcome::Ok(op(v)),
            Outcome::Err(e) => Outcome::Err(e),
        }
    }

    #[inline]
    pub fn map_err<G: Failure, F: FnOnce(E) -> G>(self, op: F) -> Outcome<T, G> {
        match self {
            Outcome::Ok(v) => Outcome::Ok(v),
            Outcome::Err(e) => Outcome::Err(op(e)),
        }
    }

    #[inline]
    pub fn and_then<U, F: FnOnce(T) -> Outcome<U, E>>(self, op: F) -> Outcome<U, E> {
        match self {
            Outcome::Ok(v) => op(v),
            Outcome::Err(e) => Outcome::Err(e),
        }
    }

    #[inline]
    pub fn into_result(self) -> core::result::Result<T, E> {
        match self {
            Outcome::Ok(v) => Ok(v),
            Outcome::Err(e) => Err(e),
        }
    }
}

impl<T, E: Failure> From<core::result::Result<T, E>> for Outcome<T, E> {
    fn from(result: core::result::Result<T, E>) -> Self {
        match result {
            Ok(v) => Outcome::Ok(v),
            Err(e) => Outcome::Err(e),
        }
    }
}

impl<T, E: Failure> From<Outcome<T, E>> for core::result::Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}

// ============================================================
// Equality, hashing, rendering
// ============================================================

impl<T: PartialEq, E: Failure> PartialEq for Outcome<T, E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Outcome::Ok(a), Outcome::Ok(b)) => a == b,
            (Outcome::Err(a), Outcome::Err(b)) => a.kind() == b.kind() && a.args() == b.args(),
            _ => false,
        }
    }
}

impl<T: Eq, E: Failure> Eq for Outcome<T, E> {}

/// Only available when `T: Hash`; an `Err` hashes its kind and arguments,
/// which are always hashable.
impl<T: Hash, E: Failure> Hash for Outcome<T, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Outcome::Ok(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            Outcome::Err(e) => {
                1u8.hash(state);
                e.kind().hash(state);
                e.args().hash(state);
            }
        }
    }
}

/// `Err(<Kind>(<args>))` for a failure, without needing the payload type.
struct Described<'a, E>(&'a E);

impl<E: Failure> fmt::Display for Described<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Err({}{:?})", self.0.kind().short_name(), self.0.args())
    }
}

/// `Ok(<payload>)` or `Err(<Kind>(<args>))`.
impl<T: fmt::Debug, E: Failure> fmt::Debug for Outcome<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok(v) => f.debug_tuple("Ok").field(v).finish(),
            Outcome::Err(e) => fmt::Display::fmt(&Described(e), f),
        }
    }
}
