//! The failure capability: what an `Outcome::Err` may hold.
//!
//! A failure is any error that can travel through `?` and that can describe
//! itself as a [`Kind`] (its concrete type) plus [`Args`] (its constructor
//! arguments). Two failures are considered equal when both match, whatever
//! else they carry.

use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::error::Error as StdError;

use smallvec::SmallVec;

use crate::value::{IntoValue, Value};

// ============================================================
// Failure trait
// ============================================================

/// An error that can be held by [`Outcome::Err`](crate::Outcome::Err).
///
/// Both methods are provided. `kind` reports the concrete type and should not
/// be overridden outside of type-erasing wrappers such as [`AnyFailure`].
/// `args` defaults to the `Display` message as the single argument; override
/// it (or use `#[derive(Failure)]`) when the failure has structured fields.
///
/// # Examples
///
/// ```
/// use poltergeist::{args, Args, Failure};
///
/// #[derive(Debug)]
/// struct Timeout { secs: u64 }
///
/// impl std::fmt::Display for Timeout {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "timed out after {}s", self.secs)
///     }
/// }
///
/// impl std::error::Error for Timeout {}
///
/// impl Failure for Timeout {
///     fn args(&self) -> Args {
///         args![self.secs]
///     }
/// }
///
/// assert_eq!(Timeout { secs: 3 }.args(), args![3u64]);
/// ```
pub trait Failure: StdError + Send + Sync + 'static {
    /// The concrete failure kind.
    ///
    /// Some std errors (`io::Error`, `ParseIntError`) have an inherent
    /// `kind()` method that wins method resolution; call `Failure::kind(&e)`
    /// on those.
    fn kind(&self) -> Kind {
        Kind::of::<Self>()
    }

    /// The constructor arguments used for equality and hashing.
    fn args(&self) -> Args {
        Args::message(self)
    }
}

// ============================================================
// Kind
// ============================================================

/// Identity of a concrete failure type.
///
/// Compares and hashes by `TypeId` only; the name is kept for rendering.
#[derive(Clone, Copy)]
pub struct Kind {
    id: TypeId,
    name: &'static str,
}

impl Kind {
    /// The kind of type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Whether this is the kind of type `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type path, e.g. `core::num::error::ParseIntError`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment without generics, e.g. `ParseIntError`.
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Kind").field(&self.name).finish()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

// ============================================================
// Args
// ============================================================

/// Ordered constructor arguments of a failure.
///
/// Inline storage for up to two values (covers nearly every failure); larger
/// argument lists spill to the heap.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Args(SmallVec<[Value; 2]>);

impl Args {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// A single argument holding the `Display` form of `source`.
    pub fn message<D: fmt::Display + ?Sized>(source: &D) -> Self {
        let mut args = Self::new();
        args.push(source.to_string());
        args
    }

    pub fn push(&mut self, value: impl IntoValue) {
        self.0.push(value.into_value());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders like a tuple literal: `("abc", 1)`.
impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (idx, value) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            value.write_repr(f)?;
        }
        f.write_str(")")
    }
}

/// Build [`Args`] from values implementing [`IntoValue`](crate::IntoValue).
///
/// ```
/// use poltergeist::{args, Value};
///
/// let args = args!["abc", 1, true];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args.get(0), Some(&Value::from("abc")));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut __args = $crate::Args::new();
        $( __args.push($value); )+
        __args
    }};
}

// ============================================================
// AnyFailure - type-erased capture of several kinds
// ============================================================

/// A failure whose concrete type was one of several captured kinds.
///
/// Keeps the original [`Kind`] and [`Args`], so equality still means "same
/// concrete kind, same arguments". Use [`downcast`](Self::downcast) to get the
/// original failure back.
pub struct AnyFailure {
    inner: Box<dyn StdError + Send + Sync + 'static>,
    kind: Kind,
    args: Args,
}

impl AnyFailure {
    /// Erase a concrete failure. An `AnyFailure` passed in is returned as is.
    pub fn new<F: Failure>(failure: F) -> Self {
        let kind = failure.kind();
        let args = failure.args();
        let boxed: Box<dyn StdError + Send + Sync + 'static> = Box::new(failure);
        match boxed.downcast::<AnyFailure>() {
            Ok(any) => *any,
            Err(inner) => Self { inner, kind, args },
        }
    }

    pub fn is<F: Failure>(&self) -> bool {
        self.inner.is::<F>()
    }

    pub fn downcast_ref<F: Failure>(&self) -> Option<&F> {
        self.inner.downcast_ref::<F>()
    }

    /// Recover the concrete failure, or get `self` back if it is another kind.
    pub fn downcast<F: Failure>(self) -> core::result::Result<F, Self> {
        let Self { inner, kind, args } = self;
        match inner.downcast::<F>() {
            Ok(failure) => Ok(*failure),
            Err(inner) => Err(Self { inner, kind, args }),
        }
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.inner
    }
}

impl fmt::Debug for AnyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for AnyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for AnyFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

impl Failure for AnyFailure {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn args(&self) -> Args {
        self.args.clone()
    }
}

// ============================================================
// Standard library failures
// ============================================================

macro_rules! impl_failure {
    ($($t:ty),* $(,)?) => {
        $( impl Failure for $t {} )*
    };
}

impl_failure!(
    core::num::ParseIntError,
    core::num::ParseFloatError,
    core::num::TryFromIntError,
    core::str::ParseBoolError,
    core::char::ParseCharError,
    core::str::Utf8Error,
    std::string::FromUtf8Error,
    std::net::AddrParseError,
    std::sync::mpsc::RecvError,
    fmt::Error,
);

/// Arguments are the error kind and the message, so two I/O errors with the
/// same text but different kinds stay distinct.
impl Failure for std::io::Error {
    fn args(&self) -> Args {
        crate::args![format!("{:?}", self.kind()), self.to_string()]
    }
}
