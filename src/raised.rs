//! Type-erased carrier for failures travelling through `?`.

use core::fmt;
use std::error::Error as StdError;

use crate::failure::{AnyFailure, Failure};

/// A raised failure that no adapter has captured (yet).
///
/// This is a newtype around `Box<dyn Error + Send + Sync>`. It does NOT
/// implement `Error` itself, which is what allows the blanket
/// `From<E: Error>` impl and therefore `?` on any error type.
///
/// Raising an [`AnyFailure`] unwraps it, so adapters further up always see
/// the original concrete kind.
pub struct Raised {
    inner: Box<dyn StdError + Send + Sync + 'static>,
}

/// `Result` whose error is a raised failure.
pub type Fallible<T> = core::result::Result<T, Raised>;

impl Raised {
    /// Raise any error.
    #[inline]
    pub fn new<E: StdError + Send + Sync + 'static>(e: E) -> Self {
        Self::from_box(Box::new(e))
    }

    /// Raise a boxed error.
    pub fn from_box(e: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        match e.downcast::<AnyFailure>() {
            Ok(any) => Self { inner: any.into_inner() },
            Err(inner) => Self { inner },
        }
    }

    /// Raise a message-only failure.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(StringError::new(message))
    }

    /// Whether the raised failure is of type `E`.
    #[inline]
    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.inner.is::<E>()
    }

    /// Try to downcast to a specific error type.
    #[inline]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// Try to downcast and consume the raised failure.
    #[inline]
    pub fn downcast<E: StdError + 'static>(self) -> core::result::Result<E, Self> {
        match self.inner.downcast::<E>() {
            Ok(e) => Ok(*e),
            Err(inner) => Err(Self { inner }),
        }
    }

    /// Get the inner error as a trait object reference.
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    /// Get the inner boxed error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.inner
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Raised").field(&self.inner).finish()
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

// This doesn't conflict with From<T> for T because Raised doesn't implement Error
impl<E: StdError + Send + Sync + 'static> From<E> for Raised {
    fn from(e: E) -> Self {
        Raised::new(e)
    }
}

impl From<Raised> for Box<dyn StdError + Send + Sync + 'static> {
    fn from(raised: Raised) -> Self {
        raised.inner
    }
}

/// Raise `e` as the error of a [`Fallible`].
///
/// ```
/// use poltergeist::{raise, Fallible, StringError};
///
/// fn check(n: i32) -> Fallible<i32> {
///     if n < 0 {
///         return raise(StringError::new("negative"));
///     }
///     Ok(n)
/// }
///
/// assert!(check(-1).unwrap_err().is::<StringError>());
/// ```
#[inline]
pub fn raise<T, E: StdError + Send + Sync + 'static>(e: E) -> Fallible<T> {
    Err(Raised::new(e))
}

// ============================================================
// StringError helper
// ============================================================

/// A failure that is only a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringError(String);

impl StringError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for StringError {}

impl Failure for StringError {}
