//! Extension trait for Result types.

use crate::adapter::{capture, Kinds};
use crate::outcome::Outcome;
use crate::raised::{Fallible, Raised};

/// Capture a `Result` in place, without wrapping a function.
pub trait CaptureExt<T> {
    /// Turn an error of one of the kinds in `K` into `Outcome::Err` and keep
    /// every other error raised.
    ///
    /// ```
    /// use poltergeist::CaptureExt;
    /// use std::num::ParseIntError;
    ///
    /// let outcome = "x".parse::<u8>().capture::<(ParseIntError,)>().unwrap();
    /// assert!(outcome.is_err());
    /// ```
    fn capture<K: Kinds>(self) -> Fallible<Outcome<T, K::Caught>>;
}

impl<T, X: Into<Raised>> CaptureExt<T> for core::result::Result<T, X> {
    #[inline]
    fn capture<K: Kinds>(self) -> Fallible<Outcome<T, K::Caught>> {
        capture::<K, T, X>(self)
    }
}
