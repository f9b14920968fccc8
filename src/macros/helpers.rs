//! Helper items for macro-generated code.

use crate::raised::Raised;

/// Splits the declared return type of a `#[catch]` function into its success
/// and error types, so the attribute works with aliases like `io::Result<T>`.
#[doc(hidden)]
pub trait __Returns {
    type Value;
    type Error: Into<Raised>;
}

impl<T, X: Into<Raised>> __Returns for core::result::Result<T, X> {
    type Value = T;
    type Error = X;
}
