//! poltergeist - Explicit Ok/Err outcomes with typed failure capture
//!
//! # Overview
//!
//! `poltergeist` turns raised failures into values. A capturing adapter wraps
//! a fallible function and converts the failure kinds you list into
//! [`Outcome::Err`]; the return value becomes [`Outcome::Ok`]; every other
//! failure keeps propagating through `?` as [`Raised`].
//!
//! # Quick Start
//!
//! ```
//! use poltergeist::{catch, Fallible, Outcome};
//! use std::num::ParseIntError;
//!
//! /// Parse a port number.
//! #[catch(ParseIntError)]
//! fn port(s: &str) -> Result<u16, ParseIntError> {
//!     s.parse()
//! }
//!
//! fn main() -> Fallible<()> {
//!     assert_eq!(port("8080")?, Outcome::Ok(8080));
//!     assert!(port("http")?.is_err());
//!     Ok(())
//! }
//! ```
//!
//! # Surface
//!
//! ## Outcome
//!
//! | Item | Description |
//! |------|-------------|
//! | `Outcome::Ok(v)` / `Outcome::Err(e)` | Construct / match |
//! | `.err()` / `.ok()` | Failure or payload as `Option` |
//! | `.unwrap()` | Payload; panics with the failure itself on `Err` |
//! | `.unwrap_or(d)` / `.unwrap_or_else(f)` | Payload or fallback |
//! | `.raise()` | Payload, or re-raise the failure through `?` |
//! | `==`, `Hash` | `Err`s compare by failure kind and arguments |
//!
//! ## Capturing
//!
//! | Pattern | Description |
//! |---------|-------------|
//! | `#[catch(A, B)] fn` | Rewrite a function to return `Fallible<Outcome<..>>` |
//! | `#[catch_async(A)] async fn` | Same for async functions |
//! | `catch::<(A,)>().wrap(f)` | Wrap a closure |
//! | `catch_async::<(A,)>().wrap(f)` | Wrap an async closure |
//! | `capture!(A => { .. })` | Capture a block |
//! | `capture_async!(A => { .. })` | Capture an async block |
//! | `result.capture::<(A,)>()` | Capture a finished `Result` |
//!
//! ## Failures
//!
//! | Item | Description |
//! |------|-------------|
//! | `Failure` | Trait: kind + constructor arguments |
//! | `#[derive(Failure)]` | Arguments from fields |
//! | `AnyFailure` | One of several captured kinds |
//! | `args![..]` | Build `Args` by hand |
//!
//! # Features
//!
//! - `tracing`: emit `trace!` events when a failure is captured or passed on.

// ============================================================
// Modules
// ============================================================

mod value;
mod failure;
mod raised;
mod outcome;
mod adapter;
mod ext;
mod macros;

// ============================================================
// Re-exports
// ============================================================

pub use value::{IntoValue, Value};
pub use failure::{AnyFailure, Args, Failure, Kind};
pub use raised::{raise, Fallible, Raised, StringError};
pub use outcome::Outcome;
pub use adapter::{capture, catch, catch_async, AsyncCatcher, Capture, Catcher, Kinds};
pub use ext::CaptureExt;

// Attribute and derive macros share names with the function and trait above,
// living in the macro namespace.
pub use poltergeist_macros::{catch, catch_async, Failure};

// Internal helper for macros
#[doc(hidden)]
pub use macros::__Returns;
