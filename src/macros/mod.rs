//! Declarative macros for poltergeist.

mod helpers;

// capture! and capture_async! are #[macro_export]ed at the crate root
#[macro_use]
mod capture;

pub use helpers::*;
