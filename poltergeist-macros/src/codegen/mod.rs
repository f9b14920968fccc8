//! Code generation for the attribute and derive macros.

pub mod adapter;
pub mod failure;
