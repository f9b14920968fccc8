//! Proc macros for the poltergeist crate.
//!
//! Three entry points, each routed to a code generator:
//! - `#[catch(..)]` and `#[catch_async(..)]` rewrite a function into a
//!   capturing adapter
//! - `#[derive(Failure)]` derives failure arguments from fields

use proc_macro::TokenStream;

mod parsing;
mod codegen;

use codegen::adapter::Mode;

/// Capture the listed failure kinds raised by a function.
///
/// `#[catch(A, B)] fn f(..) -> Result<T, X>` becomes
/// `fn f(..) -> Fallible<Outcome<T, Caught>>` with the same name, parameters,
/// visibility and attributes. `Caught` is `A` for a single kind and
/// `AnyFailure` for several.
#[proc_macro_attribute]
pub fn catch(attr: TokenStream, item: TokenStream) -> TokenStream {
    codegen::adapter::expand(attr.into(), item.into(), Mode::Sync)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Async counterpart of `#[catch]`, for `async fn`.
#[proc_macro_attribute]
pub fn catch_async(attr: TokenStream, item: TokenStream) -> TokenStream {
    codegen::adapter::expand(attr.into(), item.into(), Mode::Async)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `Failure` with the fields as constructor arguments.
///
/// Field attributes:
/// - `#[failure(skip)]` - leave the field out
/// - `#[failure(display)]` - use the field's `Display` string
///
/// Cause fields (`#[source]`, `#[from]`, `#[backtrace]`, or a field named
/// `source`) are always left out. Enum variants contribute their name as the
/// first argument.
#[proc_macro_derive(Failure, attributes(failure))]
pub fn derive_failure(input: TokenStream) -> TokenStream {
    codegen::failure::expand(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
