//! `#[catch]` / `#[catch_async]` expansion.
//!
//! The function body moves into a closure (sync) or an `async move` block
//! (async) with the declared return type, and the adapter captures its
//! result. `?` and `return` inside the body keep their meaning.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Error, ItemFn, Result, ReturnType, Type};

use crate::parsing::parse_kinds;

/// Which adapter to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Sync,
    Async,
}

impl Mode {
    fn attr_name(self) -> &'static str {
        match self {
            Mode::Sync => "catch",
            Mode::Async => "catch_async",
        }
    }
}

pub fn expand(attr: TokenStream, item: TokenStream, mode: Mode) -> Result<TokenStream> {
    let kinds = parse_kinds(attr, mode.attr_name())?;
    let func: ItemFn = syn::parse2(item)?;

    match (mode, &func.sig.asyncness) {
        (Mode::Sync, Some(token)) => {
            return Err(Error::new_spanned(token, "use `#[catch_async]` on an `async fn`"));
        }
        (Mode::Async, None) => {
            return Err(Error::new_spanned(
                func.sig.fn_token,
                "`#[catch_async]` requires an `async fn`; use `#[catch]` here",
            ));
        }
        _ => {}
    }

    let declared: Type = match &func.sig.output {
        ReturnType::Type(_, ty) => (**ty).clone(),
        ReturnType::Default => {
            return Err(Error::new_spanned(
                &func.sig,
                format!("`#[{}]` requires a function returning `Result<T, E>`", mode.attr_name()),
            ));
        }
    };

    let kinds = quote! { ( #(#kinds,)* ) };
    let ItemFn { attrs, vis, mut sig, block } = func;
    sig.output = parse_quote! {
        -> ::poltergeist::Fallible<::poltergeist::Outcome<
            <#declared as ::poltergeist::__Returns>::Value,
            <#kinds as ::poltergeist::Kinds>::Caught,
        >>
    };

    let body = match mode {
        Mode::Sync => quote! {
            ::poltergeist::catch::<#kinds>().call(|| -> #declared #block)
        },
        Mode::Async => quote! {
            ::poltergeist::catch_async::<#kinds>()
                .call(async move {
                    let __outcome: #declared = #block;
                    __outcome
                })
                .await
        },
    };

    Ok(quote! {
        #(#attrs)*
        #vis #sig {
            #body
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(attr: TokenStream, item: TokenStream, mode: Mode) -> String {
        expand(attr, item, mode).unwrap().to_string()
    }

    #[test]
    fn test_sync_rewrites_signature() {
        let code = expand_str(
            quote! { ParseIntError },
            quote! {
                /// Parse it.
                pub fn parse(s: &str) -> Result<i32, ParseIntError> { s.parse() }
            },
            Mode::Sync,
        );
        assert!(code.contains("pub fn parse (s : & str)"));
        assert!(code.contains(":: poltergeist :: Fallible"));
        assert!(code.contains("< (ParseIntError ,) as :: poltergeist :: Kinds > :: Caught"));
        assert!(code.contains(":: poltergeist :: catch :: < (ParseIntError ,) > () . call"));
        assert!(code.contains("Parse it."));
    }

    #[test]
    fn test_async_awaits_capture() {
        let code = expand_str(
            quote! { io::Error, Timeout },
            quote! { async fn fetch(&self) -> io::Result<Vec<u8>> { self.read().await } },
            Mode::Async,
        );
        assert!(code.contains("async fn fetch (& self)"));
        assert!(code.contains("catch_async :: < (io :: Error , Timeout ,) >"));
        assert!(code.contains("async move"));
        assert!(code.contains(". await"));
    }

    #[test]
    fn test_sync_on_async_fn_rejected() {
        let err = expand(quote! { E }, quote! { async fn f() -> Result<(), E> { Ok(()) } }, Mode::Sync)
            .unwrap_err();
        assert!(err.to_string().contains("catch_async"));
    }

    #[test]
    fn test_async_on_sync_fn_rejected() {
        let err = expand(quote! { E }, quote! { fn f() -> Result<(), E> { Ok(()) } }, Mode::Async)
            .unwrap_err();
        assert!(err.to_string().contains("requires an `async fn`"));
    }

    #[test]
    fn test_missing_return_type_rejected() {
        let err = expand(quote! { E }, quote! { fn f() {} }, Mode::Sync).unwrap_err();
        assert!(err.to_string().contains("returning `Result<T, E>`"));
    }

    #[test]
    fn test_empty_kinds_rejected() {
        assert!(expand(quote! {}, quote! { fn f() -> Result<(), E> { Ok(()) } }, Mode::Sync).is_err());
    }
}
