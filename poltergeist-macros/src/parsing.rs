//! Shared parsing utilities for attribute arguments and field attributes.

use proc_macro2::{Span, TokenStream};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Error, Field, Result, Token, Type};

/// Parse the kind list of `#[catch(A, B, ...)]`.
///
/// The list must be non-empty; an empty list would capture nothing and is
/// almost certainly a mistake.
pub fn parse_kinds(attr: TokenStream, attr_name: &str) -> Result<Vec<Type>> {
    let kinds = Punctuated::<Type, Token![,]>::parse_terminated.parse2(attr)?;
    if kinds.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            format!("expected at least one failure kind: `#[{}(Kind, ...)]`", attr_name),
        ));
    }
    Ok(kinds.into_iter().collect())
}

/// How a field contributes to a derived failure's arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// Converted with `IntoValue`.
    Value,
    /// Converted through `Display`.
    Display,
    /// Left out.
    Skip,
}

/// Attributes marking a chained cause (thiserror's vocabulary).
const CAUSE_ATTRS: &[&str] = &["source", "from", "backtrace"];

/// Read `#[failure(..)]` and cause markers on a field.
pub fn field_mode(field: &Field) -> Result<FieldMode> {
    let mut skip = field.ident.as_ref().map_or(false, |ident| ident == "source");
    let mut display = false;

    for attr in &field.attrs {
        let path = attr.path();
        if CAUSE_ATTRS.iter().any(|name| path.is_ident(name)) {
            skip = true;
        } else if path.is_ident("failure") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("display") {
                    display = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown failure attribute, expected `skip` or `display`"))
                }
            })?;
        }
    }

    Ok(if skip {
        FieldMode::Skip
    } else if display {
        FieldMode::Display
    } else {
        FieldMode::Value
    })
}
