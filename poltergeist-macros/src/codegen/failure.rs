//! `#[derive(Failure)]` expansion.

use proc_macro2::{TokenStream, TokenTree};
use quote::{format_ident, quote, ToTokens};
use syn::{parse_quote, Data, DataEnum, DeriveInput, Error, Field, Fields, Generics, Ident, Index, Result};

use crate::parsing::{field_mode, FieldMode};

pub fn expand(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let name = &input.ident;
    let generics = bounded_generics(&input)?;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => struct_args(&data.fields)?,
        Data::Enum(data) => enum_args(data)?,
        Data::Union(data) => {
            return Err(Error::new_spanned(
                data.union_token,
                "`Failure` cannot be derived for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::poltergeist::Failure for #name #ty_generics #where_clause {
            fn args(&self) -> ::poltergeist::Args {
                #[allow(unused_mut)]
                let mut __args = ::poltergeist::Args::new();
                #body
                __args
            }
        }
    })
}

/// Add the bounds the generated pushes need for fields whose type mentions a
/// type parameter, plus the `Failure` supertraits for the derived type.
fn bounded_generics(input: &DeriveInput) -> Result<Generics> {
    let mut generics = input.generics.clone();
    let params: Vec<&Ident> = input.generics.type_params().map(|p| &p.ident).collect();
    if params.is_empty() {
        return Ok(generics);
    }

    let fields: Vec<&Field> = match &input.data {
        Data::Struct(data) => data.fields.iter().collect(),
        Data::Enum(data) => data.variants.iter().flat_map(|v| v.fields.iter()).collect(),
        Data::Union(_) => Vec::new(),
    };

    let name = &input.ident;
    let (_, ty_generics, _) = input.generics.split_for_impl();
    let predicates = &mut generics.make_where_clause().predicates;
    for field in fields {
        let ty = &field.ty;
        if !mentions(ty.to_token_stream(), &params) {
            continue;
        }
        match field_mode(field)? {
            FieldMode::Value => {
                predicates.push(parse_quote! { #ty: ::poltergeist::IntoValue + ::core::clone::Clone })
            }
            FieldMode::Display => predicates.push(parse_quote! { #ty: ::core::fmt::Display }),
            FieldMode::Skip => {}
        }
    }
    predicates.push(parse_quote! {
        #name #ty_generics: ::std::error::Error + ::core::marker::Send + ::core::marker::Sync + 'static
    });
    Ok(generics)
}

fn mentions(tokens: TokenStream, params: &[&Ident]) -> bool {
    tokens.into_iter().any(|token| match token {
        TokenTree::Ident(ident) => params.iter().any(|param| **param == ident),
        TokenTree::Group(group) => mentions(group.stream(), params),
        _ => false,
    })
}

/// Push one field, given an expression that borrows it.
fn push(binding: TokenStream, mode: FieldMode) -> TokenStream {
    match mode {
        FieldMode::Value => quote! { __args.push(#binding); },
        FieldMode::Display => quote! { __args.push(::std::string::ToString::to_string(#binding)); },
        FieldMode::Skip => TokenStream::new(),
    }
}

fn struct_args(fields: &Fields) -> Result<TokenStream> {
    let mut pushes = Vec::new();
    for (idx, field) in fields.iter().enumerate() {
        let binding = match &field.ident {
            Some(ident) => quote! { &self.#ident },
            None => {
                let index = Index::from(idx);
                quote! { &self.#index }
            }
        };
        pushes.push(push(binding, field_mode(field)?));
    }
    Ok(quote! { #(#pushes)* })
}

fn enum_args(data: &DataEnum) -> Result<TokenStream> {
    if data.variants.is_empty() {
        return Ok(quote! { match *self {} });
    }

    let mut arms = Vec::new();
    for variant in &data.variants {
        let ident = &variant.ident;
        let label = ident.to_string();
        let mut pushes = Vec::new();

        let pattern = match &variant.fields {
            Fields::Named(fields) => {
                let mut bound = Vec::new();
                for field in &fields.named {
                    let mode = field_mode(field)?;
                    if mode == FieldMode::Skip {
                        continue;
                    }
                    let name = &field.ident;
                    bound.push(quote! { #name });
                    pushes.push(push(quote! { #name }, mode));
                }
                quote! { Self::#ident { #(#bound,)* .. } }
            }
            Fields::Unnamed(fields) => {
                let mut bound = Vec::new();
                for (idx, field) in fields.unnamed.iter().enumerate() {
                    let mode = field_mode(field)?;
                    if mode == FieldMode::Skip {
                        bound.push(quote! { _ });
                        continue;
                    }
                    let name = format_ident!("__field{}", idx);
                    bound.push(quote! { #name });
                    pushes.push(push(quote! { #name }, mode));
                }
                quote! { Self::#ident( #(#bound),* ) }
            }
            Fields::Unit => quote! { Self::#ident },
        };

        arms.push(quote! {
            #pattern => {
                __args.push(#label);
                #(#pushes)*
            }
        });
    }

    Ok(quote! {
        match self {
            #(#arms)*
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_fields_in_order() {
        let code = expand(quote! {
            struct Mismatch { expected: u32, #[source] cause: io::Error, found: u32 }
        })
        .unwrap()
        .to_string();
        assert!(code.contains("impl :: poltergeist :: Failure for Mismatch"));
        assert!(code.contains("__args . push (& self . expected) ; __args . push (& self . found)"));
        assert!(!code.contains("cause"));
    }

    #[test]
    fn test_tuple_struct_display() {
        let code = expand(quote! { struct Unreachable(#[failure(display)] Ipv4Addr); })
            .unwrap()
            .to_string();
        assert!(code.contains("ToString :: to_string (& self . 0)"));
    }

    #[test]
    fn test_enum_variants_labelled() {
        let code = expand(quote! {
            enum Fetch { Timeout { secs: u64 }, Status(u16, #[failure(skip)] String), Closed }
        })
        .unwrap()
        .to_string();
        assert!(code.contains("Self :: Timeout { secs , .. }"));
        assert!(code.contains("Self :: Status (__field0 , _)"));
        assert!(code.contains("__args . push (\"Closed\")"));
    }

    #[test]
    fn test_generics_preserved() {
        let code = expand(quote! { struct Wrapped<T: Clone> where T: Send { value: T } })
            .unwrap()
            .to_string();
        assert!(code.contains("impl < T : Clone > :: poltergeist :: Failure for Wrapped < T > where T : Send"));
    }

    #[test]
    fn test_generic_fields_bounded() {
        let code = expand(quote! {
            struct Labelled<T, L> { value: T, #[failure(display)] label: L, #[source] cause: Box<T>, code: u32 }
        })
        .unwrap()
        .to_string();
        assert!(code.contains("T : :: poltergeist :: IntoValue + :: core :: clone :: Clone"));
        assert!(code.contains("L : :: core :: fmt :: Display"));
        assert!(!code.contains("Box < T > :"));
        assert!(!code.contains("u32 :"));
        assert!(code.contains("Labelled < T , L > : :: std :: error :: Error"));
    }

    #[test]
    fn test_non_generic_has_no_where_clause() {
        let code = expand(quote! { struct Plain { code: u32 } }).unwrap().to_string();
        assert!(!code.contains("where"));
    }

    #[test]
    fn test_union_rejected() {
        assert!(expand(quote! { union Bits { a: u32, b: f32 } }).is_err());
    }
}
