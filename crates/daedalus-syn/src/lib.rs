//! # Daedalus Syn
//!
//! The declaration-model boundary of the Daedalus handler code generator.
//!
//! This crate turns annotated Rust handler functions into
//! [`Declaration`](daedalus_core::Declaration)s the resolver can classify.
//! Parameter attributes name the request source and decoder:
//!
//! ```rust
//! use daedalus_syn::HandlerFn;
//! use syn::parse_quote;
//!
//! let item: syn::ItemFn = parse_quote! {
//!     async fn get_user(
//!         #[path_param] user_id: i64,
//!         #[query("limit")] limit: Option<u32>,
//!         ctx: RequestContext,
//!     ) -> Result<Json<User>, Error> {
//!         todo!()
//!     }
//! };
//!
//! let handler = HandlerFn::parse(&item).expect("well-formed handler");
//! assert_eq!(handler.name(), "get_user");
//! assert_eq!(handler.parameters().len(), 3);
//! ```
//!
//! Recognized attributes: `#[body]`, `#[path_param]`, `#[path_multi]`,
//! `#[query(...)]`, `#[header(...)]`, `#[cookie(...)]`, `#[safe]`, and
//! `#[unsafe_log]`. Anything else on a parameter is ignored. Omitted
//! decoders are filled with the well-known sentinels so every entry
//! reaching the resolver carries an explicit decoder payload.

#![doc(html_root_url = "https://docs.rs/daedalus-syn/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod attrs;
mod convert;
mod error;

use quote::ToTokens;
use syn::{FnArg, ItemFn, Pat, PatType};

use daedalus_core::Declaration;

pub use error::FrontendError;

/// A handler function reduced to the declaration model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFn {
    name: String,
    parameters: Vec<Declaration>,
}

impl HandlerFn {
    /// Parses a handler function into parameter declarations.
    pub fn parse(item: &ItemFn) -> Result<Self, FrontendError> {
        let parameters = item
            .sig
            .inputs
            .iter()
            .map(declaration_from_arg)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: item.sig.ident.to_string(),
            parameters,
        })
    }

    /// Parses a handler from a token stream, for proc-macro embedders.
    pub fn parse_tokens(tokens: proc_macro2::TokenStream) -> Result<Self, FrontendError> {
        let item: ItemFn = syn::parse2(tokens)?;
        Self::parse(&item)
    }

    /// The handler function's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter declarations, in signature order.
    #[must_use]
    pub fn parameters(&self) -> &[Declaration] {
        &self.parameters
    }
}

/// Converts one function argument into a declaration.
fn declaration_from_arg(arg: &FnArg) -> Result<Declaration, FrontendError> {
    let FnArg::Typed(PatType { attrs, pat, ty, .. }) = arg else {
        return Err(FrontendError::SelfParameter);
    };

    let Pat::Ident(pat_ident) = pat.as_ref() else {
        return Err(FrontendError::UnsupportedPattern);
    };
    let name = pat_ident.ident.to_string();

    let type_ref =
        convert::type_ref(ty).ok_or_else(|| FrontendError::UnsupportedType {
            parameter: name.clone(),
            type_text: ty.to_token_stream().to_string(),
        })?;

    let mut metadata = Vec::new();
    for attr in attrs {
        if let Some(entry) = attrs::metadata_entry(attr, &name)? {
            metadata.push(entry);
        }
    }

    Ok(Declaration::new(name, type_ref, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use daedalus_core::{well_known, MetadataEntry, TypeRef};
    use syn::parse_quote;

    #[test]
    fn parses_annotated_parameters_in_order() {
        let item: ItemFn = parse_quote! {
            async fn list_items(
                #[path_param] owner: i64,
                #[query("limit")] limit: Option<u32>,
            ) -> Result<Json<Items>, Error> {
                todo!()
            }
        };
        let handler = HandlerFn::parse(&item).expect("parses");
        assert_eq!(handler.name(), "list_items");

        let params = handler.parameters();
        assert_eq!(params[0].name(), "owner");
        assert_eq!(
            params[0].metadata(),
            &[MetadataEntry::PathParam {
                decoder: well_known::default_decoder(),
            }]
        );
        assert_eq!(params[1].name(), "limit");
        assert_eq!(
            params[1].ty(),
            &TypeRef::generic("Option", vec![TypeRef::named("u32")])
        );
    }

    #[test]
    fn bare_parameters_have_no_metadata() {
        let item: ItemFn = parse_quote! {
            async fn handle(exchange: ServerExchange) -> Response {
                todo!()
            }
        };
        let handler = HandlerFn::parse(&item).expect("parses");
        assert!(handler.parameters()[0].metadata().is_empty());
    }

    #[test]
    fn foreign_attributes_are_ignored() {
        let item: ItemFn = parse_quote! {
            async fn handle(
                #[allow(unused)]
                #[query("q")]
                q: String,
            ) -> Response {
                todo!()
            }
        };
        let handler = HandlerFn::parse(&item).expect("parses");
        assert_eq!(handler.parameters()[0].metadata().len(), 1);
    }

    #[test]
    fn self_parameter_is_rejected() {
        let item: ItemFn = parse_quote! {
            async fn handle(self, #[query("q")] q: String) -> Response {
                todo!()
            }
        };
        assert!(matches!(
            HandlerFn::parse(&item),
            Err(FrontendError::SelfParameter)
        ));
    }

    #[test]
    fn reference_typed_parameter_is_rejected() {
        let item: ItemFn = parse_quote! {
            async fn handle(#[query("q")] q: &str) -> Response {
                todo!()
            }
        };
        let err = HandlerFn::parse(&item).expect_err("unsupported type");
        assert!(err.to_string().contains("unsupported type"));
    }
}
