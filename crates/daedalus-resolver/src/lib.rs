//! # Daedalus Resolver
//!
//! The semantic-analysis pass of the Daedalus handler code generator.
//!
//! Given a [`Declaration`](daedalus_core::Declaration) for each parameter
//! of an endpoint method, the resolver decides how the value is extracted
//! from an incoming request and which decoder converts it, producing
//! [`ParameterBinding`](daedalus_core::ParameterBinding)s for a downstream
//! emitter or structured diagnostics when the metadata is missing,
//! duplicated, or illegal.
//!
//! ## Example
//!
//! ```rust
//! use daedalus_core::{Declaration, MetadataEntry, TypeRef, well_known};
//! use daedalus_resolver::Resolver;
//!
//! let declaration = Declaration::new(
//!     "limit",
//!     TypeRef::generic("Option", vec![TypeRef::named("u32")]),
//!     vec![MetadataEntry::QueryParam {
//!         name: "limit".to_string(),
//!         decoder: well_known::default_decoder(),
//!     }],
//! );
//!
//! let resolved = Resolver::standard().resolve_method("list_users", &[declaration]);
//! assert!(resolved.is_success());
//! assert_eq!(resolved.bindings().len(), 1);
//! ```
//!
//! Classification is a pure function of the declaration and the decoder
//! catalog: identical inputs always yield identical bindings or identical
//! diagnostics, so generated code is reproducible across runs.

#![doc(html_root_url = "https://docs.rs/daedalus-resolver/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
mod classify;
mod resolve;
mod shape;

pub use catalog::{DecoderCatalog, SUPPORTED_SCALARS};
pub use classify::{Classification, Resolver};
pub use resolve::ResolvedMethod;
pub use shape::{list_inner, optional_inner, set_inner, shape_of};
