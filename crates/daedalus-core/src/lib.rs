//! # Daedalus Core
//!
//! Core declaration model and binding types for the Daedalus handler
//! code generator.
//!
//! This crate defines the data the parameter-binding resolver consumes and
//! produces:
//!
//! - [`TypeRef`] - Nominal type references with generic arguments
//! - [`Declaration`] - One method parameter with its attached metadata
//! - [`MetadataEntry`] - Normalized request-source and logging markers
//! - [`ParameterBinding`] - The resolved description of one parameter
//! - [`DecoderRef`] - The identity of the decoder selected for a value
//! - [`Diagnostic`] / [`DiagnosticReport`] - Collected classification errors
//!
//! The resolver pass itself lives in `daedalus-resolver`; frontends that
//! populate [`Declaration`]s from source ASTs live in `daedalus-syn`.

#![doc(html_root_url = "https://docs.rs/daedalus-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binding;
mod decl;
mod diagnostic;
mod types;

pub use binding::{
    decoder_var_name, ContainerShape, DecoderRef, ParameterBinding, SafeLogging,
};
pub use decl::{Declaration, MetadataEntry, MetadataKind, SourceMarker};
pub use diagnostic::{Diagnostic, DiagnosticReport};
pub use types::{well_known, TypeRef};
