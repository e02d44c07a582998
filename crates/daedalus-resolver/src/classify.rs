//! The parameter classifier.
//!
//! [`Resolver::classify`] applies the binding rules to one declaration:
//! it folds the logging markers, validates the source markers, infers the
//! container shape, selects a decoder (user-supplied or catalog default),
//! and produces either a [`ParameterBinding`] or diagnostics. The pass is
//! a pure function of the declaration and the catalog, so identical inputs
//! always yield identical output.

use tracing::{debug, trace};

use daedalus_core::{
    decoder_var_name, well_known, ContainerShape, Declaration, DecoderRef, Diagnostic,
    MetadataKind, ParameterBinding, SafeLogging, SourceMarker, TypeRef,
};

use crate::catalog::DecoderCatalog;
use crate::shape;

const NO_DECODER_MESSAGE: &str = "no default decoder exists for parameter; \
     scalar types with a from_str implementation are supported";

/// The outcome of classifying one declaration.
///
/// A catalog miss produces both a diagnostic and a binding with an
/// [`DecoderRef::Unresolved`] placeholder, so one bad parameter does not
/// hide problems in its siblings. Emitters must treat any diagnostic as a
/// failed run regardless of the binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The resolved binding, absent when validation rejected the parameter.
    pub binding: Option<ParameterBinding>,
    /// Diagnostics recorded for this parameter.
    pub diagnostics: Vec<Diagnostic>,
}

impl Classification {
    fn resolved(binding: ParameterBinding, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            binding: Some(binding),
            diagnostics,
        }
    }

    fn rejected(diagnostic: Diagnostic) -> Self {
        Self {
            binding: None,
            diagnostics: vec![diagnostic],
        }
    }

    /// Returns true when no diagnostic was produced.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The parameter-binding resolver.
///
/// Holds the decoder catalog; otherwise stateless. The catalog is
/// read-only, so one resolver may serve any number of classifications.
#[derive(Debug, Clone)]
pub struct Resolver {
    catalog: DecoderCatalog,
}

impl Resolver {
    /// Creates a resolver over the given catalog.
    #[must_use]
    pub fn new(catalog: DecoderCatalog) -> Self {
        Self { catalog }
    }

    /// Creates a resolver over the standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(DecoderCatalog::standard())
    }

    /// The catalog this resolver consults for default decoders.
    #[must_use]
    pub fn catalog(&self) -> &DecoderCatalog {
        &self.catalog
    }

    /// Classifies one parameter declaration.
    pub fn classify(&self, declaration: &Declaration) -> Classification {
        trace!(
            parameter = %declaration.name(),
            declared_type = %declaration.ty(),
            "classifying parameter"
        );

        let safety = SafeLogging::from_markers(
            declaration.has_safe_marker(),
            declaration.has_unsafe_marker(),
        );
        let sources: Vec<SourceMarker<'_>> = declaration.source_markers().collect();

        let classification = match sources.as_slice() {
            [] => self.classify_unannotated(declaration, safety),
            [marker] => self.classify_source(declaration, *marker, safety),
            markers => {
                let cited = markers
                    .iter()
                    .map(|m| m.kind().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Classification::rejected(
                    Diagnostic::new("only a single request annotation can be used", declaration)
                        .with_context("annotations", cited),
                )
            }
        };

        for diagnostic in &classification.diagnostics {
            debug!(
                parameter = %declaration.name(),
                message = %diagnostic.message(),
                "parameter rejected"
            );
        }
        classification
    }

    /// Handles declarations that carry no source marker: only the three
    /// recognized handle types are bindable, and logging markers are
    /// illegal since there is no request value to log.
    fn classify_unannotated(
        &self,
        declaration: &Declaration,
        safety: SafeLogging,
    ) -> Classification {
        if safety != SafeLogging::Unknown {
            return Classification::rejected(Diagnostic::new(
                "a parameter without a request annotation cannot carry a logging-sensitivity \
                 marker",
                declaration,
            ));
        }

        let name = declaration.name().to_string();
        let ty = declaration.ty();
        if ty.is_named(well_known::AUTH_HEADER) {
            Classification::resolved(ParameterBinding::AuthHeader { name }, vec![])
        } else if ty.is_named(well_known::SERVER_EXCHANGE) {
            Classification::resolved(ParameterBinding::Exchange { name }, vec![])
        } else if ty.is_named(well_known::REQUEST_CONTEXT) {
            Classification::resolved(ParameterBinding::RequestContext { name }, vec![])
        } else {
            let supported = MetadataKind::SOURCE_KINDS
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Classification::rejected(
                Diagnostic::new(
                    "at least one request annotation should be present or the type should be a \
                     recognized handle type",
                    declaration,
                )
                .with_context("supported_annotations", supported),
            )
        }
    }

    /// Dispatches on the single remaining source marker.
    fn classify_source(
        &self,
        declaration: &Declaration,
        marker: SourceMarker<'_>,
        safety: SafeLogging,
    ) -> Classification {
        let name = declaration.name().to_string();
        let decoder_var = decoder_var_name(declaration.name());
        let mut diagnostics = Vec::new();

        let binding = match marker {
            SourceMarker::Body { decoder } => Some(ParameterBinding::Body {
                name,
                decoder: DecoderRef::Custom(decoder.clone()),
                decoder_var,
                safety,
            }),
            SourceMarker::Header {
                name: wire_name,
                decoder,
            } => {
                let (decoder, shape) =
                    self.collection_decoder(declaration, decoder, &mut diagnostics);
                Some(ParameterBinding::Header {
                    name,
                    wire_name: wire_name.to_string(),
                    decoder,
                    decoder_var,
                    shape,
                    safety,
                })
            }
            SourceMarker::QueryParam {
                name: wire_name,
                decoder,
            } => {
                let (decoder, shape) =
                    self.collection_decoder(declaration, decoder, &mut diagnostics);
                Some(ParameterBinding::Query {
                    name,
                    wire_name: wire_name.to_string(),
                    decoder,
                    decoder_var,
                    shape,
                    safety,
                })
            }
            SourceMarker::PathParam { decoder } => {
                let decoder = self.scalar_decoder(declaration, decoder, &mut diagnostics);
                Some(ParameterBinding::Path {
                    name,
                    decoder,
                    decoder_var,
                    safety,
                })
            }
            SourceMarker::PathMultiParam { decoder } => {
                let (decoder, shape) =
                    self.collection_decoder(declaration, decoder, &mut diagnostics);
                Some(ParameterBinding::PathMulti {
                    name,
                    decoder,
                    decoder_var,
                    shape,
                    safety,
                })
            }
            SourceMarker::Cookie {
                name: wire_name,
                decoder,
            } => {
                if declaration.ty().is_named(well_known::BEARER_TOKEN) {
                    if safety != SafeLogging::Unknown {
                        return Classification::rejected(Diagnostic::new(
                            "a BearerToken parameter cannot be annotated with safe logging \
                             annotations",
                            declaration,
                        ));
                    }
                    Some(ParameterBinding::AuthCookie {
                        name,
                        wire_name: wire_name.to_string(),
                        decoder_var,
                    })
                } else {
                    let decoder = self.scalar_decoder(declaration, decoder, &mut diagnostics);
                    Some(ParameterBinding::Cookie {
                        name,
                        wire_name: wire_name.to_string(),
                        decoder,
                        decoder_var,
                        safety,
                    })
                }
            }
        };

        Classification {
            binding,
            diagnostics,
        }
    }

    /// Decoder resolution for multi-valued sources (header, query,
    /// path-multi): the declared type may be scalar, `Option`, `Vec`, or a
    /// set, tried in `Vec` > set > `Option` priority. The catalog is always
    /// queried in collection mode because the wire read is multi-valued.
    fn collection_decoder(
        &self,
        declaration: &Declaration,
        explicit: &TypeRef,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (DecoderRef, ContainerShape) {
        let ty = declaration.ty();
        if !explicit.is_named(well_known::DEFAULT_DECODER) {
            return (DecoderRef::Custom(explicit.clone()), shape::shape_of(ty).0);
        }

        let (output_shape, element) = shape::shape_of(ty);
        match self
            .catalog
            .lookup(element, ContainerShape::List, output_shape)
        {
            Some(decoder) => (decoder, output_shape),
            None => {
                diagnostics.push(self.no_decoder_diagnostic(declaration));
                (DecoderRef::Unresolved, output_shape)
            }
        }
    }

    /// Decoder resolution for single-valued sources (path, cookie): only
    /// `Option` is unwrapped; list and set containers are not supported
    /// for a single raw value.
    fn scalar_decoder(
        &self,
        declaration: &Declaration,
        explicit: &TypeRef,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> DecoderRef {
        let ty = declaration.ty();
        if !explicit.is_named(well_known::DEFAULT_DECODER) {
            return DecoderRef::Custom(explicit.clone());
        }

        let (output_shape, element) = match shape::optional_inner(ty) {
            Some(inner) => (ContainerShape::Optional, inner),
            None => (ContainerShape::None, ty),
        };
        match self
            .catalog
            .lookup(element, ContainerShape::None, output_shape)
        {
            Some(decoder) => decoder,
            None => {
                diagnostics.push(self.no_decoder_diagnostic(declaration));
                DecoderRef::Unresolved
            }
        }
    }

    fn no_decoder_diagnostic(&self, declaration: &Declaration) -> Diagnostic {
        Diagnostic::new(NO_DECODER_MESSAGE, declaration)
            .with_context("variable_type", declaration.ty().to_string())
            .with_context("supported_types", self.catalog.supported_types())
    }
}
