//! Resolved parameter bindings.
//!
//! A [`ParameterBinding`] is the resolver's output for one parameter: it
//! tells the code emitter where the value comes from at request time and
//! which decoder turns the raw wire value into the declared type. Bindings
//! are immutable once produced.

use std::fmt;

use crate::types::TypeRef;

/// Resolved logging sensitivity of a parameter value.
///
/// Derived from the `Safe`/`Unsafe` markers; `Unsafe` wins when both are
/// present, absence of either yields [`Unknown`](SafeLogging::Unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafeLogging {
    /// Explicitly marked safe to log.
    Safe,
    /// Explicitly marked unsafe to log.
    Unsafe,
    /// No marker present.
    Unknown,
}

impl SafeLogging {
    /// Folds the presence of the two markers into a sensitivity value.
    #[must_use]
    pub fn from_markers(safe: bool, unsafe_marker: bool) -> Self {
        if unsafe_marker {
            Self::Unsafe
        } else if safe {
            Self::Safe
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for SafeLogging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Unsafe => write!(f, "unsafe"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Container shape of a declared parameter type.
///
/// Exactly one level of wrapping is recognized; `Vec<Option<T>>` is a
/// `List` whose element type happens to be `Option<T>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerShape {
    /// Bare scalar.
    None,
    /// `Option<T>`.
    Optional,
    /// `Vec<T>`.
    List,
    /// `HashSet<T>` or `BTreeSet<T>`.
    Set,
}

impl fmt::Display for ContainerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Optional => write!(f, "optional"),
            Self::List => write!(f, "list"),
            Self::Set => write!(f, "set"),
        }
    }
}

/// Identity of the decoder selected for a parameter.
///
/// The resolver only *selects* decoders; it never constructs them. A
/// [`Custom`](DecoderRef::Custom) reference names a user-supplied decoder
/// type the emitter will instantiate. A [`Default`](DecoderRef::Default)
/// reference identifies a catalog entry by scalar type plus the shape of
/// the raw wire value and the shape the decoder must produce.
/// [`Unresolved`](DecoderRef::Unresolved) is the placeholder left behind by
/// a catalog miss so classification can keep collecting diagnostics; a run
/// containing one is never emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderRef {
    /// User-supplied decoder type, used verbatim.
    Custom(TypeRef),
    /// Catalog-provided default decoder.
    Default {
        /// Scalar element type name.
        scalar: String,
        /// Shape of the raw wire input (`None` = single value,
        /// `List` = multi-valued read).
        value_shape: ContainerShape,
        /// Container the decoder must produce for the declared type.
        output_shape: ContainerShape,
    },
    /// Placeholder after a catalog miss; unusable for emission.
    Unresolved,
}

impl fmt::Display for DecoderRef {
    /// Renders the conventional factory name for logs and generated code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(ty) => write!(f, "{ty}"),
            Self::Default {
                scalar,
                value_shape,
                output_shape,
            } => {
                if *output_shape == ContainerShape::Optional {
                    write!(f, "optional_")?;
                }
                write!(f, "{}", snake_case(scalar))?;
                match output_shape {
                    ContainerShape::List => write!(f, "_list")?,
                    ContainerShape::Set => write!(f, "_set")?,
                    ContainerShape::None | ContainerShape::Optional => {}
                }
                if *value_shape == ContainerShape::List {
                    write!(f, "_collection")?;
                }
                write!(f, "_decoder")
            }
            Self::Unresolved => write!(f, "<unresolved>"),
        }
    }
}

/// Lowercases a type name, inserting underscores at case boundaries.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Synthesizes the variable name the emitter uses for a parameter's decoder.
#[must_use]
pub fn decoder_var_name(parameter: &str) -> String {
    format!("{parameter}_decoder")
}

/// How one parameter is populated at request-handling time.
///
/// Every variant carries the parameter name; variants that decode a wire
/// value also carry the decoder reference and the synthesized decoder
/// variable name for code wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterBinding {
    /// Decoded from the request body.
    Body {
        /// Parameter name.
        name: String,
        /// Decoder reference (always explicit for bodies).
        decoder: DecoderRef,
        /// Synthesized decoder variable name.
        decoder_var: String,
        /// Logging sensitivity.
        safety: SafeLogging,
    },
    /// Decoded from a request header.
    Header {
        /// Parameter name.
        name: String,
        /// Header name on the wire.
        wire_name: String,
        /// Decoder reference.
        decoder: DecoderRef,
        /// Synthesized decoder variable name.
        decoder_var: String,
        /// Container shape of the declared type.
        shape: ContainerShape,
        /// Logging sensitivity.
        safety: SafeLogging,
    },
    /// Decoded from a single path segment.
    Path {
        /// Parameter name (also the route-template key).
        name: String,
        /// Decoder reference.
        decoder: DecoderRef,
        /// Synthesized decoder variable name.
        decoder_var: String,
        /// Logging sensitivity.
        safety: SafeLogging,
    },
    /// Decoded from a run of path segments.
    PathMulti {
        /// Parameter name (also the route-template key).
        name: String,
        /// Decoder reference.
        decoder: DecoderRef,
        /// Synthesized decoder variable name.
        decoder_var: String,
        /// Container shape of the declared type.
        shape: ContainerShape,
        /// Logging sensitivity.
        safety: SafeLogging,
    },
    /// Decoded from a query-string key.
    Query {
        /// Parameter name.
        name: String,
        /// Query key on the wire.
        wire_name: String,
        /// Decoder reference.
        decoder: DecoderRef,
        /// Synthesized decoder variable name.
        decoder_var: String,
        /// Container shape of the declared type.
        shape: ContainerShape,
        /// Logging sensitivity.
        safety: SafeLogging,
    },
    /// Decoded from a cookie value.
    Cookie {
        /// Parameter name.
        name: String,
        /// Cookie name on the wire.
        wire_name: String,
        /// Decoder reference.
        decoder: DecoderRef,
        /// Synthesized decoder variable name.
        decoder_var: String,
        /// Logging sensitivity.
        safety: SafeLogging,
    },
    /// Bearer token read from a cookie; sensitivity fixed by its nature.
    AuthCookie {
        /// Parameter name.
        name: String,
        /// Cookie name on the wire.
        wire_name: String,
        /// Synthesized decoder variable name.
        decoder_var: String,
    },
    /// The authentication-header carrier, populated by the runtime.
    AuthHeader {
        /// Parameter name.
        name: String,
    },
    /// The request-context handle, populated by the runtime.
    RequestContext {
        /// Parameter name.
        name: String,
    },
    /// The low-level exchange handle, populated by the runtime.
    Exchange {
        /// Parameter name.
        name: String,
    },
}

impl ParameterBinding {
    /// The bound parameter's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Body { name, .. }
            | Self::Header { name, .. }
            | Self::Path { name, .. }
            | Self::PathMulti { name, .. }
            | Self::Query { name, .. }
            | Self::Cookie { name, .. }
            | Self::AuthCookie { name, .. }
            | Self::AuthHeader { name }
            | Self::RequestContext { name }
            | Self::Exchange { name } => name,
        }
    }

    /// The synthesized decoder variable name, for variants that decode.
    #[must_use]
    pub fn decoder_var(&self) -> Option<&str> {
        match self {
            Self::Body { decoder_var, .. }
            | Self::Header { decoder_var, .. }
            | Self::Path { decoder_var, .. }
            | Self::PathMulti { decoder_var, .. }
            | Self::Query { decoder_var, .. }
            | Self::Cookie { decoder_var, .. }
            | Self::AuthCookie { decoder_var, .. } => Some(decoder_var),
            Self::AuthHeader { .. } | Self::RequestContext { .. } | Self::Exchange { .. } => None,
        }
    }

    /// The selected decoder reference, for variants that decode a value.
    #[must_use]
    pub fn decoder(&self) -> Option<&DecoderRef> {
        match self {
            Self::Body { decoder, .. }
            | Self::Header { decoder, .. }
            | Self::Path { decoder, .. }
            | Self::PathMulti { decoder, .. }
            | Self::Query { decoder, .. }
            | Self::Cookie { decoder, .. } => Some(decoder),
            Self::AuthCookie { .. }
            | Self::AuthHeader { .. }
            | Self::RequestContext { .. }
            | Self::Exchange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_marker_takes_precedence() {
        assert_eq!(SafeLogging::from_markers(true, true), SafeLogging::Unsafe);
        assert_eq!(SafeLogging::from_markers(true, false), SafeLogging::Safe);
        assert_eq!(SafeLogging::from_markers(false, false), SafeLogging::Unknown);
    }

    #[test]
    fn default_decoder_factory_names() {
        let scalar = DecoderRef::Default {
            scalar: "i64".to_string(),
            value_shape: ContainerShape::None,
            output_shape: ContainerShape::None,
        };
        assert_eq!(scalar.to_string(), "i64_decoder");

        let optional = DecoderRef::Default {
            scalar: "String".to_string(),
            value_shape: ContainerShape::None,
            output_shape: ContainerShape::Optional,
        };
        assert_eq!(optional.to_string(), "optional_string_decoder");

        let list = DecoderRef::Default {
            scalar: "i64".to_string(),
            value_shape: ContainerShape::List,
            output_shape: ContainerShape::List,
        };
        assert_eq!(list.to_string(), "i64_list_collection_decoder");

        let set = DecoderRef::Default {
            scalar: "BearerToken".to_string(),
            value_shape: ContainerShape::List,
            output_shape: ContainerShape::Set,
        };
        assert_eq!(set.to_string(), "bearer_token_set_collection_decoder");
    }

    #[test]
    fn custom_decoder_displays_type() {
        let decoder = DecoderRef::Custom(TypeRef::named("MyDecoder"));
        assert_eq!(decoder.to_string(), "MyDecoder");
    }

    #[test]
    fn decoder_var_name_is_stable() {
        assert_eq!(decoder_var_name("user_id"), "user_id_decoder");
    }

    #[test]
    fn binding_accessors() {
        let binding = ParameterBinding::AuthHeader {
            name: "auth".to_string(),
        };
        assert_eq!(binding.name(), "auth");
        assert_eq!(binding.decoder_var(), None);
        assert_eq!(binding.decoder(), None);
    }
}
