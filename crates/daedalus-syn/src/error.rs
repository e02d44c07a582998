//! Frontend error types.

use thiserror::Error;

/// Errors raised while building declarations from a handler function.
///
/// These mean the declaration model could not be populated at all, unlike
/// resolver diagnostics, which describe well-formed declarations with
/// illegal metadata.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// The token stream was not a parseable function item.
    #[error("failed to parse handler function: {0}")]
    Parse(#[from] syn::Error),

    /// Handlers are free functions; methods with receivers are rejected.
    #[error("handlers cannot have a self parameter")]
    SelfParameter,

    /// Only plain identifier patterns are accepted for parameters.
    #[error("unsupported parameter pattern; expected a plain identifier")]
    UnsupportedPattern,

    /// The parameter type cannot be represented as a nominal reference.
    #[error("unsupported type `{type_text}` for parameter `{parameter}`")]
    UnsupportedType {
        /// The parameter name.
        parameter: String,
        /// The offending type, rendered as text.
        type_text: String,
    },

    /// A recognized attribute had an invalid argument list.
    #[error("malformed `{attribute}` attribute on parameter `{parameter}`: {message}")]
    MalformedAttribute {
        /// The attribute name.
        attribute: String,
        /// The parameter name.
        parameter: String,
        /// What was wrong with the arguments.
        message: String,
    },
}
