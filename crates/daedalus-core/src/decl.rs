//! Parameter declarations and their attached metadata.
//!
//! A [`Declaration`] is one method parameter as seen by the resolver:
//! its name, its declared [`TypeRef`], and the metadata entries a frontend
//! recognized on it. Entries are kept in declaration order.

use std::fmt;

use crate::types::TypeRef;

/// One normalized metadata entry attached to a parameter.
///
/// Kinds [`Safe`](MetadataEntry::Safe) and [`Unsafe`](MetadataEntry::Unsafe)
/// are logging-sensitivity markers; all other kinds are request-source
/// markers. Decoder payloads always carry a concrete [`TypeRef`]; frontends
/// substitute the well-known sentinels when the user named no decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataEntry {
    /// Value is safe to include in logs.
    Safe,
    /// Value must be redacted from logs.
    Unsafe,
    /// Value is the request body, decoded by the named decoder.
    Body {
        /// Decoder type reference; never a "use default" sentinel.
        decoder: TypeRef,
    },
    /// Value is a single path segment.
    PathParam {
        /// Decoder type reference, possibly the default sentinel.
        decoder: TypeRef,
    },
    /// Value is a run of path segments collected into a container.
    PathMultiParam {
        /// Decoder type reference, possibly the default sentinel.
        decoder: TypeRef,
    },
    /// Value comes from a query-string key.
    QueryParam {
        /// The query-string key.
        name: String,
        /// Decoder type reference, possibly the default sentinel.
        decoder: TypeRef,
    },
    /// Value comes from a request header.
    Header {
        /// The header name.
        name: String,
        /// Decoder type reference, possibly the default sentinel.
        decoder: TypeRef,
    },
    /// Value comes from a cookie.
    Cookie {
        /// The cookie name.
        name: String,
        /// Decoder type reference, possibly the default sentinel.
        decoder: TypeRef,
    },
}

/// Discriminant of a [`MetadataEntry`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    /// `Safe` logging marker.
    Safe,
    /// `Unsafe` logging marker.
    Unsafe,
    /// Request body source.
    Body,
    /// Single path segment source.
    PathParam,
    /// Multi-segment path source.
    PathMultiParam,
    /// Query-string source.
    QueryParam,
    /// Header source.
    Header,
    /// Cookie source.
    Cookie,
}

impl MetadataKind {
    /// The source-marker kinds, in the order cited by diagnostics.
    pub const SOURCE_KINDS: [MetadataKind; 6] = [
        MetadataKind::Body,
        MetadataKind::PathParam,
        MetadataKind::PathMultiParam,
        MetadataKind::QueryParam,
        MetadataKind::Header,
        MetadataKind::Cookie,
    ];
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Safe => "safe",
            Self::Unsafe => "unsafe",
            Self::Body => "body",
            Self::PathParam => "path_param",
            Self::PathMultiParam => "path_multi",
            Self::QueryParam => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
        };
        write!(f, "{name}")
    }
}

/// A borrowed view of a source marker, produced by
/// [`MetadataEntry::as_source`].
///
/// Matching on this enum is exhaustive over the source kinds only, so the
/// classifier's dispatch needs no unreachable fallback arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMarker<'a> {
    /// Request body.
    Body {
        /// Decoder type reference.
        decoder: &'a TypeRef,
    },
    /// Single path segment.
    PathParam {
        /// Decoder type reference.
        decoder: &'a TypeRef,
    },
    /// Multi-segment path.
    PathMultiParam {
        /// Decoder type reference.
        decoder: &'a TypeRef,
    },
    /// Query-string key.
    QueryParam {
        /// Wire name.
        name: &'a str,
        /// Decoder type reference.
        decoder: &'a TypeRef,
    },
    /// Request header.
    Header {
        /// Wire name.
        name: &'a str,
        /// Decoder type reference.
        decoder: &'a TypeRef,
    },
    /// Cookie.
    Cookie {
        /// Wire name.
        name: &'a str,
        /// Decoder type reference.
        decoder: &'a TypeRef,
    },
}

impl SourceMarker<'_> {
    /// Returns the kind discriminant for diagnostics.
    #[must_use]
    pub fn kind(&self) -> MetadataKind {
        match self {
            Self::Body { .. } => MetadataKind::Body,
            Self::PathParam { .. } => MetadataKind::PathParam,
            Self::PathMultiParam { .. } => MetadataKind::PathMultiParam,
            Self::QueryParam { .. } => MetadataKind::QueryParam,
            Self::Header { .. } => MetadataKind::Header,
            Self::Cookie { .. } => MetadataKind::Cookie,
        }
    }
}

impl MetadataEntry {
    /// Returns the kind discriminant of this entry.
    #[must_use]
    pub fn kind(&self) -> MetadataKind {
        match self {
            Self::Safe => MetadataKind::Safe,
            Self::Unsafe => MetadataKind::Unsafe,
            Self::Body { .. } => MetadataKind::Body,
            Self::PathParam { .. } => MetadataKind::PathParam,
            Self::PathMultiParam { .. } => MetadataKind::PathMultiParam,
            Self::QueryParam { .. } => MetadataKind::QueryParam,
            Self::Header { .. } => MetadataKind::Header,
            Self::Cookie { .. } => MetadataKind::Cookie,
        }
    }

    /// Returns true for the `Safe` and `Unsafe` logging markers.
    #[must_use]
    pub fn is_logging_marker(&self) -> bool {
        matches!(self, Self::Safe | Self::Unsafe)
    }

    /// Returns a source-marker view, or `None` for logging markers.
    #[must_use]
    pub fn as_source(&self) -> Option<SourceMarker<'_>> {
        match self {
            Self::Safe | Self::Unsafe => None,
            Self::Body { decoder } => Some(SourceMarker::Body { decoder }),
            Self::PathParam { decoder } => Some(SourceMarker::PathParam { decoder }),
            Self::PathMultiParam { decoder } => Some(SourceMarker::PathMultiParam { decoder }),
            Self::QueryParam { name, decoder } => Some(SourceMarker::QueryParam { name, decoder }),
            Self::Header { name, decoder } => Some(SourceMarker::Header { name, decoder }),
            Self::Cookie { name, decoder } => Some(SourceMarker::Cookie { name, decoder }),
        }
    }
}

/// One method parameter to classify: name, declared type, metadata.
///
/// Declarations are produced once by a frontend and borrowed by the
/// resolver for the duration of a classification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    ty: TypeRef,
    metadata: Vec<MetadataEntry>,
}

impl Declaration {
    /// Creates a declaration from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef, metadata: Vec<MetadataEntry>) -> Self {
        Self {
            name: name.into(),
            ty,
            metadata,
        }
    }

    /// The parameter name as written in the handler signature.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    #[must_use]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// All recognized metadata entries, in declaration order.
    #[must_use]
    pub fn metadata(&self) -> &[MetadataEntry] {
        &self.metadata
    }

    /// Iterates the source markers in declaration order.
    pub fn source_markers(&self) -> impl Iterator<Item = SourceMarker<'_>> {
        self.metadata.iter().filter_map(MetadataEntry::as_source)
    }

    /// Returns true if a `Safe` logging marker is present.
    #[must_use]
    pub fn has_safe_marker(&self) -> bool {
        self.metadata.iter().any(|m| matches!(m, MetadataEntry::Safe))
    }

    /// Returns true if an `Unsafe` logging marker is present.
    #[must_use]
    pub fn has_unsafe_marker(&self) -> bool {
        self.metadata.iter().any(|m| matches!(m, MetadataEntry::Unsafe))
    }
}
