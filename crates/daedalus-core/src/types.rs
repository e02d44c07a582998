//! Nominal type references.
//!
//! The resolver never sees real language types; it works over [`TypeRef`],
//! a small nominal representation carrying a type name and its generic
//! arguments. Frontends (such as `daedalus-syn`) are responsible for
//! producing these from whatever AST they consume.

use std::fmt;

/// A nominal reference to a declared type.
///
/// Equality is structural: two references are the same type when their
/// names and generic arguments match.
///
/// # Example
///
/// ```rust
/// use daedalus_core::TypeRef;
///
/// let ty = TypeRef::generic("Vec", vec![TypeRef::named("i64")]);
/// assert_eq!(ty.to_string(), "Vec<i64>");
/// assert_eq!(ty.generic_inner("Vec"), Some(&TypeRef::named("i64")));
/// assert_eq!(ty.generic_inner("Option"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    name: String,
    args: Vec<TypeRef>,
}

impl TypeRef {
    /// Creates a reference to a plain (non-generic) named type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Creates a reference to a generic type instantiation.
    #[must_use]
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Returns the type name without generic arguments.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the generic arguments, empty for plain types.
    #[must_use]
    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    /// Returns true if this is the plain named type `name` (no generics).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name && self.args.is_empty()
    }

    /// Returns the single generic argument if this type is `container<T>`.
    ///
    /// Containers with zero or more than one argument never match; only
    /// one level is inspected, nested wrappers are returned opaquely.
    #[must_use]
    pub fn generic_inner(&self, container: &str) -> Option<&TypeRef> {
        if self.name == container && self.args.len() == 1 {
            self.args.first()
        } else {
            None
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Names of types the resolver treats specially.
///
/// These are matched nominally: a frontend that maps its AST into the
/// declaration model must normalize qualified paths down to these names.
pub mod well_known {
    use super::TypeRef;

    /// The authentication-header carrier type.
    pub const AUTH_HEADER: &str = "AuthHeader";
    /// The bearer-token carrier type (auth cookies).
    pub const BEARER_TOKEN: &str = "BearerToken";
    /// The request-context handle exposed to handlers.
    pub const REQUEST_CONTEXT: &str = "RequestContext";
    /// The low-level server exchange handle.
    pub const SERVER_EXCHANGE: &str = "ServerExchange";
    /// Sentinel decoder meaning "use the default decoder for this type".
    pub const DEFAULT_DECODER: &str = "DefaultDecoder";
    /// Default body decoder filled in when a body marker names none.
    pub const JSON_BODY_DECODER: &str = "JsonBodyDecoder";

    /// Optional container name.
    pub const OPTION: &str = "Option";
    /// List container name.
    pub const VEC: &str = "Vec";
    /// Unordered set container name.
    pub const HASH_SET: &str = "HashSet";
    /// Ordered set container name.
    pub const BTREE_SET: &str = "BTreeSet";

    /// Returns the "use default" decoder sentinel.
    #[must_use]
    pub fn default_decoder() -> TypeRef {
        TypeRef::named(DEFAULT_DECODER)
    }

    /// Returns the default body decoder reference.
    #[must_use]
    pub fn json_body_decoder() -> TypeRef {
        TypeRef::named(JSON_BODY_DECODER)
    }
}
