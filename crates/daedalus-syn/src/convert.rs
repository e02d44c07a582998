//! Conversion from `syn` types to nominal type references.

use daedalus_core::TypeRef;
use syn::{GenericArgument, PathArguments, Type};

/// Converts a `syn::Type` into a [`TypeRef`].
///
/// Only path types are representable; qualified paths are normalized to
/// their last segment, which is how the resolver matches well-known and
/// container types. Returns `None` for references, tuples, trait objects,
/// and other shapes the declaration model cannot carry.
pub(crate) fn type_ref(ty: &Type) -> Option<TypeRef> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    let name = segment.ident.to_string();
    match &segment.arguments {
        PathArguments::None => Some(TypeRef::named(name)),
        PathArguments::AngleBracketed(bracketed) => {
            let mut args = Vec::with_capacity(bracketed.args.len());
            for arg in &bracketed.args {
                match arg {
                    GenericArgument::Type(inner) => args.push(type_ref(inner)?),
                    // Lifetimes, const generics, bindings: not representable.
                    _ => return None,
                }
            }
            Some(TypeRef::generic(name, args))
        }
        PathArguments::Parenthesized(_) => None,
    }
}

/// Converts an expression path (a decoder value in an attribute) into a
/// plain named [`TypeRef`].
pub(crate) fn path_type_ref(path: &syn::Path) -> Option<TypeRef> {
    let segment = path.segments.last()?;
    if !segment.arguments.is_none() {
        return None;
    }
    Some(TypeRef::named(segment.ident.to_string()))
}
