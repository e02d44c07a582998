//! Container-shape inference.
//!
//! Exactly one level of wrapping is recognized, in priority order
//! `Vec` > `HashSet`/`BTreeSet` > `Option`. Nested wrappers are not
//! unwrapped further; the inner type flows through opaquely to decoder
//! lookup. Single-level inspection is a deliberate policy, not a gap.

use daedalus_core::{well_known, ContainerShape, TypeRef};

/// Determines the container shape of a declared type and its element type.
///
/// Returns `(ContainerShape::None, ty)` for anything that is not one of
/// the recognized single-argument containers.
///
/// # Example
///
/// ```rust
/// use daedalus_core::{ContainerShape, TypeRef};
/// use daedalus_resolver::shape_of;
///
/// let ty = TypeRef::generic("Vec", vec![TypeRef::named("i64")]);
/// let (shape, element) = shape_of(&ty);
/// assert_eq!(shape, ContainerShape::List);
/// assert_eq!(element, &TypeRef::named("i64"));
/// ```
#[must_use]
pub fn shape_of(ty: &TypeRef) -> (ContainerShape, &TypeRef) {
    if let Some(inner) = list_inner(ty) {
        (ContainerShape::List, inner)
    } else if let Some(inner) = set_inner(ty) {
        (ContainerShape::Set, inner)
    } else if let Some(inner) = optional_inner(ty) {
        (ContainerShape::Optional, inner)
    } else {
        (ContainerShape::None, ty)
    }
}

/// The element type of `Vec<T>`, if the declared type is one.
#[must_use]
pub fn list_inner(ty: &TypeRef) -> Option<&TypeRef> {
    ty.generic_inner(well_known::VEC)
}

/// The element type of `HashSet<T>` or `BTreeSet<T>`, if the declared
/// type is one.
#[must_use]
pub fn set_inner(ty: &TypeRef) -> Option<&TypeRef> {
    ty.generic_inner(well_known::HASH_SET)
        .or_else(|| ty.generic_inner(well_known::BTREE_SET))
}

/// The element type of `Option<T>`, if the declared type is one.
#[must_use]
pub fn optional_inner(ty: &TypeRef) -> Option<&TypeRef> {
    ty.generic_inner(well_known::OPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_scalar_has_no_shape() {
        let ty = TypeRef::named("String");
        let (shape, element) = shape_of(&ty);
        assert_eq!(shape, ContainerShape::None);
        assert_eq!(element, &ty);
    }

    #[test]
    fn recognizes_each_container() {
        let cases = [
            ("Option", ContainerShape::Optional),
            ("Vec", ContainerShape::List),
            ("HashSet", ContainerShape::Set),
            ("BTreeSet", ContainerShape::Set),
        ];
        for (container, expected) in cases {
            let ty = TypeRef::generic(container, vec![TypeRef::named("i64")]);
            let (shape, element) = shape_of(&ty);
            assert_eq!(shape, expected, "container {container}");
            assert_eq!(element, &TypeRef::named("i64"));
        }
    }

    #[test]
    fn nested_wrapping_is_single_level() {
        let ty = TypeRef::generic(
            "Vec",
            vec![TypeRef::generic("Option", vec![TypeRef::named("i64")])],
        );
        let (shape, element) = shape_of(&ty);
        assert_eq!(shape, ContainerShape::List);
        // The inner wrapper is passed through opaquely.
        assert_eq!(
            element,
            &TypeRef::generic("Option", vec![TypeRef::named("i64")])
        );
    }

    #[test]
    fn unknown_generic_is_treated_as_scalar() {
        let ty = TypeRef::generic("Wrapper", vec![TypeRef::named("i64")]);
        let (shape, element) = shape_of(&ty);
        assert_eq!(shape, ContainerShape::None);
        assert_eq!(element, &ty);
    }
}
