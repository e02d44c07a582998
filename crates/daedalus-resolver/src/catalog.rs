//! The default decoder catalog.
//!
//! A static registry of the scalar types the runtime ships default
//! decoders for. The catalog is read-only after construction and may be
//! shared freely across classifications; extending it means recompiling
//! the generator, never runtime registration.

use daedalus_core::{ContainerShape, DecoderRef, TypeRef};

/// Scalar type names with default decoders, in the order cited by
/// diagnostics.
pub const SUPPORTED_SCALARS: [&str; 13] = [
    "String", "bool", "i32", "i64", "u32", "u64", "f32", "f64", "Uuid", "DateTime", "BearerToken",
    "SafeLong", "Rid",
];

/// Registry mapping `(scalar type, wire shape, output shape)` to a default
/// decoder reference.
///
/// Absence of an entry is not an error at this layer; the classifier
/// surfaces misses as diagnostics naming the unsupported type and the
/// supported set.
#[derive(Debug, Clone)]
pub struct DecoderCatalog {
    scalars: Vec<String>,
}

impl DecoderCatalog {
    /// Creates the standard catalog covering [`SUPPORTED_SCALARS`].
    #[must_use]
    pub fn standard() -> Self {
        Self {
            scalars: SUPPORTED_SCALARS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Creates a catalog over an explicit scalar set. Intended for tests
    /// and for embedders that compile in a different runtime.
    #[must_use]
    pub fn with_scalars(scalars: impl IntoIterator<Item = String>) -> Self {
        Self {
            scalars: scalars.into_iter().collect(),
        }
    }

    /// Returns true when a default decoder is registered for `scalar`.
    #[must_use]
    pub fn supports(&self, scalar: &str) -> bool {
        self.scalars.iter().any(|s| s == scalar)
    }

    /// The supported scalar names joined for diagnostic context.
    #[must_use]
    pub fn supported_types(&self) -> String {
        self.scalars.join(", ")
    }

    /// Looks up the default decoder for an element type.
    ///
    /// `value_shape` describes how the raw wire value arrives:
    /// [`ContainerShape::None`] for single-valued sources (path, cookie)
    /// and [`ContainerShape::List`] for multi-valued sources (header,
    /// query, path-multi). `output_shape` is the container the decoder
    /// must produce for the declared type. Generic element types never
    /// have default decoders.
    #[must_use]
    pub fn lookup(
        &self,
        element: &TypeRef,
        value_shape: ContainerShape,
        output_shape: ContainerShape,
    ) -> Option<DecoderRef> {
        if !element.args().is_empty() || !self.supports(element.name()) {
            return None;
        }
        Some(DecoderRef::Default {
            scalar: element.name().to_string(),
            value_shape,
            output_shape,
        })
    }
}

impl Default for DecoderCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_covers_known_scalars() {
        let catalog = DecoderCatalog::standard();
        assert!(catalog.supports("i64"));
        assert!(catalog.supports("BearerToken"));
        assert!(!catalog.supports("Widget"));
    }

    #[test]
    fn lookup_hit_carries_shapes() {
        let catalog = DecoderCatalog::standard();
        let decoder = catalog
            .lookup(
                &TypeRef::named("i64"),
                ContainerShape::List,
                ContainerShape::Set,
            )
            .expect("registered scalar");
        assert_eq!(
            decoder,
            DecoderRef::Default {
                scalar: "i64".to_string(),
                value_shape: ContainerShape::List,
                output_shape: ContainerShape::Set,
            }
        );
    }

    #[test]
    fn lookup_miss_for_unregistered_type() {
        let catalog = DecoderCatalog::standard();
        assert_eq!(
            catalog.lookup(
                &TypeRef::named("Widget"),
                ContainerShape::None,
                ContainerShape::None
            ),
            None
        );
    }

    #[test]
    fn lookup_miss_for_generic_element() {
        // A nested wrapper is passed through opaquely and misses here.
        let catalog = DecoderCatalog::standard();
        let element = TypeRef::generic("Option", vec![TypeRef::named("i64")]);
        assert_eq!(
            catalog.lookup(&element, ContainerShape::List, ContainerShape::List),
            None
        );
    }

    #[test]
    fn custom_scalar_set() {
        let catalog = DecoderCatalog::with_scalars(vec!["WidgetId".to_string()]);
        assert!(catalog.supports("WidgetId"));
        assert!(!catalog.supports("String"));
        assert_eq!(catalog.supported_types(), "WidgetId");
    }
}
