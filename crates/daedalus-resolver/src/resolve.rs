//! Method-level aggregation.
//!
//! Parameters are classified independently; this module folds the
//! per-parameter results of one endpoint method into a single value the
//! emitter consumes, preserving declaration order so output is stable
//! across runs.

use tracing::debug;

use daedalus_core::{Declaration, DiagnosticReport, ParameterBinding};

use crate::classify::Resolver;

/// The resolved bindings of one endpoint method.
///
/// Bindings appear in declaration order and only for parameters that
/// produced one. The report gates emission: a method whose report
/// [`is_failure`](DiagnosticReport::is_failure) must not be emitted even
/// though some bindings resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    method: String,
    bindings: Vec<ParameterBinding>,
    report: DiagnosticReport,
}

impl ResolvedMethod {
    /// The endpoint method name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The resolved bindings, in declaration order.
    #[must_use]
    pub fn bindings(&self) -> &[ParameterBinding] {
        &self.bindings
    }

    /// All diagnostics collected for this method.
    #[must_use]
    pub fn report(&self) -> &DiagnosticReport {
        &self.report
    }

    /// Returns true when every parameter resolved without diagnostics.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.report.is_failure()
    }

    /// Consumes the resolution, yielding the bindings on success or the
    /// report on failure.
    pub fn into_bindings(self) -> Result<Vec<ParameterBinding>, DiagnosticReport> {
        if self.report.is_failure() {
            Err(self.report)
        } else {
            Ok(self.bindings)
        }
    }
}

impl Resolver {
    /// Classifies every parameter of one endpoint method.
    ///
    /// One parameter's failure never prevents classification of its
    /// siblings; all diagnostics surface in a single pass.
    pub fn resolve_method(&self, method: &str, parameters: &[Declaration]) -> ResolvedMethod {
        let mut bindings = Vec::with_capacity(parameters.len());
        let mut report = DiagnosticReport::new();

        for declaration in parameters {
            let classification = self.classify(declaration);
            report.extend(classification.diagnostics);
            if let Some(binding) = classification.binding {
                bindings.push(binding);
            }
        }

        debug!(
            method,
            bindings = bindings.len(),
            diagnostics = report.len(),
            "resolved endpoint method"
        );
        ResolvedMethod {
            method: method.to_string(),
            bindings,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daedalus_core::{well_known, MetadataEntry, TypeRef};

    fn param(name: &str, ty: TypeRef, metadata: Vec<MetadataEntry>) -> Declaration {
        Declaration::new(name, ty, metadata)
    }

    #[test]
    fn collects_all_sibling_diagnostics_in_one_pass() {
        let resolver = Resolver::standard();
        let parameters = vec![
            // Fine.
            param("ctx", TypeRef::named("RequestContext"), vec![]),
            // No annotation, not a handle type.
            param("name", TypeRef::named("String"), vec![]),
            // Catalog miss.
            param(
                "widget",
                TypeRef::named("Widget"),
                vec![MetadataEntry::QueryParam {
                    name: "widget".to_string(),
                    decoder: well_known::default_decoder(),
                }],
            ),
        ];

        let resolved = resolver.resolve_method("get_widget", &parameters);
        assert!(!resolved.is_success());
        assert_eq!(resolved.report().len(), 2);
        // The context handle and the placeholder-bearing query both bound.
        assert_eq!(resolved.bindings().len(), 2);
        assert_eq!(resolved.bindings()[0].name(), "ctx");
        assert_eq!(resolved.bindings()[1].name(), "widget");
    }

    #[test]
    fn successful_method_yields_ordered_bindings() {
        let resolver = Resolver::standard();
        let parameters = vec![
            param(
                "user_id",
                TypeRef::named("i64"),
                vec![MetadataEntry::PathParam {
                    decoder: well_known::default_decoder(),
                }],
            ),
            param(
                "limit",
                TypeRef::generic("Option", vec![TypeRef::named("u32")]),
                vec![MetadataEntry::QueryParam {
                    name: "limit".to_string(),
                    decoder: well_known::default_decoder(),
                }],
            ),
        ];

        let resolved = resolver.resolve_method("list_items", &parameters);
        assert!(resolved.is_success());
        let bindings = resolved.into_bindings().expect("success");
        let names: Vec<_> = bindings.iter().map(ParameterBinding::name).collect();
        assert_eq!(names, vec!["user_id", "limit"]);
    }

    #[test]
    fn into_bindings_returns_report_on_failure() {
        let resolver = Resolver::standard();
        let parameters = vec![param("name", TypeRef::named("String"), vec![])];
        let resolved = resolver.resolve_method("broken", &parameters);
        let report = resolved.into_bindings().expect_err("failure");
        assert_eq!(report.len(), 1);
    }
}
