//! Structured diagnostics.
//!
//! Expected misuse of parameter metadata is never an `Err` or a panic: it
//! is reported as [`Diagnostic`] values so a single generation run can
//! surface every problem at once. A [`DiagnosticReport`] aggregates them
//! in declaration order; any non-empty report fails the generation step.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::decl::Declaration;

/// One error produced while classifying a parameter.
///
/// Carries a human-readable message, the offending parameter, its declared
/// type rendered as text, and ordered key/value context pairs. Diagnostics
/// serialize to JSON for machine-readable build output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    message: String,
    parameter: String,
    declared_type: String,
    context: IndexMap<String, String>,
}

impl Diagnostic {
    /// Creates a diagnostic for the given declaration.
    #[must_use]
    pub fn new(message: impl Into<String>, declaration: &Declaration) -> Self {
        Self {
            message: message.into(),
            parameter: declaration.name().to_string(),
            declared_type: declaration.ty().to_string(),
            context: IndexMap::new(),
        }
    }

    /// Attaches a named context value.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offending parameter's name.
    #[must_use]
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// The declared type, rendered as text.
    #[must_use]
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Looks up a context value by key.
    #[must_use]
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (parameter: {}, type: {}",
            self.message, self.parameter, self.declared_type
        )?;
        for (key, value) in &self.context {
            write!(f, ", {key}: {value}")?;
        }
        write!(f, ")")
    }
}

/// All diagnostics of one generation run, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Appends all diagnostics from an iterator.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Returns true when any diagnostic was recorded.
    ///
    /// A run with diagnostics is a failed generation, not a partial
    /// success; callers must not emit code from it.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Number of diagnostics recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true when no diagnostic was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterates the diagnostics in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "error: {diagnostic}")?;
        }
        Ok(())
    }
}
