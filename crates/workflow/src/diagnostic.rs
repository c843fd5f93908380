//! Validation findings and the report that aggregates them.

use serde::Serialize;

/// Severity level for a diagnostic.
///
/// Dry-run only ever reports errors; anything softer (unused events, hats
/// without triggers, unknown model names) is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
        }
    }
}

/// Kind of finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// A hat triggers on or publishes an event missing from `events`.
    UndeclaredEvent,
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndeclaredEvent => write!(f, "undeclared-event"),
        }
    }
}

/// How a hat refers to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Usage {
    Trigger,
    Publish,
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trigger => write!(f, "trigger"),
            Self::Publish => write!(f, "publish"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    /// Hat id the finding is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hat: Option<String>,
    /// Event name the finding is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// One-line human-readable rendering.
    pub message: String,
    /// Closest declared name, when one is near enough to be a likely typo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn undeclared_event(
        hat: &str,
        event: &str,
        usage: Usage,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            code: DiagnosticCode::UndeclaredEvent,
            hat: Some(hat.to_string()),
            event: Some(event.to_string()),
            usage: Some(usage),
            message: format!("{hat}: undeclared event \"{event}\" (used as {usage})"),
            suggestion,
        }
    }

    /// Stable ordering key: hat id, then event name, then usage.
    fn sort_key(&self) -> (Option<&str>, Option<&str>, Option<Usage>) {
        (self.hat.as_deref(), self.event.as_deref(), self.usage)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every diagnostic found in one validation run, in stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Build a report, sorting by `(hat, event, usage)` so output does not
    /// depend on map iteration order.
    pub fn new(mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Self { diagnostics }
    }

    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, d) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}
