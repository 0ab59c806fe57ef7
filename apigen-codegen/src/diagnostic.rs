//! Findings reported by lints and by the generator.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    /// The design cannot be generated.
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        *self == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        *self == Severity::Warning
    }

    fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A finding about the design, tagged with the lint or step that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Lint name, or the generator step.
    pub phase: String,
    pub message: String,
    /// Dotted design path or output file, e.g. `resources.bottle.actions.show`.
    pub location: Option<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, phase, message)
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Info, phase, message)
    }

    pub fn at(self, location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..self
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        match &self.location {
            Some(location) => write!(f, " (at {})", location),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructor() {
        let diag = Diagnostic::error("media_types", "media type 'Bottle' has no view 'full'");
        assert!(diag.severity.is_error());
        assert!(!diag.severity.is_warning());
        assert_eq!(diag.phase, "media_types");
        assert_eq!(diag.to_string(), "error: media type 'Bottle' has no view 'full'");
    }

    #[test]
    fn test_display_with_location() {
        let diag = Diagnostic::warning("unmounted-action", "action 'show' has no route")
            .at("resources.bottle.actions.show");
        assert_eq!(
            diag.to_string(),
            "warning: action 'show' has no route (at resources.bottle.actions.show)"
        );
    }

    #[test]
    fn test_severity_ordering() {
        let mut severities = vec![Severity::Info, Severity::Error, Severity::Warning];
        severities.sort();
        assert_eq!(severities, vec![Severity::Error, Severity::Warning, Severity::Info]);
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
