//! Check command report data structures.

use std::path::PathBuf;

use apigen_codegen::Diagnostic;
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from design validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the design file.
    pub design_path: PathBuf,
    /// Lint findings, in lint order.
    pub diagnostics: Vec<Diagnostic>,
    /// What the design declares.
    pub summary: DesignSummary,
}

/// Counts of what a design declares.
#[derive(Debug, Default, Serialize)]
pub struct DesignSummary {
    pub name: String,
    pub title: Option<String>,
    pub resources: usize,
    pub actions: usize,
    pub media_types: usize,
    pub user_types: usize,
    /// Names of the non-default versions.
    pub versions: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            out.warning(&diagnostic.to_string());
        }
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }
        out.preformatted(&format!("✓ {} is valid", self.design_path.display()));
        out.newline();

        let summary = &self.summary;
        match &summary.title {
            Some(title) => out.preformatted(&format!("  {} ({})", summary.name, title)),
            None => out.preformatted(&format!("  {}", summary.name)),
        }
        out.list_item(&format!(
            "{} with {}",
            plural(summary.resources, "resource"),
            plural(summary.actions, "action")
        ));
        out.list_item(&plural(summary.media_types, "media type"));
        out.list_item(&plural(summary.user_types, "user type"));
        if !summary.versions.is_empty() {
            out.list_item(&format!("versions: {}", summary.versions.join(", ")));
        }
    }
}
