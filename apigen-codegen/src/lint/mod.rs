//! Design lints.
//!
//! Lints report designs that load fine but are likely to produce surprising
//! code, such as actions that are never mounted.

mod lints;

use apigen_design::ApiDefinition;

pub use lints::{EmptyDescriptionLint, PathParamsLint, UnmountedActionLint};

use crate::Diagnostic;

/// A lint that checks the design for issues.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// Check the design and add any diagnostics.
    fn check(&self, api: &ApiDefinition, diagnostics: &mut Vec<Diagnostic>);
}

/// The lints run by `apigen check` and before generation.
pub fn default_lints() -> Vec<Box<dyn Lint>> {
    vec![
        Box::new(EmptyDescriptionLint),
        Box::new(UnmountedActionLint),
        Box::new(PathParamsLint),
    ]
}

/// Run the given lints in order and collect their diagnostics.
pub fn run_lints(api: &ApiDefinition, lints: &[Box<dyn Lint>]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for lint in lints {
        lint.check(api, &mut diagnostics);
    }
    diagnostics
}
