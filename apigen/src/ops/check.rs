//! Check operation - design validation.

use std::path::Path;

use apigen_codegen::{default_lints, run_lints};
use apigen_design::ApiDefinition;

use crate::reports::{CheckReport, DesignSummary};

/// Execute the check operation.
///
/// The design already passed loading; this runs the lints and summarizes
/// what the design declares.
pub fn check(api: &ApiDefinition, design_path: &Path) -> CheckReport {
    let diagnostics = run_lints(api, &default_lints());

    CheckReport {
        design_path: design_path.to_path_buf(),
        diagnostics,
        summary: DesignSummary {
            name: api.name.clone(),
            title: api.title.clone(),
            resources: api.resources.len(),
            actions: api.resources.values().map(|r| r.actions.len()).sum(),
            media_types: api.media_types.len(),
            user_types: api.types.len(),
            versions: api.versions.iter().map(|v| v.version.clone()).collect(),
        },
    }
}
