//! Lint for actions that no route reaches.

use apigen_design::ApiDefinition;

use crate::{Diagnostic, lint::Lint};

/// Lint that warns about actions declaring no route; their handler is never mounted.
pub struct UnmountedActionLint;

impl Lint for UnmountedActionLint {
    fn name(&self) -> &'static str {
        "unmounted-action"
    }

    fn check(&self, api: &ApiDefinition, diagnostics: &mut Vec<Diagnostic>) {
        for (name, resource) in &api.resources {
            for (action_name, action) in &resource.actions {
                if action.routes.is_empty() {
                    diagnostics.push(
                        Diagnostic::warning(
                            self.name(),
                            format!(
                                "action '{}' of resource '{}' has no route and will not be mounted",
                                action_name, name
                            ),
                        )
                        .at(format!("resources.{}.actions.{}", name, action_name)),
                    );
                }
            }
        }
    }
}
