//! Lint for resources and actions without description.

use apigen_design::ApiDefinition;

use crate::{Diagnostic, lint::Lint};

/// Lint that flags resources and actions missing descriptions.
pub struct EmptyDescriptionLint;

impl Lint for EmptyDescriptionLint {
    fn name(&self) -> &'static str {
        "empty-description"
    }

    fn check(&self, api: &ApiDefinition, diagnostics: &mut Vec<Diagnostic>) {
        for (name, resource) in &api.resources {
            if is_blank(resource.description.as_deref()) {
                diagnostics.push(
                    Diagnostic::info(self.name(), format!("resource '{}' has no description", name))
                        .at(format!("resources.{}", name)),
                );
            }
            for (action_name, action) in &resource.actions {
                if is_blank(action.description.as_deref()) {
                    diagnostics.push(
                        Diagnostic::info(
                            self.name(),
                            format!("action '{}' of resource '{}' has no description", action_name, name),
                        )
                        .at(format!("resources.{}.actions.{}", name, action_name)),
                    );
                }
            }
        }
    }
}

fn is_blank(description: Option<&str>) -> bool {
    description.is_none_or(|d| d.trim().is_empty())
}
