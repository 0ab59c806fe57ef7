//! Lint for path parameters that do not line up with the declared params.

use apigen_design::ApiDefinition;

use crate::{Diagnostic, lint::Lint};

/// Lint that checks the wildcards of every route against the action params.
///
/// Reports wildcards missing from the params attribute and params bound by
/// only some of the routes of an action; the latter are read like query
/// string parameters and checked for presence at runtime.
pub struct PathParamsLint;

impl Lint for PathParamsLint {
    fn name(&self) -> &'static str {
        "path-params"
    }

    fn check(&self, api: &ApiDefinition, diagnostics: &mut Vec<Diagnostic>) {
        for (name, resource) in &api.resources {
            let version = api.version_of(resource);
            for (action_name, action) in &resource.actions {
                let location = format!("resources.{}.actions.{}", name, action_name);
                let bound: Vec<Vec<String>> = action
                    .routes
                    .iter()
                    .map(|route| route.params(api, resource, &version))
                    .collect();

                for (route, params) in action.routes.iter().zip(&bound) {
                    for param in params {
                        let declared = action
                            .params
                            .as_ref()
                            .is_some_and(|p| p.field(param).is_some());
                        if !declared {
                            diagnostics.push(
                                Diagnostic::warning(
                                    self.name(),
                                    format!(
                                        "route '{} {}' binds ':{}' which the action params do not declare",
                                        route.verb, route.path, param
                                    ),
                                )
                                .at(location.clone()),
                            );
                        }
                    }
                }

                let Some(fields) = action.params.as_ref().and_then(|p| p.fields()) else {
                    continue;
                };
                for param in fields.keys() {
                    let count = bound.iter().filter(|params| params.contains(param)).count();
                    if count > 0 && count < bound.len() {
                        diagnostics.push(
                            Diagnostic::warning(
                                self.name(),
                                format!(
                                    "parameter '{}' of action '{}' is bound by {} of {} routes and is read as a query parameter",
                                    param,
                                    action_name,
                                    count,
                                    bound.len()
                                ),
                            )
                            .at(location.clone()),
                        );
                    }
                }
            }
        }
    }
}
