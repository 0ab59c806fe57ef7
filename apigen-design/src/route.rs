//! Action routes and path helpers.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::{ApiDefinition, ApiVersionDefinition, ResourceDefinition};

/// Matches path wildcards (`:id` and `*rest`), capturing the parameter name.
static WILDCARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?::|\*)([a-zA-Z0-9_]+)").expect("wildcard regex is valid"));

/// An HTTP verb bound to a path template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDefinition {
    pub verb: String,
    pub path: String,
}

impl RouteDefinition {
    pub fn new(verb: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            path: path.into(),
        }
    }

    /// Returns true if the route path ignores the resource and version base paths.
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("//")
    }

    /// The path of the route once joined with its resource and version base paths.
    pub fn full_path(
        &self,
        api: &ApiDefinition,
        resource: &ResourceDefinition,
        version: &ApiVersionDefinition,
    ) -> String {
        if self.is_absolute() {
            return clean_path(&self.path[1..]);
        }
        join_paths(&resource.full_path(api, version), &self.path)
    }

    /// The names of the path parameters bound by this route, in path order.
    pub fn params(
        &self,
        api: &ApiDefinition,
        resource: &ResourceDefinition,
        version: &ApiVersionDefinition,
    ) -> Vec<String> {
        path_params(&self.full_path(api, resource, version))
    }
}

/// Extract the wildcard names of a path in order.
pub fn path_params(path: &str) -> Vec<String> {
    WILDCARD
        .captures_iter(path)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Replace every wildcard of a path with a `%v` format verb.
pub fn path_template(path: &str) -> String {
    WILDCARD.replace_all(path, "/%v").into_owned()
}

/// Normalize a URL path: single leading slash, no empty segments, no trailing slash.
pub fn clean_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
    format!("/{}", segments.join("/"))
}

/// Join two URL paths and normalize the result.
pub fn join_paths(base: &str, path: &str) -> String {
    clean_path(&format!("{}/{}", base, path))
}
