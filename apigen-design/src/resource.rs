//! Resources, actions and responses.

use apigen_core::to_pascal_case;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    ApiDefinition, ApiVersionDefinition, AttributeDefinition, RouteDefinition, UserTypeDefinition,
    route::{clean_path, join_paths},
};

/// A response an action may send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseDefinition {
    #[serde(skip)]
    pub name: String,
    pub status: u16,
    /// Identifier of the media type describing the response body.
    pub media_type: Option<String>,
    pub description: Option<String>,
}

impl ResponseDefinition {
    pub fn new(name: impl Into<String>, status: u16) -> Self {
        Self {
            name: name.into(),
            status,
            media_type: None,
            description: None,
        }
    }

    pub fn media_type(mut self, identifier: impl Into<String>) -> Self {
        self.media_type = Some(identifier.into());
        self
    }
}

/// One operation of a resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionDefinition {
    #[serde(skip)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
    /// Path and query string parameters (object attribute).
    pub params: Option<AttributeDefinition>,
    /// Request body.
    pub payload: Option<AttributeDefinition>,
    /// Request headers (object attribute).
    pub headers: Option<AttributeDefinition>,
    #[serde(default)]
    pub responses: IndexMap<String, ResponseDefinition>,
}

impl ActionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            routes: Vec::new(),
            params: None,
            payload: None,
            headers: None,
            responses: IndexMap::new(),
        }
    }

    pub fn route(mut self, route: RouteDefinition) -> Self {
        self.routes.push(route);
        self
    }

    pub fn params(mut self, params: AttributeDefinition) -> Self {
        self.params = Some(params);
        self
    }

    pub fn payload(mut self, payload: AttributeDefinition) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn headers(mut self, headers: AttributeDefinition) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn response(mut self, response: ResponseDefinition) -> Self {
        self.responses.insert(response.name.clone(), response);
        self
    }

    /// The user type wrapping the action payload, named `<Action><Resource>Payload`.
    pub fn payload_type(&self, resource: &ResourceDefinition) -> Option<UserTypeDefinition> {
        self.payload.as_ref().map(|payload| UserTypeDefinition {
            type_name: format!(
                "{}{}Payload",
                to_pascal_case(&self.name),
                to_pascal_case(&resource.name)
            ),
            description: payload.description.clone(),
            attribute: payload.clone(),
        })
    }
}

/// A REST resource grouping actions under a base path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDefinition {
    #[serde(skip)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub base_path: String,
    /// Name of the parent resource; its canonical path prefixes this resource.
    pub parent: Option<String>,
    /// Identifier of the resource media type.
    pub media_type: Option<String>,
    /// Action whose first route is the resource canonical path.
    pub canonical_action: Option<String>,
    /// API version; absent for the default version.
    pub version: Option<String>,
    #[serde(default)]
    pub actions: IndexMap<String, ActionDefinition>,
}

impl ResourceDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            base_path: String::new(),
            parent: None,
            media_type: None,
            canonical_action: None,
            version: None,
            actions: IndexMap::new(),
        }
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_media_type(mut self, identifier: impl Into<String>) -> Self {
        self.media_type = Some(identifier.into());
        self
    }

    pub fn canonical_action(mut self, action: impl Into<String>) -> Self {
        self.canonical_action = Some(action.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn action(mut self, action: ActionDefinition) -> Self {
        self.actions.insert(action.name.clone(), action);
        self
    }

    /// The action providing the canonical path, if any.
    pub fn canonical(&self) -> Option<&ActionDefinition> {
        self.canonical_action
            .as_deref()
            .and_then(|name| self.actions.get(name))
    }

    /// Returns true if the resource belongs to the given API version.
    pub fn belongs_to(&self, version: &ApiVersionDefinition) -> bool {
        self.version.as_deref().unwrap_or_default() == version.version
    }

    /// The base path of the resource including the version or parent prefix.
    pub fn full_path(&self, api: &ApiDefinition, version: &ApiVersionDefinition) -> String {
        if self.base_path.starts_with("//") {
            return clean_path(&self.base_path[1..]);
        }
        let base = match &self.parent {
            Some(parent) => api
                .resource(parent)
                .and_then(|parent| parent.canonical_path(api, version))
                .unwrap_or_default(),
            None => version.base_path(api).to_string(),
        };
        join_paths(&base, &self.base_path)
    }

    /// The full path of the first route of the canonical action.
    pub fn canonical_path(&self, api: &ApiDefinition, version: &ApiVersionDefinition) -> Option<String> {
        self.canonical()
            .and_then(|action| action.routes.first())
            .map(|route| route.full_path(api, self, version))
    }
}
