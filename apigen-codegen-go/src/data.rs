//! Template data built from the design.
//!
//! Each structure gathers what one template needs to render an artifact.
//! They are built fresh for every generation pass and never mutated while
//! rendering.

use apigen_design::{
    ActionDefinition, ApiDefinition, ApiVersionDefinition, AttributeDefinition, EncodingDefinition,
    ResourceDefinition, ResponseDefinition, RouteDefinition,
    UserTypeDefinition, path_params, path_template,
};
use indexmap::IndexMap;

use crate::{
    coerce::{Coercion, Value},
    errors::{ParamError, ParamErrors},
    naming::goify,
    validation::check_value,
};

/// Everything needed to render the context of one action.
#[derive(Debug, Clone)]
pub struct ContextData<'a> {
    /// Go name of the context type, e.g. `ListBottleContext`.
    pub name: String,
    pub resource_name: &'a str,
    pub action_name: &'a str,
    pub params: Option<&'a AttributeDefinition>,
    pub payload: Option<UserTypeDefinition>,
    pub headers: Option<&'a AttributeDefinition>,
    pub routes: &'a [RouteDefinition],
    pub responses: &'a IndexMap<String, ResponseDefinition>,
    pub api: &'a ApiDefinition,
    pub resource: &'a ResourceDefinition,
    pub version: ApiVersionDefinition,
}

impl<'a> ContextData<'a> {
    pub fn new(
        api: &'a ApiDefinition,
        resource: &'a ResourceDefinition,
        action: &'a ActionDefinition,
        version: &ApiVersionDefinition,
    ) -> Self {
        Self {
            name: context_name(resource, action),
            resource_name: &resource.name,
            action_name: &action.name,
            params: action.params.as_ref(),
            payload: action.payload_type(resource),
            headers: action.headers.as_ref(),
            routes: &action.routes,
            responses: &action.responses,
            api,
            resource,
            version: version.clone(),
        }
    }

    /// Returns true if the context belongs to a non-default API version.
    pub fn is_versioned(&self) -> bool {
        !self.version.is_default()
    }

    /// Returns true if `name` is bound by the routes of the action.
    ///
    /// Routes are scanned in declaration order and the scan stops at the
    /// first route that does not bind the parameter.
    pub fn is_path_param(&self, name: &str) -> bool {
        let Some(params) = self.params else {
            return false;
        };
        if !params.data_type.is_object() {
            return false;
        }
        let mut bound = false;
        for route in self.routes {
            bound = route
                .params(self.api, self.resource, &self.version)
                .iter()
                .any(|p| p == name);
            if !bound {
                break;
            }
        }
        bound
    }

    /// Returns true if the context factory must check that the parameter is
    /// present.
    pub fn must_validate(&self, name: &str) -> bool {
        self.params.is_some_and(|params| params.is_required(name)) && !self.is_path_param(name)
    }

    /// Headers whose presence is checked, in declaration order.
    pub fn required_headers(&self) -> Vec<&'a str> {
        let Some(headers) = self.headers else {
            return Vec::new();
        };
        headers
            .fields()
            .map(|fields| {
                fields
                    .keys()
                    .filter(|name| headers.is_required(name))
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Run the factory logic on raw request values.
    ///
    /// Mirrors the generated factory: missing headers and parameters,
    /// coercion failures and rule violations of coerced values are all
    /// collected. Every parameter that could be read is kept even when it or
    /// others failed validation.
    pub fn evaluate(&self, request: &RawRequest) -> Evaluation {
        let mut evaluation = Evaluation::default();
        for header in self.required_headers() {
            if request.header(header).is_empty() {
                evaluation.errors.push(ParamError::MissingHeader {
                    name: header.to_string(),
                });
            }
        }

        let Some(fields) = self.params.and_then(AttributeDefinition::fields) else {
            return evaluation;
        };
        for (name, attribute) in fields {
            let raw = request.param(name);
            if raw.is_empty() {
                if self.must_validate(name) {
                    evaluation.errors.push(ParamError::MissingParam { name: name.clone() });
                }
                continue;
            }
            let Some(coercion) = Coercion::for_type(&attribute.data_type) else {
                continue;
            };
            let Some(value) = coercion.apply(name, raw, &mut evaluation.errors) else {
                continue;
            };
            if let Some(validation) = &attribute.validation {
                check_value(validation, name, &value, &mut evaluation.errors);
            }
            evaluation.values.insert(name.clone(), value);
        }
        evaluation
    }
}

fn context_name(resource: &ResourceDefinition, action: &ActionDefinition) -> String {
    format!("{}{}Context", goify(&action.name, true), goify(&resource.name, true))
}

/// Raw header and parameter values of a request; absent values read as "".
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    headers: IndexMap<String, String>,
    params: IndexMap<String, String>,
}

impl RawRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers.get(name).map(String::as_str).unwrap_or_default()
    }

    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or_default()
    }
}

/// Outcome of [`ContextData::evaluate`]: the populated fields and every
/// error found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub values: IndexMap<String, Value>,
    pub errors: ParamErrors,
}

impl Evaluation {
    pub fn into_result(self) -> Result<IndexMap<String, Value>, ParamErrors> {
        self.errors.into_result(self.values)
    }
}

/// One action of a controller.
#[derive(Debug, Clone)]
pub struct ActionData {
    /// Go name of the controller method.
    pub name: String,
    pub context: String,
    pub payload: Option<UserTypeDefinition>,
    /// Name of the payload unmarshal function.
    pub unmarshal: String,
    /// Verb and full path of every route.
    pub routes: Vec<(String, String)>,
}

/// Everything needed to render the controller and mount function of a
/// resource.
#[derive(Debug, Clone)]
pub struct ControllerData {
    /// Go name of the resource.
    pub resource: String,
    pub actions: Vec<ActionData>,
    pub version: ApiVersionDefinition,
    pub encoders: Vec<EncoderData>,
    pub decoders: Vec<EncoderData>,
}

impl ControllerData {
    pub fn new(api: &ApiDefinition, resource: &ResourceDefinition, version: &ApiVersionDefinition) -> Self {
        let actions = resource
            .actions
            .values()
            .map(|action| {
                let name = goify(&action.name, true);
                let resource_name = goify(&resource.name, true);
                ActionData {
                    context: context_name(resource, action),
                    payload: action.payload_type(resource),
                    unmarshal: format!("unmarshal{}{}Payload", name, resource_name),
                    routes: action
                        .routes
                        .iter()
                        .map(|route| (route.verb.clone(), route.full_path(api, resource, version)))
                        .collect(),
                    name,
                }
            })
            .collect();
        Self {
            resource: goify(&resource.name, true),
            actions,
            version: version.clone(),
            encoders: EncoderData::group(&api.encoders()),
            decoders: EncoderData::group(&api.decoders()),
        }
    }

    /// Returns true if any action decodes a payload.
    pub fn has_payloads(&self) -> bool {
        self.actions.iter().any(|a| a.payload.is_some())
    }
}

/// Registration of one encoder or decoder package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderData {
    pub package_path: String,
    pub package_name: String,
    pub factory: String,
    pub mime_types: Vec<String>,
    pub default: bool,
}

impl EncoderData {
    /// Group encodings by package path so each package is registered once
    /// with the union of its MIME types.
    pub fn group(encodings: &[EncodingDefinition]) -> Vec<Self> {
        let mut grouped: IndexMap<&str, Self> = IndexMap::new();
        for encoding in encodings {
            let entry = grouped
                .entry(encoding.package_path.as_str())
                .or_insert_with(|| Self {
                    package_path: encoding.package_path.clone(),
                    package_name: encoding.package_name().to_string(),
                    factory: encoding.factory.clone(),
                    mime_types: Vec::new(),
                    default: false,
                });
            for mime in &encoding.mime_types {
                if !entry.mime_types.contains(mime) {
                    entry.mime_types.push(mime.clone());
                }
            }
            entry.default |= encoding.default;
        }
        grouped.into_values().collect()
    }
}

/// Everything needed to render the href function of a resource.
#[derive(Debug, Clone)]
pub struct ResourceData {
    pub name: String,
    /// Canonical path as a `fmt.Sprintf` format.
    pub canonical_template: Option<String>,
    /// Go names of the canonical path parameters, in path order.
    pub canonical_params: Vec<String>,
}

impl ResourceData {
    pub fn new(api: &ApiDefinition, resource: &ResourceDefinition, version: &ApiVersionDefinition) -> Self {
        let canonical = resource.canonical_path(api, version);
        Self {
            name: goify(&resource.name, true),
            canonical_params: canonical
                .as_deref()
                .map(|path| path_params(path).iter().map(|p| goify(p, false)).collect())
                .unwrap_or_default(),
            canonical_template: canonical.as_deref().map(path_template),
        }
    }
}

#[cfg(test)]
mod tests {
    use apigen_design::{DataType, Literal, ValidationDefinition};

    use super::*;

    fn bottles(routes: &[&str]) -> ApiDefinition {
        let action = routes.iter().fold(
            ActionDefinition::new("show").params(
                AttributeDefinition::object([
                    ("accountID", AttributeDefinition::new(DataType::Integer)),
                    ("id", AttributeDefinition::new(DataType::Integer)),
                    ("view", AttributeDefinition::new(DataType::String)),
                    ("years", AttributeDefinition::array(AttributeDefinition::new(DataType::Integer))),
                ])
                .required(["accountID", "id", "view"]),
            ),
            |action, path| action.route(RouteDefinition::new("GET", *path)),
        );
        let resource = ResourceDefinition::new("bottle")
            .base_path("/bottles")
            .canonical_action("show")
            .action(action.headers(
                AttributeDefinition::object([
                    ("Authorization", AttributeDefinition::new(DataType::String)),
                    ("X-Trace", AttributeDefinition::new(DataType::String)),
                ])
                .required(["Authorization"]),
            ));
        ApiDefinition::new("cellar").base_path("/cellar").with_resource(resource)
    }

    fn context(api: &ApiDefinition) -> ContextData<'_> {
        let resource = api.resource("bottle").unwrap();
        ContextData::new(api, resource, &resource.actions["show"], &api.default_version())
    }

    #[test]
    fn test_context_name() {
        let api = bottles(&["/:id"]);
        assert_eq!(context(&api).name, "ShowBottleContext");
    }

    #[test]
    fn test_path_param_bound_by_every_route() {
        let api = bottles(&["/:accountID/:id", "//accounts/:accountID/bottles/:id"]);
        let ctx = context(&api);

        assert!(ctx.is_path_param("id"));
        assert!(ctx.is_path_param("accountID"));
        assert!(!ctx.is_path_param("view"));
    }

    #[test]
    fn test_path_param_stops_at_first_miss() {
        let api = bottles(&["/:id", "//other/:id", "//bottles/:accountID"]);
        let ctx = context(&api);

        assert!(!ctx.is_path_param("accountID"));
        assert!(!ctx.is_path_param("id"));
    }

    #[test]
    fn test_path_param_without_routes_or_params() {
        let api = bottles(&[]);
        assert!(!context(&api).is_path_param("id"));

        let resource = ResourceDefinition::new("bottle")
            .action(ActionDefinition::new("list").route(RouteDefinition::new("GET", "/:id")));
        let api = ApiDefinition::new("cellar").with_resource(resource);
        let resource = api.resource("bottle").unwrap();
        let ctx = ContextData::new(&api, resource, &resource.actions["list"], &api.default_version());
        assert!(!ctx.is_path_param("id"));
    }

    #[test]
    fn test_scalar_params_bind_nothing() {
        let resource = ResourceDefinition::new("bottle").action(
            ActionDefinition::new("show")
                .route(RouteDefinition::new("GET", "/:id"))
                .params(AttributeDefinition::new(DataType::String)),
        );
        let api = ApiDefinition::new("cellar").with_resource(resource);
        let ctx = context(&api);

        assert!(!ctx.is_path_param("id"));
        assert!(!ctx.must_validate("id"));
        assert!(ctx.evaluate(&RawRequest::new()).errors.is_empty());
    }

    #[test]
    fn test_must_validate_excludes_path_params() {
        let api = bottles(&["/:id"]);
        let ctx = context(&api);

        assert!(!ctx.must_validate("id"));
        assert!(ctx.must_validate("accountID"));
        assert!(ctx.must_validate("view"));
        assert!(!ctx.must_validate("years"));
    }

    #[test]
    fn test_evaluate_populates_typed_fields() {
        let api = bottles(&["/:id"]);
        let request = RawRequest::new()
            .with_header("Authorization", "Bearer x")
            .with_param("accountID", "7")
            .with_param("id", "12")
            .with_param("view", "tiny")
            .with_param("years", "2001,2002");

        let values = context(&api).evaluate(&request).into_result().unwrap();
        assert_eq!(values["accountID"], Value::Int(7));
        assert_eq!(values["id"], Value::Int(12));
        assert_eq!(values["view"], Value::String("tiny".into()));
        assert_eq!(
            values["years"],
            Value::Array(vec![Some(Value::Int(2001)), Some(Value::Int(2002))])
        );
    }

    #[test]
    fn test_evaluate_reports_every_problem() {
        let api = bottles(&["/:id"]);
        let request = RawRequest::new().with_param("id", "abc");

        let evaluation = context(&api).evaluate(&request);
        let errors: Vec<_> = evaluation.errors.iter().cloned().collect();
        assert_eq!(
            errors,
            vec![
                ParamError::MissingHeader {
                    name: "Authorization".into()
                },
                ParamError::MissingParam {
                    name: "accountID".into()
                },
                ParamError::InvalidParamType {
                    name: "id".into(),
                    value: "abc".into(),
                    expected: "integer",
                },
                ParamError::MissingParam { name: "view".into() },
            ]
        );
        assert!(evaluation.values.is_empty());
    }

    #[test]
    fn test_evaluate_checks_rules_of_coerced_values() {
        let params = AttributeDefinition::object([
            (
                "page",
                AttributeDefinition::new(DataType::Integer).validation(ValidationDefinition {
                    minimum: Some(1.0),
                    ..Default::default()
                }),
            ),
            (
                "view",
                AttributeDefinition::new(DataType::String).validation(ValidationDefinition {
                    values: vec![Literal::String("default".into()), Literal::String("tiny".into())],
                    ..Default::default()
                }),
            ),
            (
                "ids",
                AttributeDefinition::array(AttributeDefinition::new(DataType::Integer)).validation(
                    ValidationDefinition {
                        max_length: Some(2),
                        ..Default::default()
                    },
                ),
            ),
        ]);
        let resource = ResourceDefinition::new("bottle")
            .action(ActionDefinition::new("show").route(RouteDefinition::new("GET", "")).params(params));
        let api = ApiDefinition::new("cellar").with_resource(resource);
        let ctx = context(&api);

        let request = RawRequest::new()
            .with_param("page", "0")
            .with_param("view", "full")
            .with_param("ids", "1,2,3");
        let evaluation = ctx.evaluate(&request);
        let errors: Vec<_> = evaluation.errors.iter().cloned().collect();
        assert_eq!(
            errors,
            vec![
                ParamError::ValidationFailed {
                    name: "page".into(),
                    message: "value 0 must be greater or equal than 1".into(),
                },
                ParamError::ValidationFailed {
                    name: "view".into(),
                    message: "value \"full\" must be one of \"default\", \"tiny\"".into(),
                },
                ParamError::ValidationFailed {
                    name: "ids".into(),
                    message: "length 3 must be lesser or equal than 2".into(),
                },
            ]
        );
        assert_eq!(evaluation.values["page"], Value::Int(0));

        let request = RawRequest::new().with_param("page", "2").with_param("view", "tiny");
        assert!(ctx.evaluate(&request).errors.is_empty());
    }

    #[test]
    fn test_controller_data() {
        let api = bottles(&["/:id", "//b/:id"]);
        let resource = api.resource("bottle").unwrap();
        let data = ControllerData::new(&api, resource, &api.default_version());

        assert_eq!(data.resource, "Bottle");
        assert_eq!(data.actions[0].name, "Show");
        assert_eq!(data.actions[0].context, "ShowBottleContext");
        assert_eq!(data.actions[0].unmarshal, "unmarshalShowBottlePayload");
        assert_eq!(
            data.actions[0].routes,
            vec![
                ("GET".to_string(), "/cellar/bottles/:id".to_string()),
                ("GET".to_string(), "/b/:id".to_string())
            ]
        );
        assert!(!data.has_payloads());
        assert_eq!(data.encoders.len(), 1);
        assert_eq!(data.encoders[0].package_name, "json");
    }

    #[test]
    fn test_encoder_grouping() {
        let encodings = vec![
            EncodingDefinition::new("github.com/goadesign/goa/encoding/json", ["application/json"]).as_default(),
            EncodingDefinition::new("github.com/goadesign/goa/encoding/xml", ["application/xml"]),
            EncodingDefinition::new(
                "github.com/goadesign/goa/encoding/json",
                ["application/json", "text/json"],
            ),
        ];
        let grouped = EncoderData::group(&encodings);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].mime_types, vec!["application/json", "text/json"]);
        assert!(grouped[0].default);
        assert_eq!(grouped[1].package_name, "xml");
        assert!(!grouped[1].default);
    }

    #[test]
    fn test_resource_data() {
        let api = bottles(&["/:id"]);
        let resource = api.resource("bottle").unwrap();
        let data = ResourceData::new(&api, resource, &api.default_version());

        assert_eq!(data.name, "Bottle");
        assert_eq!(data.canonical_template.as_deref(), Some("/cellar/bottles/%v"));
        assert_eq!(data.canonical_params, vec!["id"]);

        let plain = ResourceDefinition::new("health");
        let data = ResourceData::new(&api, &plain, &api.default_version());
        assert!(data.canonical_template.is_none());
    }
}
