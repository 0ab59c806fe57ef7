//! Templates rendering the controller interfaces and their mount functions.

use apigen_codegen::TypeMapper;
use eyre::Result;

use crate::{
    ast::{Func, Interface, Method, Param},
    data::{ControllerData, EncoderData},
    go_file::{GOA_PACKAGE, RenderScope, Template},
};

/// The interface implemented by the user controller.
pub struct ControllerTemplate;

impl Template<ControllerData> for ControllerTemplate {
    fn name(&self) -> &'static str {
        "controller"
    }

    fn render(&self, data: &ControllerData, scope: &mut RenderScope<'_>) -> Result<()> {
        let controller = data.actions.iter().fold(
            Interface::new(format!("{}Controller", data.resource))
                .doc(format!(
                    "{}Controller is the controller interface for the {} actions.",
                    data.resource, data.resource
                ))
                .embed("goa.Controller"),
            |controller, action| {
                controller.method(
                    Method::new(&action.name)
                        .param(format!("*{}", action.context))
                        .returns("error"),
                )
            },
        );
        scope.import(GOA_PACKAGE);
        scope.code.emit(&controller);
        Ok(())
    }
}

/// The function registering the encoders, decoders and action handlers of a
/// controller on a service.
pub struct MountTemplate;

impl MountTemplate {
    /// `service.` or `service.Version("v").` for versioned controllers.
    fn service(data: &ControllerData) -> String {
        if data.version.is_default() {
            "service.".to_string()
        } else {
            format!("service.Version({:?}).", data.version.version)
        }
    }

    fn register(scope: &mut RenderScope<'_>, service: &str, setter: &str, encoders: &[EncoderData]) {
        for encoder in encoders {
            scope.import(&encoder.package_path);
            let mime_types = encoder
                .mime_types
                .iter()
                .map(|m| format!("{:?}", m))
                .collect::<Vec<_>>()
                .join(", ");
            scope.code.push_line(&format!(
                "{}{}({}.{}(), {}, {})",
                service, setter, encoder.package_name, encoder.factory, encoder.default, mime_types
            ));
        }
    }
}

impl Template<ControllerData> for MountTemplate {
    fn name(&self) -> &'static str {
        "mount"
    }

    fn render(&self, data: &ControllerData, scope: &mut RenderScope<'_>) -> Result<()> {
        scope.import(GOA_PACKAGE);
        let service = Self::service(data);
        let resource = &data.resource;
        scope
            .code
            .push_comment(&format!(
                "Mount{}Controller \"mounts\" a {} resource controller on the given service.",
                resource, resource
            ))
            .push_line(&format!(
                "func Mount{}Controller(service goa.Service, ctrl {}Controller) {{",
                resource, resource
            ))
            .push_indent()
            .push_comment("Setup encoders and decoders. This is idempotent and is done by each MountXXX function.");
        Self::register(scope, &service, "SetEncoder", &data.encoders);
        Self::register(scope, &service, "SetDecoder", &data.decoders);

        let routed: Vec<_> = data.actions.iter().filter(|a| !a.routes.is_empty()).collect();
        if !routed.is_empty() {
            scope
                .code
                .push_blank()
                .push_comment("Setup endpoint handler")
                .push_line("var h goa.Handler")
                .push_line(&format!("mux := {}ServeMux()", service));
        }

        for action in routed {
            scope
                .code
                .push_line("h = func(c *goa.Context) error {")
                .push_indent()
                .push_line(&format!("ctx, err := New{}(c)", action.context));
            if !data.version.is_default() {
                scope
                    .code
                    .push_line(&format!("ctx.Version = {}VersionName()", service));
            }
            if let Some(payload) = &action.payload {
                let type_name = scope.helpers.mapper.type_name(&payload.type_name);
                scope
                    .code
                    .push_line("if rp := ctx.RawPayload(); rp != nil {")
                    .push_indent()
                    .push_line(&format!("ctx.Payload = rp.(*{})", type_name))
                    .push_dedent()
                    .push_line("}");
            }
            scope
                .code
                .push_line("if err != nil {")
                .push_indent()
                .push_line("return goa.NewBadRequestError(err)")
                .push_dedent()
                .push_line("}")
                .push_line(&format!("return ctrl.{}(ctx)", action.name))
                .push_dedent()
                .push_line("}");

            let unmarshal = if action.payload.is_some() {
                action.unmarshal.as_str()
            } else {
                "nil"
            };
            let version = if data.version.is_default() {
                String::new()
            } else {
                format!(" \"version\", {:?},", data.version.version)
            };
            for (verb, path) in &action.routes {
                scope.code.push_line(&format!(
                    "mux.Handle({:?}, {:?}, ctrl.HandleFunc({:?}, h, {}))",
                    verb, path, action.name, unmarshal
                ));
                scope.code.push_line(&format!(
                    "service.Info(\"mount\", \"ctrl\", {:?},{} \"action\", {:?}, \"route\", \"{} {}\")",
                    resource, version, action.name, verb, path
                ));
            }
        }

        scope.code.push_dedent().push_line("}");
        Ok(())
    }
}

/// One function per payload-bearing action decoding and validating the
/// request body.
pub struct UnmarshalTemplate;

impl Template<ControllerData> for UnmarshalTemplate {
    fn name(&self) -> &'static str {
        "unmarshal"
    }

    fn render(&self, data: &ControllerData, scope: &mut RenderScope<'_>) -> Result<()> {
        let helpers = scope.helpers;
        let mut first = true;
        for action in &data.actions {
            let Some(payload) = &action.payload else {
                continue;
            };
            let validates = helpers
                .validator
                .recursive_checks(&payload.attribute, false, false, "payload", "raw")
                .is_some();

            let mut unmarshal = Func::new(&action.unmarshal)
                .doc(format!("{} unmarshals the request body.", action.unmarshal))
                .param(Param::new("ctx", "*goa.Context"))
                .returns("error")
                .body_line(format!(
                    "payload := &{}{{}}",
                    helpers.mapper.type_name(&payload.type_name)
                ))
                .body("if err := ctx.Service().DecodeRequest(ctx, payload); err != nil {\n\treturn err\n}");
            if validates {
                unmarshal = unmarshal.body("if err := payload.Validate(); err != nil {\n\treturn err\n}");
            }
            unmarshal = unmarshal.body_line("ctx.SetPayload(payload)").body_line("return nil");

            if !first {
                scope.code.push_blank();
            }
            first = false;
            scope.import(GOA_PACKAGE);
            scope.code.emit(&unmarshal);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use apigen_design::{
        ActionDefinition, ApiDefinition, ApiVersionDefinition, AttributeDefinition, DataType,
        EncodingDefinition, ResourceDefinition, RouteDefinition, ValidationDefinition,
    };

    use super::*;
    use crate::{GoTypeMapper, RecursiveValidator, RenderHelpers};

    fn api() -> ApiDefinition {
        let show = ActionDefinition::new("show")
            .route(RouteDefinition::new("GET", "/:id"))
            .route(RouteDefinition::new("GET", "//bottles/:id"));
        let create = ActionDefinition::new("create")
            .route(RouteDefinition::new("POST", ""))
            .payload(
                AttributeDefinition::object([(
                    "name",
                    AttributeDefinition::new(DataType::String).validation(ValidationDefinition {
                        max_length: Some(10),
                        ..Default::default()
                    }),
                )])
                .required(["name"]),
            );
        let rate = ActionDefinition::new("rate")
            .route(RouteDefinition::new("PUT", "/:id/rate"))
            .payload(AttributeDefinition::object([(
                "stars",
                AttributeDefinition::new(DataType::Integer),
            )]));
        ApiDefinition::new("cellar")
            .base_path("/cellar")
            .with_version(ApiVersionDefinition::new("1.0").with_base_path("/v1"))
            .with_decoder(EncodingDefinition::new("github.com/goadesign/goa/encoding/json", ["application/json"]).as_default())
            .with_decoder(EncodingDefinition::new("github.com/goadesign/goa/encoding/form", ["application/x-www-form-urlencoded"]))
            .with_resource(
                ResourceDefinition::new("bottle")
                    .base_path("/accounts/bottles")
                    .action(show)
                    .action(create)
                    .action(rate),
            )
    }

    fn render<T: Template<ControllerData>>(template: &T, api: &ApiDefinition, version: &ApiVersionDefinition) -> String {
        let validator = RecursiveValidator::new(api);
        let helpers = RenderHelpers::new(api, GoTypeMapper::new(api), &validator);
        let data = ControllerData::new(api, api.resource("bottle").unwrap(), version);
        let mut scope = RenderScope::new(&helpers);
        template.render(&data, &mut scope).unwrap();
        scope.code.build()
    }

    #[test]
    fn test_controller_interface() {
        let api = api();
        let code = render(&ControllerTemplate, &api, &api.default_version());
        insta::assert_snapshot!(code, @r"
        // BottleController is the controller interface for the Bottle actions.
        type BottleController interface {
        	goa.Controller
        	Show(*ShowBottleContext) error
        	Create(*CreateBottleContext) error
        	Rate(*RateBottleContext) error
        }
        ");
    }

    #[test]
    fn test_mount() {
        let api = api();
        let code = render(&MountTemplate, &api, &api.default_version());
        insta::assert_snapshot!(code, @r#"
        // MountBottleController "mounts" a Bottle resource controller on the given service.
        func MountBottleController(service goa.Service, ctrl BottleController) {
        	// Setup encoders and decoders. This is idempotent and is done by each MountXXX function.
        	service.SetEncoder(json.Factory(), true, "application/json")
        	service.SetDecoder(json.Factory(), true, "application/json")
        	service.SetDecoder(form.Factory(), false, "application/x-www-form-urlencoded")

        	// Setup endpoint handler
        	var h goa.Handler
        	mux := service.ServeMux()
        	h = func(c *goa.Context) error {
        		ctx, err := NewShowBottleContext(c)
        		if err != nil {
        			return goa.NewBadRequestError(err)
        		}
        		return ctrl.Show(ctx)
        	}
        	mux.Handle("GET", "/cellar/accounts/bottles/:id", ctrl.HandleFunc("Show", h, nil))
        	service.Info("mount", "ctrl", "Bottle", "action", "Show", "route", "GET /cellar/accounts/bottles/:id")
        	mux.Handle("GET", "/bottles/:id", ctrl.HandleFunc("Show", h, nil))
        	service.Info("mount", "ctrl", "Bottle", "action", "Show", "route", "GET /bottles/:id")
        	h = func(c *goa.Context) error {
        		ctx, err := NewCreateBottleContext(c)
        		if rp := ctx.RawPayload(); rp != nil {
        			ctx.Payload = rp.(*CreateBottlePayload)
        		}
        		if err != nil {
        			return goa.NewBadRequestError(err)
        		}
        		return ctrl.Create(ctx)
        	}
        	mux.Handle("POST", "/cellar/accounts/bottles", ctrl.HandleFunc("Create", h, unmarshalCreateBottlePayload))
        	service.Info("mount", "ctrl", "Bottle", "action", "Create", "route", "POST /cellar/accounts/bottles")
        	h = func(c *goa.Context) error {
        		ctx, err := NewRateBottleContext(c)
        		if rp := ctx.RawPayload(); rp != nil {
        			ctx.Payload = rp.(*RateBottlePayload)
        		}
        		if err != nil {
        			return goa.NewBadRequestError(err)
        		}
        		return ctrl.Rate(ctx)
        	}
        	mux.Handle("PUT", "/cellar/accounts/bottles/:id/rate", ctrl.HandleFunc("Rate", h, unmarshalRateBottlePayload))
        	service.Info("mount", "ctrl", "Bottle", "action", "Rate", "route", "PUT /cellar/accounts/bottles/:id/rate")
        }
        "#);
    }

    #[test]
    fn test_versioned_mount() {
        let api = api();
        let version = api.version("1.0").unwrap().clone();
        let code = render(&MountTemplate, &api, &version);

        assert!(code.contains("\tservice.Version(\"1.0\").SetEncoder(json.Factory(), true, \"application/json\")\n"));
        assert!(code.contains("\tmux := service.Version(\"1.0\").ServeMux()\n"));
        assert!(code.contains("\t\tctx.Version = service.Version(\"1.0\").VersionName()\n"));
        assert!(code.contains("mux.Handle(\"GET\", \"/v1/accounts/bottles/:id\""));
        assert!(code.contains(
            "service.Info(\"mount\", \"ctrl\", \"Bottle\", \"version\", \"1.0\", \"action\", \"Show\", \"route\", \"GET /v1/accounts/bottles/:id\")"
        ));
    }

    #[test]
    fn test_mount_is_deterministic() {
        let api = api();
        let first = render(&MountTemplate, &api, &api.default_version());
        let second = render(&MountTemplate, &api, &api.default_version());
        assert_eq!(first, second);
        assert_eq!(first.matches("SetEncoder(json.Factory()").count(), 1);
    }

    #[test]
    fn test_unmarshal_validates_only_when_needed() {
        let api = api();
        let code = render(&UnmarshalTemplate, &api, &api.default_version());
        insta::assert_snapshot!(code, @r"
        // unmarshalCreateBottlePayload unmarshals the request body.
        func unmarshalCreateBottlePayload(ctx *goa.Context) error {
        	payload := &CreateBottlePayload{}
        	if err := ctx.Service().DecodeRequest(ctx, payload); err != nil {
        		return err
        	}
        	if err := payload.Validate(); err != nil {
        		return err
        	}
        	ctx.SetPayload(payload)
        	return nil
        }

        // unmarshalRateBottlePayload unmarshals the request body.
        func unmarshalRateBottlePayload(ctx *goa.Context) error {
        	payload := &RateBottlePayload{}
        	if err := ctx.Service().DecodeRequest(ctx, payload); err != nil {
        		return err
        	}
        	ctx.SetPayload(payload)
        	return nil
        }
        ");
    }
}
