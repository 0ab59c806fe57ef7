//! Templates rendering the action contexts.

use apigen_codegen::TypeMapper;
use apigen_design::{DEFAULT_VIEW, ResponseDefinition};
use eyre::{Result, WrapErr, eyre};

use crate::{
    ast::{Field, Func, Param, Struct},
    coerce::{CoerceData, Coercion},
    data::ContextData,
    go_file::{GOA_PACKAGE, RenderScope, Template},
    naming::goify,
};

/// The context type: request context, parameters, payload and version.
pub struct ContextTemplate;

impl Template<ContextData<'_>> for ContextTemplate {
    fn name(&self) -> &'static str {
        "context"
    }

    fn render(&self, data: &ContextData<'_>, scope: &mut RenderScope<'_>) -> Result<()> {
        let helpers = scope.helpers;
        let mapper = &helpers.mapper;
        let mut context = Struct::new(&data.name)
            .doc(format!(
                "{} provides the {} {} action context.",
                data.name, data.resource_name, data.action_name
            ))
            .embed("*goa.Context");

        let mut uses_time = false;
        if let Some(params) = data.params
            && let Some(fields) = params.fields()
        {
            for name in fields.keys() {
                let ty = mapper
                    .field_type(params, name)
                    .ok_or_else(|| eyre!("unknown parameter '{}'", name))?;
                context = context.field(Field::new(goify(name, true), ty));
            }
            uses_time = mapper.mentions_time(params);
        }
        if let Some(payload) = &data.payload {
            context = context.field(Field::new("Payload", format!("*{}", mapper.type_name(&payload.type_name))));
        }
        if data.is_versioned() {
            context = context.field(Field::new("Version", "string"));
        }

        scope.code.emit(&context);
        scope.import(GOA_PACKAGE);
        if uses_time {
            scope.import("time");
        }
        Ok(())
    }
}

/// The factory reading, coercing and validating the request values.
pub struct NewContextTemplate;

impl Template<ContextData<'_>> for NewContextTemplate {
    fn name(&self) -> &'static str {
        "new"
    }

    fn render(&self, data: &ContextData<'_>, scope: &mut RenderScope<'_>) -> Result<()> {
        scope.import(GOA_PACKAGE);
        let name = &data.name;
        scope.code.push_comment(&format!(
            "New{} parses the incoming request URL and body, performs validations and creates the",
            name
        ));
        scope.code.push_comment(&format!(
            "context used by the {} controller {} action.",
            data.resource_name, data.action_name
        ));
        scope
            .code
            .push_line(&format!("func New{}(c *goa.Context) (*{}, error) {{", name, name))
            .push_indent()
            .push_line("var err error")
            .push_line(&format!("ctx := {}{{Context: c}}", name));

        for header in data.required_headers() {
            scope
                .code
                .push_line(&format!("if c.Request().Header.Get({:?}) == \"\" {{", header))
                .push_indent()
                .push_line(&format!("err = goa.MissingHeaderError({:?}, err)", header))
                .push_dedent()
                .push_line("}");
        }

        if let Some(params) = data.params
            && let Some(fields) = params.fields()
        {
            for (param, attribute) in fields {
                let coercion = Coercion::for_type(&attribute.data_type).ok_or_else(|| {
                    eyre!(
                        "parameter '{}' of {} has type {} which cannot be read from a request",
                        param,
                        name,
                        attribute.data_type.kind_name()
                    )
                })?;
                let coerce = CoerceData::param(
                    param,
                    params.is_primitive_pointer(param),
                    format!("ctx.{}", goify(param, true)),
                );
                let raw = format!("raw{}", coerce.stem);

                scope.code.push_line(&format!("{} := c.Get({:?})", raw, param));
                if data.must_validate(param) {
                    scope
                        .code
                        .push_line(&format!("if {} == \"\" {{", raw))
                        .push_indent()
                        .push_line(&format!("err = goa.MissingParamError({:?}, err)", param))
                        .push_dedent()
                        .push_line("} else {");
                } else {
                    scope.code.push_line(&format!("if {} != \"\" {{", raw));
                }
                scope.code.push_indent();
                coercion.render(&coerce, scope);
                if let Some(checks) = scope.helpers.validator.attribute_checks(
                    attribute,
                    params.is_non_zero(param),
                    params.is_required(param),
                    &coerce.target,
                    param,
                ) {
                    scope.code.push_lines(&checks);
                }
                scope.code.push_dedent().push_line("}");
            }
        }

        scope
            .code
            .push_line("return &ctx, err")
            .push_dedent()
            .push_line("}");
        Ok(())
    }
}

/// The payload type of the action and its validation method.
pub struct PayloadTemplate;

impl Template<ContextData<'_>> for PayloadTemplate {
    fn name(&self) -> &'static str {
        "payload"
    }

    fn render(&self, data: &ContextData<'_>, scope: &mut RenderScope<'_>) -> Result<()> {
        let Some(payload) = &data.payload else {
            return Ok(());
        };
        let helpers = scope.helpers;
        let type_name = helpers.mapper.type_name(&payload.type_name);
        scope.code.push_comment(&format!(
            "{} is the {} {} action payload.",
            type_name, data.resource_name, data.action_name
        ));
        scope
            .code
            .push_lines(&format!("type {} {}", type_name, helpers.mapper.type_def(&payload.attribute)));
        if helpers.mapper.mentions_time(&payload.attribute) {
            scope.import("time");
        }

        if let Some(checks) = helpers
            .validator
            .recursive_checks(&payload.attribute, false, false, "payload", "raw")
        {
            let receiver = if payload.attribute.data_type.is_object() {
                format!("*{}", type_name)
            } else {
                type_name
            };
            scope.import(GOA_PACKAGE);
            scope.code.push_blank().emit(
                &Func::new("Validate")
                    .doc("Validate runs the validation rules defined in the design.")
                    .receiver("payload", receiver)
                    .returns("(err error)")
                    .body(checks)
                    .body_line("return"),
            );
        }
        Ok(())
    }
}

/// One method per response and rendered view.
pub struct ResponsesTemplate;

impl ResponsesTemplate {
    fn method_name(response: &ResponseDefinition, view: &str) -> String {
        if view == DEFAULT_VIEW {
            goify(&response.name, true)
        } else {
            format!("{}{}", goify(&response.name, true), goify(view, true))
        }
    }
}

impl Template<ContextData<'_>> for ResponsesTemplate {
    fn name(&self) -> &'static str {
        "response"
    }

    fn render(&self, data: &ContextData<'_>, scope: &mut RenderScope<'_>) -> Result<()> {
        let helpers = scope.helpers;
        let mut methods = Vec::new();
        for response in data.responses.values() {
            let media_type = response
                .media_type
                .as_deref()
                .and_then(|id| helpers.api.media_type_with_identifier(id));

            let Some(media_type) = media_type else {
                let name = goify(&response.name, true);
                let mut method = Func::new(&name)
                    .doc(format!("{} sends a HTTP response with status code {}.", name, response.status))
                    .receiver("ctx", format!("*{}", data.name))
                    .returns("error");
                if let Some(id) = &response.media_type {
                    method = method
                        .param(Param::new("resp", "[]byte"))
                        .body_line(format!("ctx.Header().Set(\"Content-Type\", {:?})", id))
                        .body_line(format!("return ctx.RespondBytes({}, resp)", response.status));
                } else {
                    method = method.body_line(format!("return ctx.RespondBytes({}, nil)", response.status));
                }
                methods.push(method);
                continue;
            };

            for view in media_type.rendered_views(helpers.api) {
                let (projected, _) = media_type.project(helpers.api, &view).wrap_err_with(|| {
                    format!(
                        "response '{}' of {} cannot render view '{}'",
                        response.name, data.name, view
                    )
                })?;
                let name = Self::method_name(response, &view);
                methods.push(
                    Func::new(&name)
                        .doc(format!("{} sends a HTTP response with status code {}.", name, response.status))
                        .receiver("ctx", format!("*{}", data.name))
                        .param(Param::new("resp", helpers.mapper.media_type_ref(&projected)))
                        .returns("error")
                        .body_line(format!(
                            "ctx.Header().Set(\"Content-Type\", {:?})",
                            media_type.identifier
                        ))
                        .body_line(format!("return ctx.Respond({}, resp)", response.status)),
                );
            }
        }

        for (i, method) in methods.iter().enumerate() {
            if i > 0 {
                scope.code.push_blank();
            }
            scope.code.emit(method);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use apigen_design::{
        ActionDefinition, ApiDefinition, ApiVersionDefinition, AttributeDefinition, DataType,
        MediaTypeDefinition, ResourceDefinition, RouteDefinition, ValidationDefinition,
        ViewDefinition,
    };

    use super::*;
    use crate::{GoTypeMapper, RecursiveValidator, RenderHelpers};

    fn api() -> ApiDefinition {
        let bottle = MediaTypeDefinition::new(
            "application/vnd.bottle+json",
            "Bottle",
            AttributeDefinition::object([
                ("id", AttributeDefinition::new(DataType::Integer)),
                ("name", AttributeDefinition::new(DataType::String)),
            ])
            .required(["id", "name"]),
        )
        .view("default", ViewDefinition::new(["id", "name"]))
        .view("tiny", ViewDefinition::new(["id"]))
        .view("link", ViewDefinition::new(["id"]));

        let show = ActionDefinition::new("show")
            .route(RouteDefinition::new("GET", "/:id"))
            .params(
                AttributeDefinition::object([
                    ("id", AttributeDefinition::new(DataType::Integer)),
                    (
                        "page",
                        AttributeDefinition::new(DataType::Integer).validation(ValidationDefinition {
                            minimum: Some(1.0),
                            ..Default::default()
                        }),
                    ),
                    ("view", AttributeDefinition::new(DataType::String)),
                ])
                .required(["id", "view"]),
            )
            .headers(
                AttributeDefinition::object([("X-Account", AttributeDefinition::new(DataType::String))])
                    .required(["X-Account"]),
            )
            .response(ResponseDefinition::new("ok", 200).media_type("application/vnd.bottle+json"))
            .response(ResponseDefinition::new("notFound", 404));
        let create = ActionDefinition::new("create")
            .route(RouteDefinition::new("POST", ""))
            .payload(
                AttributeDefinition::object([(
                    "name",
                    AttributeDefinition::new(DataType::String).validation(ValidationDefinition {
                        min_length: Some(2),
                        ..Default::default()
                    }),
                )])
                .required(["name"]),
            )
            .response(ResponseDefinition::new("created", 201).media_type("text/plain"));
        let resource = ResourceDefinition::new("bottle")
            .base_path("/bottles")
            .action(show)
            .action(create);
        ApiDefinition::new("cellar")
            .with_media_type(bottle)
            .with_resource(resource)
    }

    fn render<T: for<'a> Template<ContextData<'a>>>(
        template: &T,
        api: &ApiDefinition,
        action: &str,
        version: &ApiVersionDefinition,
    ) -> String {
        let validator = RecursiveValidator::new(api);
        let helpers = RenderHelpers::new(api, GoTypeMapper::new(api), &validator);
        let resource = api.resource("bottle").unwrap();
        let data = ContextData::new(api, resource, &resource.actions[action], version);
        let mut scope = RenderScope::new(&helpers);
        template.render(&data, &mut scope).unwrap();
        scope.code.build()
    }

    #[test]
    fn test_context_struct() {
        let api = api();
        let code = render(&ContextTemplate, &api, "show", &api.default_version());
        insta::assert_snapshot!(code, @r"
        // ShowBottleContext provides the bottle show action context.
        type ShowBottleContext struct {
        	*goa.Context
        	ID   int
        	Page *int
        	View string
        }
        ");
    }

    #[test]
    fn test_versioned_context_with_payload() {
        let api = api();
        let code = render(&ContextTemplate, &api, "create", &ApiVersionDefinition::new("1.0"));
        assert!(code.contains("\tPayload *CreateBottlePayload\n"));
        assert!(code.contains("\tVersion string\n"));
    }

    #[test]
    fn test_new_context() {
        let api = api();
        let code = render(&NewContextTemplate, &api, "show", &api.default_version());
        insta::assert_snapshot!(code, @r#"
        // NewShowBottleContext parses the incoming request URL and body, performs validations and creates the
        // context used by the bottle controller show action.
        func NewShowBottleContext(c *goa.Context) (*ShowBottleContext, error) {
        	var err error
        	ctx := ShowBottleContext{Context: c}
        	if c.Request().Header.Get("X-Account") == "" {
        		err = goa.MissingHeaderError("X-Account", err)
        	}
        	rawID := c.Get("id")
        	if rawID != "" {
        		if id, err2 := strconv.Atoi(rawID); err2 == nil {
        			ctx.ID = int(id)
        		} else {
        			err = goa.InvalidParamTypeError("id", rawID, "integer", err)
        		}
        	}
        	rawPage := c.Get("page")
        	if rawPage != "" {
        		if page, err2 := strconv.Atoi(rawPage); err2 == nil {
        			tmp2 := int(page)
        			tmp1 := &tmp2
        			ctx.Page = tmp1
        		} else {
        			err = goa.InvalidParamTypeError("page", rawPage, "integer", err)
        		}
        		if ctx.Page != nil {
        			if *ctx.Page < 1 {
        				err = goa.InvalidRangeError(`page`, *ctx.Page, 1, true, err)
        			}
        		}
        	}
        	rawView := c.Get("view")
        	if rawView == "" {
        		err = goa.MissingParamError("view", err)
        	} else {
        		ctx.View = rawView
        	}
        	return &ctx, err
        }
        "#);
    }

    #[test]
    fn test_payload_with_validation() {
        let api = api();
        let code = render(&PayloadTemplate, &api, "create", &api.default_version());
        assert!(code.starts_with("// CreateBottlePayload is the bottle create action payload.\ntype CreateBottlePayload struct {\n"));
        assert!(code.contains("func (payload *CreateBottlePayload) Validate() (err error) {\n"));
        assert!(code.contains("goa.InvalidLengthError(`raw.name`"));
        assert!(code.ends_with("\treturn\n}\n"));
    }

    #[test]
    fn test_responses_per_view() {
        let api = api();
        let code = render(&ResponsesTemplate, &api, "show", &api.default_version());
        insta::assert_snapshot!(code, @r#"
        // OK sends a HTTP response with status code 200.
        func (ctx *ShowBottleContext) OK(resp *Bottle) error {
        	ctx.Header().Set("Content-Type", "application/vnd.bottle+json")
        	return ctx.Respond(200, resp)
        }

        // OKTiny sends a HTTP response with status code 200.
        func (ctx *ShowBottleContext) OKTiny(resp *BottleTiny) error {
        	ctx.Header().Set("Content-Type", "application/vnd.bottle+json")
        	return ctx.Respond(200, resp)
        }

        // NotFound sends a HTTP response with status code 404.
        func (ctx *ShowBottleContext) NotFound() error {
        	return ctx.RespondBytes(404, nil)
        }
        "#);
    }

    #[test]
    fn test_untyped_response_with_content_type() {
        let api = api();
        let code = render(&ResponsesTemplate, &api, "create", &api.default_version());
        assert!(code.contains("func (ctx *CreateBottleContext) Created(resp []byte) error {"));
        assert!(code.contains("ctx.Header().Set(\"Content-Type\", \"text/plain\")"));
        assert!(code.contains("return ctx.RespondBytes(201, resp)"));
    }
}
