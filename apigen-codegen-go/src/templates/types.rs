//! Templates rendering media types and user types.

use apigen_codegen::TypeMapper;
use apigen_design::{AttributeDefinition, MediaTypeDefinition, UserTypeDefinition};
use eyre::Result;

use crate::{
    ast::Func,
    go_file::{GOA_PACKAGE, RenderScope, Template},
};

/// Render `type <name> <definition>` and, when the attribute has rules, its
/// `Validate` method.
fn render_type(
    scope: &mut RenderScope<'_>,
    type_name: &str,
    attribute: &AttributeDefinition,
    receiver: &str,
    validate_doc: &str,
) {
    let helpers = scope.helpers;
    scope
        .code
        .push_lines(&format!("type {} {}", type_name, helpers.mapper.type_def(attribute)));
    if helpers.mapper.mentions_time(attribute) {
        scope.import("time");
    }

    let Some(checks) = helpers
        .validator
        .recursive_checks(attribute, false, false, receiver, "response")
    else {
        return;
    };
    let receiver_type = if attribute.data_type.is_array() {
        type_name.to_string()
    } else {
        format!("*{}", type_name)
    };
    scope.import(GOA_PACKAGE);
    scope.code.push_blank().emit(
        &Func::new("Validate")
            .doc(validate_doc)
            .receiver(receiver, receiver_type)
            .returns("(err error)")
            .body(checks)
            .body_line("return"),
    );
}

/// One projection of a media type.
pub struct MediaTypeTemplate;

impl Template<MediaTypeDefinition> for MediaTypeTemplate {
    fn name(&self) -> &'static str {
        "mediatype"
    }

    fn render(&self, media_type: &MediaTypeDefinition, scope: &mut RenderScope<'_>) -> Result<()> {
        let type_name = scope.helpers.mapper.type_name(&media_type.type_name);
        match &media_type.description {
            Some(description) => scope.code.push_comment(description),
            None => scope.code.push_comment(&format!("{} media type", type_name)),
        };
        scope
            .code
            .push_comment(&format!("Identifier: {}", media_type.identifier));
        render_type(
            scope,
            &type_name,
            &media_type.attribute,
            "mt",
            "Validate validates the media type instance.",
        );
        Ok(())
    }
}

/// A user type, including the links types built by projections.
pub struct UserTypeTemplate;

impl Template<UserTypeDefinition> for UserTypeTemplate {
    fn name(&self) -> &'static str {
        "usertype"
    }

    fn render(&self, user_type: &UserTypeDefinition, scope: &mut RenderScope<'_>) -> Result<()> {
        let type_name = scope.helpers.mapper.type_name(&user_type.type_name);
        match &user_type.description {
            Some(description) => scope.code.push_comment(description),
            None => scope.code.push_comment(&format!("{} type", type_name)),
        };
        render_type(
            scope,
            &type_name,
            &user_type.attribute,
            "ut",
            "Validate validates the type instance.",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use apigen_design::{ApiDefinition, DataType, ValidationDefinition, ViewDefinition};

    use super::*;
    use crate::{GoTypeMapper, RecursiveValidator, RenderHelpers};

    fn api() -> ApiDefinition {
        let bottle = MediaTypeDefinition::new(
            "application/vnd.bottle+json",
            "Bottle",
            AttributeDefinition::object([
                ("id", AttributeDefinition::new(DataType::Integer).description("ID of bottle")),
                (
                    "vintage",
                    AttributeDefinition::new(DataType::Integer).validation(ValidationDefinition {
                        minimum: Some(1900.0),
                        ..Default::default()
                    }),
                ),
                ("bottled_at", AttributeDefinition::new(DataType::DateTime)),
            ])
            .required(["id"]),
        )
        .view("default", ViewDefinition::new(["id", "vintage", "bottled_at"]))
        .view("tiny", ViewDefinition::new(["id"]));
        let origin = UserTypeDefinition::new(
            "Origin",
            AttributeDefinition::object([("country", AttributeDefinition::new(DataType::String))]),
        )
        .description("Origin of a wine");
        ApiDefinition::new("cellar").with_media_type(bottle).with_type(origin)
    }

    fn render<D, T: Template<D>>(template: &T, data: &D, api: &ApiDefinition) -> (String, bool) {
        let validator = RecursiveValidator::new(api);
        let helpers = RenderHelpers::new(api, GoTypeMapper::new(api), &validator);
        let mut scope = RenderScope::new(&helpers);
        template.render(data, &mut scope).unwrap();
        let uses_time = scope.imports.has_module("time");
        (scope.code.build(), uses_time)
    }

    #[test]
    fn test_media_type_with_validation() {
        let api = api();
        let (projected, _) = api.media_types["application/vnd.bottle+json"]
            .project(&api, "default")
            .unwrap();
        let (code, uses_time) = render(&MediaTypeTemplate, &projected, &api);
        insta::assert_snapshot!(code, @r#"
        // Bottle media type
        // Identifier: application/vnd.bottle+json
        type Bottle struct {
        	// ID of bottle
        	ID        int        `json:"id" xml:"id"`
        	Vintage   *int       `json:"vintage,omitempty" xml:"vintage,omitempty"`
        	BottledAt *time.Time `json:"bottled_at,omitempty" xml:"bottled_at,omitempty"`
        }

        // Validate validates the media type instance.
        func (mt *Bottle) Validate() (err error) {
        	if mt.Vintage != nil {
        		if *mt.Vintage < 1900 {
        			err = goa.InvalidRangeError(`response.vintage`, *mt.Vintage, 1900, true, err)
        		}
        	}
        	return
        }
        "#);
        assert!(uses_time);
    }

    #[test]
    fn test_media_type_view_without_rules() {
        let api = api();
        let (projected, _) = api.media_types["application/vnd.bottle+json"]
            .project(&api, "tiny")
            .unwrap();
        let (code, uses_time) = render(&MediaTypeTemplate, &projected, &api);
        assert_eq!(
            code,
            "// BottleTiny media type\n// Identifier: application/vnd.bottle+json; view=tiny\ntype BottleTiny struct {\n\t// ID of bottle\n\tID int `json:\"id\" xml:\"id\"`\n}\n"
        );
        assert!(!uses_time);
    }

    #[test]
    fn test_user_type() {
        let api = api();
        let (code, _) = render(&UserTypeTemplate, &api.types["Origin"], &api);
        assert_eq!(
            code,
            "// Origin of a wine\ntype Origin struct {\n\tCountry *string `json:\"country,omitempty\" xml:\"country,omitempty\"`\n}\n"
        );
    }
}
