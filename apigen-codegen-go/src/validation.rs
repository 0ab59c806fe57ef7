//! Generation of Go validation code.
//!
//! Validation code is produced as plain snippets without base indentation so
//! emitters can place them at any depth with
//! [`CodeBuilder::push_lines`](apigen_codegen::CodeBuilder::push_lines). Every
//! failed check chains a goa error onto `err`, so one call reports all the
//! violations at once.

use apigen_design::{ApiDefinition, AttributeDefinition, DataType, Literal, ValidationDefinition};
use regex::Regex;

use crate::{
    coerce::Value,
    errors::{ParamError, ParamErrors},
    naming::goify,
};

/// Produces the Go code validating attribute values.
pub trait Validator {
    /// Checks of the rules attached directly to the attribute held by `target`.
    ///
    /// Optional primitives are held by pointers and checked only when set.
    /// Returns `None` when the attribute carries no rule.
    fn attribute_checks(
        &self,
        attribute: &AttributeDefinition,
        non_zero: bool,
        required: bool,
        target: &str,
        context: &str,
    ) -> Option<String>;

    /// Checks of `target` and of everything reachable from it: required
    /// fields, field rules, array elements and nested types.
    ///
    /// Returns `None` when no code is needed.
    fn recursive_checks(
        &self,
        attribute: &AttributeDefinition,
        non_zero: bool,
        required: bool,
        target: &str,
        context: &str,
    ) -> Option<String>;
}

/// Default validator walking attributes and named types recursively.
#[derive(Debug, Clone, Copy)]
pub struct RecursiveValidator<'a> {
    api: &'a ApiDefinition,
}

impl<'a> RecursiveValidator<'a> {
    pub fn new(api: &'a ApiDefinition) -> Self {
        Self { api }
    }

    fn checks(
        &self,
        attribute: &AttributeDefinition,
        non_zero: bool,
        required: bool,
        target: &str,
        context: &str,
        visiting: &mut Vec<String>,
    ) -> Option<String> {
        let mut blocks: Vec<String> = Vec::new();
        if let Some(own) = self.attribute_checks(attribute, non_zero, required, target, context) {
            blocks.push(own);
        }

        match &attribute.data_type {
            DataType::Object(fields) => {
                for name in &attribute.required {
                    let Some(field) = fields.get(name) else {
                        continue;
                    };
                    let member = format!("{}.{}", target, goify(name, true));
                    let missing = match &field.data_type {
                        DataType::String => Some(format!("{} == \"\"", member)),
                        DataType::Array(_) | DataType::Named(_) => Some(format!("{} == nil", member)),
                        _ => None,
                    };
                    if let Some(condition) = missing {
                        blocks.push(format!(
                            "if {} {{\n\terr = goa.MissingAttributeError(`{}`, {:?}, err)\n}}",
                            condition, context, name
                        ));
                    }
                }
                for (name, field) in fields {
                    let member = format!("{}.{}", target, goify(name, true));
                    let member_context = format!("{}.{}", context, name);
                    if let Some(nested) = self.checks(
                        field,
                        attribute.is_non_zero(name),
                        attribute.is_required(name),
                        &member,
                        &member_context,
                        visiting,
                    ) {
                        blocks.push(nested);
                    }
                }
            }
            DataType::Array(elem) => {
                let elem_context = format!("{}[*]", context);
                if let Some(nested) = self.checks(elem, false, true, "e", &elem_context, visiting) {
                    blocks.push(format!("for _, e := range {} {{\n{}\n}}", target, indent(&nested)));
                }
            }
            DataType::Named(name) => {
                if let Some(rendered) = self.api.rendered_type(name)
                    && self.named_needs_validation(name, &rendered, visiting)
                {
                    let call = format!(
                        "if err2 := {}.Validate(); err2 != nil {{\n\terr = goa.MergeErrors(err, err2)\n}}",
                        target
                    );
                    if rendered.data_type.is_array() {
                        blocks.push(call);
                    } else {
                        blocks.push(format!("if {} != nil {{\n{}\n}}", target, indent(&call)));
                    }
                }
            }
            _ => {}
        }

        if blocks.is_empty() {
            None
        } else {
            Some(blocks.join("\n"))
        }
    }

    /// A named type has a `Validate` method iff its own checks are non-empty.
    fn named_needs_validation(
        &self,
        name: &str,
        attribute: &AttributeDefinition,
        visiting: &mut Vec<String>,
    ) -> bool {
        if visiting.iter().any(|v| v == name) {
            return false;
        }
        visiting.push(name.to_string());
        let needed = self
            .checks(attribute, false, false, "v", "v", visiting)
            .is_some();
        visiting.pop();
        needed
    }
}

impl Validator for RecursiveValidator<'_> {
    fn attribute_checks(
        &self,
        attribute: &AttributeDefinition,
        non_zero: bool,
        required: bool,
        target: &str,
        context: &str,
    ) -> Option<String> {
        let validation = attribute.validation.as_ref().filter(|v| !v.is_empty())?;
        let pointer = attribute.data_type.is_primitive()
            && attribute.data_type != DataType::Any
            && !required
            && !non_zero;
        let value = if pointer {
            format!("*{}", target)
        } else {
            target.to_string()
        };
        let integer = matches!(attribute.data_type, DataType::Integer);

        let checks = rule_checks(validation, &value, context, integer).join("\n");
        if pointer {
            Some(format!("if {} != nil {{\n{}\n}}", target, indent(&checks)))
        } else {
            Some(checks)
        }
    }

    fn recursive_checks(
        &self,
        attribute: &AttributeDefinition,
        non_zero: bool,
        required: bool,
        target: &str,
        context: &str,
    ) -> Option<String> {
        self.checks(attribute, non_zero, required, target, context, &mut Vec::new())
    }
}

fn rule_checks(validation: &ValidationDefinition, value: &str, context: &str, integer: bool) -> Vec<String> {
    let mut checks = Vec::new();

    if !validation.values.is_empty() {
        let condition = validation
            .values
            .iter()
            .map(|v| format!("{} == {}", value, v))
            .collect::<Vec<_>>()
            .join(" || ");
        let allowed = validation
            .values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        checks.push(format!(
            "if !({}) {{\n\terr = goa.InvalidEnumValueError(`{}`, {}, []interface{{}}{{{}}}, err)\n}}",
            condition, context, value, allowed
        ));
    }
    if let Some(format) = &validation.format {
        checks.push(format!(
            "if err2 := goa.ValidateFormat(goa.Format({:?}), {}); err2 != nil {{\n\terr = goa.InvalidFormatError(`{}`, {}, goa.Format({:?}), err2, err)\n}}",
            format, value, context, value, format
        ));
    }
    if let Some(pattern) = &validation.pattern {
        checks.push(format!(
            "if ok := goa.ValidatePattern({:?}, {}); !ok {{\n\terr = goa.InvalidPatternError(`{}`, {}, {:?}, err)\n}}",
            pattern, value, context, value, pattern
        ));
    }
    if let Some(min) = validation.minimum {
        let min = number(min, integer);
        checks.push(format!(
            "if {} < {} {{\n\terr = goa.InvalidRangeError(`{}`, {}, {}, true, err)\n}}",
            value, min, context, value, min
        ));
    }
    if let Some(max) = validation.maximum {
        let max = number(max, integer);
        checks.push(format!(
            "if {} > {} {{\n\terr = goa.InvalidRangeError(`{}`, {}, {}, false, err)\n}}",
            value, max, context, value, max
        ));
    }
    if let Some(min) = validation.min_length {
        checks.push(format!(
            "if len({}) < {} {{\n\terr = goa.InvalidLengthError(`{}`, {}, len({}), {}, true, err)\n}}",
            value, min, context, value, value, min
        ));
    }
    if let Some(max) = validation.max_length {
        checks.push(format!(
            "if len({}) > {} {{\n\terr = goa.InvalidLengthError(`{}`, {}, len({}), {}, false, err)\n}}",
            value, max, context, value, value, max
        ));
    }

    checks
}

/// Apply the rules of [`rule_checks`] to a coerced request value.
///
/// Each violated rule pushes one [`ParamError::ValidationFailed`]. Named
/// formats are left to the goa runtime and are not checked here.
pub fn check_value(validation: &ValidationDefinition, name: &str, value: &Value, errors: &mut ParamErrors) {
    let mut fail = |message: String| {
        errors.push(ParamError::ValidationFailed {
            name: name.to_string(),
            message,
        })
    };
    let integer = matches!(value, Value::Int(_));

    let scalar = !matches!(value, Value::Array(_));
    if scalar && !validation.values.is_empty() && !validation.values.iter().any(|v| literal_matches(value, v)) {
        let allowed = validation
            .values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        fail(format!("value {} must be one of {}", go_value(value), allowed));
    }
    if let (Some(pattern), Value::String(s)) = (&validation.pattern, value) {
        match Regex::new(pattern) {
            Ok(re) if re.is_match(s) => {}
            Ok(_) => fail(format!("value {:?} must match the regexp {:?}", s, pattern)),
            Err(_) => fail(format!("pattern {:?} is not a valid regexp", pattern)),
        }
    }
    if let Some(n) = numeric(value) {
        if let Some(min) = validation.minimum.filter(|min| n < *min) {
            fail(format!(
                "value {} must be greater or equal than {}",
                go_value(value),
                number(min, integer)
            ));
        }
        if let Some(max) = validation.maximum.filter(|max| n > *max) {
            fail(format!(
                "value {} must be lesser or equal than {}",
                go_value(value),
                number(max, integer)
            ));
        }
    }
    let len = match value {
        Value::String(s) => Some(s.len()),
        Value::Array(slots) => Some(slots.len()),
        _ => None,
    };
    if let Some(len) = len {
        if let Some(min) = validation.min_length.filter(|min| len < *min) {
            fail(format!("length {} must be greater or equal than {}", len, min));
        }
        if let Some(max) = validation.max_length.filter(|max| len > *max) {
            fail(format!("length {} must be lesser or equal than {}", len, max));
        }
    }
}

fn literal_matches(value: &Value, literal: &Literal) -> bool {
    match (value, literal) {
        (Value::Bool(a), Literal::Bool(b)) => a == b,
        (Value::Int(a), Literal::Int(b)) => a == b,
        (Value::Int(a), Literal::Float(b)) => *a as f64 == *b,
        (Value::Number(a), Literal::Float(b)) => a == b,
        (Value::Number(a), Literal::Int(b)) => *a == *b as f64,
        (Value::String(a), Literal::String(b)) => a == b,
        _ => false,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Number(n) => Some(*n),
        _ => None,
    }
}

/// Value as Go's `%#v` prints it in goa error messages.
fn go_value(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Number(n) => format!("{:?}", n),
        Value::String(s) => format!("{:?}", s),
        Value::DateTime(dt) => dt.to_rfc3339(),
        Value::Array(slots) => format!("[{} elements]", slots.len()),
    }
}

/// Go literal for a range bound; integer attributes get integer bounds.
fn number(value: f64, integer: bool) -> String {
    if integer && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:?}", value)
    }
}

fn indent(code: &str) -> String {
    code.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("\t{}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use apigen_design::{Literal, UserTypeDefinition};

    use super::*;

    fn rule(validation: ValidationDefinition, data_type: DataType) -> AttributeDefinition {
        AttributeDefinition::new(data_type).validation(validation)
    }

    fn messages(validation: &ValidationDefinition, value: Value) -> Vec<String> {
        let mut errors = ParamErrors::new();
        check_value(validation, "p", &value, &mut errors);
        errors
            .iter()
            .map(|e| match e {
                ParamError::ValidationFailed { message, .. } => message.clone(),
                other => panic!("unexpected error {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_check_value_rules() {
        let pattern = ValidationDefinition {
            pattern: Some("^[a-z]+$".into()),
            min_length: Some(3),
            ..Default::default()
        };
        assert!(messages(&pattern, Value::String("merlot".into())).is_empty());
        assert_eq!(
            messages(&pattern, Value::String("Ab".into())),
            vec![
                "value \"Ab\" must match the regexp \"^[a-z]+$\"",
                "length 2 must be greater or equal than 3",
            ]
        );
        // Lengths count bytes like Go's len.
        let short = ValidationDefinition {
            max_length: Some(1),
            ..Default::default()
        };
        assert_eq!(
            messages(&short, Value::String("é".into())),
            vec!["length 2 must be lesser or equal than 1"]
        );

        let rating = ValidationDefinition {
            values: vec![Literal::Int(1), Literal::Float(2.5)],
            maximum: Some(2.5),
            ..Default::default()
        };
        assert!(messages(&rating, Value::Number(1.0)).is_empty());
        assert_eq!(
            messages(&rating, Value::Number(3.0)),
            vec!["value 3.0 must be one of 1, 2.5", "value 3.0 must be lesser or equal than 2.5"]
        );
    }

    #[test]
    fn test_check_value_invalid_pattern() {
        let broken = ValidationDefinition {
            pattern: Some("[".into()),
            ..Default::default()
        };
        assert_eq!(
            messages(&broken, Value::String("x".into())),
            vec!["pattern \"[\" is not a valid regexp"]
        );
    }

    #[test]
    fn test_no_rules_no_code() {
        let api = ApiDefinition::new("cellar");
        let validator = RecursiveValidator::new(&api);
        let attribute = AttributeDefinition::object([("name", AttributeDefinition::new(DataType::String))]);

        assert!(validator.recursive_checks(&attribute, false, false, "ut", "response").is_none());
    }

    #[test]
    fn test_pointer_value_is_guarded() {
        let api = ApiDefinition::new("cellar");
        let validator = RecursiveValidator::new(&api);
        let attribute = rule(
            ValidationDefinition {
                minimum: Some(1.0),
                ..Default::default()
            },
            DataType::Integer,
        );

        assert_eq!(
            validator.attribute_checks(&attribute, false, false, "ctx.Page", "page").unwrap(),
            "if ctx.Page != nil {\n\tif *ctx.Page < 1 {\n\t\terr = goa.InvalidRangeError(`page`, *ctx.Page, 1, true, err)\n\t}\n}"
        );
    }

    #[test]
    fn test_enum_on_required_value() {
        let api = ApiDefinition::new("cellar");
        let validator = RecursiveValidator::new(&api);
        let attribute = rule(
            ValidationDefinition {
                values: vec![Literal::String("red".into()), Literal::String("white".into())],
                ..Default::default()
            },
            DataType::String,
        );

        assert_eq!(
            validator.attribute_checks(&attribute, false, true, "ctx.Color", "color").unwrap(),
            "if !(ctx.Color == \"red\" || ctx.Color == \"white\") {\n\terr = goa.InvalidEnumValueError(`color`, ctx.Color, []interface{}{\"red\", \"white\"}, err)\n}"
        );
    }

    #[test]
    fn test_object_required_and_field_rules() {
        let api = ApiDefinition::new("cellar");
        let validator = RecursiveValidator::new(&api);
        let attribute = AttributeDefinition::object([
            (
                "name",
                rule(
                    ValidationDefinition {
                        min_length: Some(2),
                        ..Default::default()
                    },
                    DataType::String,
                ),
            ),
            ("vintage", AttributeDefinition::new(DataType::Integer)),
        ])
        .required(["name", "vintage"]);

        assert_eq!(
            validator.recursive_checks(&attribute, false, false, "payload", "raw").unwrap(),
            "if payload.Name == \"\" {\n\terr = goa.MissingAttributeError(`raw`, \"name\", err)\n}\nif len(payload.Name) < 2 {\n\terr = goa.InvalidLengthError(`raw.name`, payload.Name, len(payload.Name), 2, true, err)\n}"
        );
    }

    #[test]
    fn test_array_elements_and_named_types() {
        let origin = UserTypeDefinition::new(
            "Origin",
            AttributeDefinition::object([("country", AttributeDefinition::new(DataType::String))])
                .required(["country"]),
        );
        let api = ApiDefinition::new("cellar").with_type(origin);
        let validator = RecursiveValidator::new(&api);
        let attribute = AttributeDefinition::object([(
            "origins",
            AttributeDefinition::array(AttributeDefinition::named("Origin")),
        )]);

        assert_eq!(
            validator.recursive_checks(&attribute, false, false, "mt", "response").unwrap(),
            "for _, e := range mt.Origins {\n\tif e != nil {\n\t\tif err2 := e.Validate(); err2 != nil {\n\t\t\terr = goa.MergeErrors(err, err2)\n\t\t}\n\t}\n}"
        );
    }

    #[test]
    fn test_recursive_type_terminates() {
        let node = UserTypeDefinition::new(
            "Node",
            AttributeDefinition::object([("next", AttributeDefinition::named("Node"))]),
        );
        let api = ApiDefinition::new("cellar").with_type(node);
        let validator = RecursiveValidator::new(&api);
        let attribute = api.user_type("Node").unwrap().attribute.clone();

        assert!(validator.recursive_checks(&attribute, false, false, "ut", "response").is_none());
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(number(10.0, true), "10");
        assert_eq!(number(10.0, false), "10.0");
        assert_eq!(number(0.5, true), "0.5");
    }
}
