//! Go type mapper implementation.

use apigen_codegen::language::TypeMapper;
use apigen_design::{ApiDefinition, AttributeDefinition, DataType, MediaTypeDefinition};

use crate::ast::{FieldRow, align_fields};
use crate::naming::goify;

/// Maps design types to Go type expressions.
///
/// Named types live in the default package; when rendering code for a
/// versioned package the mapper qualifies them with that package name.
#[derive(Debug, Clone)]
pub struct GoTypeMapper<'a> {
    api: &'a ApiDefinition,
    qualifier: Option<String>,
}

impl<'a> GoTypeMapper<'a> {
    pub fn new(api: &'a ApiDefinition) -> Self {
        Self {
            api,
            qualifier: None,
        }
    }

    /// Qualify named types with the given package name.
    pub fn qualified(mut self, package: impl Into<String>) -> Self {
        self.qualifier = Some(package.into());
        self
    }

    /// Package name used to qualify named types, if any.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    fn qualify(&self, name: &str) -> String {
        match &self.qualifier {
            Some(pkg) => format!("{}.{}", pkg, self.type_name(name)),
            None => self.type_name(name),
        }
    }

    /// Named collections are slices and are never referenced through a pointer.
    fn is_collection(&self, name: &str) -> bool {
        self.api
            .rendered_type(name)
            .is_some_and(|attribute| attribute.data_type.is_array())
    }

    /// Reference to a (projected) media type, as used by response methods.
    pub fn media_type_ref(&self, mt: &MediaTypeDefinition) -> String {
        if mt.collection_of().is_some() {
            self.qualify(&mt.type_name)
        } else {
            format!("*{}", self.qualify(&mt.type_name))
        }
    }

    /// Returns true if rendering the attribute requires the `time` package.
    pub fn mentions_time(&self, attribute: &AttributeDefinition) -> bool {
        match &attribute.data_type {
            DataType::DateTime => true,
            DataType::Array(elem) => self.mentions_time(elem),
            DataType::Object(fields) => fields.values().any(|field| self.mentions_time(field)),
            _ => false,
        }
    }

    fn ref_at(&self, attribute: &AttributeDefinition, depth: usize) -> String {
        match &attribute.data_type {
            DataType::Boolean => "bool".to_string(),
            DataType::Integer => "int".to_string(),
            DataType::Number => "float64".to_string(),
            DataType::String => "string".to_string(),
            DataType::DateTime => "time.Time".to_string(),
            DataType::Any => "interface{}".to_string(),
            DataType::Array(elem) => format!("[]{}", self.ref_at(elem, depth)),
            DataType::Object(_) => self.def_at(attribute, depth),
            DataType::Named(name) if self.is_collection(name) => self.qualify(name),
            DataType::Named(name) => format!("*{}", self.qualify(name)),
        }
    }

    fn def_at(&self, attribute: &AttributeDefinition, depth: usize) -> String {
        let Some(fields) = attribute.fields() else {
            return self.ref_at(attribute, depth);
        };
        let indent = "\t".repeat(depth + 1);
        let mut rows = Vec::new();
        for (name, field) in fields {
            if let Some(description) = &field.description {
                rows.extend(description.lines().map(|line| FieldRow::Text(format!("// {}", line))));
            }
            let pointer = if attribute.is_primitive_pointer(name) { "*" } else { "" };
            let omit = if attribute.is_required(name) { "" } else { ",omitempty" };
            rows.push(FieldRow::Field {
                name: goify(name, true),
                ty: format!("{}{}", pointer, self.ref_at(field, depth + 1)),
                tag: Some(format!("json:\"{}{}\" xml:\"{}{}\"", name, omit, name, omit)),
            });
        }
        let mut out = String::from("struct {\n");
        for line in align_fields(&rows) {
            out.push_str(&indent);
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&"\t".repeat(depth));
        out.push('}');
        out
    }
}

impl TypeMapper for GoTypeMapper<'_> {
    fn language(&self) -> &'static str {
        "go"
    }

    fn type_ref(&self, data_type: &DataType) -> String {
        self.ref_at(&AttributeDefinition::new(data_type.clone()), 0)
    }

    fn field_type(&self, parent: &AttributeDefinition, name: &str) -> Option<String> {
        let field = parent.field(name)?;
        let ty = self.ref_at(field, 0);
        if parent.is_primitive_pointer(name) {
            Some(format!("*{}", ty))
        } else {
            Some(ty)
        }
    }

    fn type_def(&self, attribute: &AttributeDefinition) -> String {
        self.def_at(attribute, 0)
    }

    fn type_name(&self, name: &str) -> String {
        goify(name, true)
    }
}
