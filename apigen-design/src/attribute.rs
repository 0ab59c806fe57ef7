//! Attribute and data type definitions.
//!
//! An [`AttributeDefinition`] describes a typed field. Object attributes carry
//! the per-field required, non-zero and pointer information used by code
//! generation.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// Object fields in declaration order.
pub type Object = IndexMap<String, AttributeDefinition>;

/// The declared type of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Boolean,
    Integer,
    Number,
    String,
    DateTime,
    Any,
    /// Sequence of the element attribute.
    Array(Box<AttributeDefinition>),
    /// Fields keyed by name.
    Object(Object),
    /// Reference to a user type or media type by type name.
    Named(String),
}

impl DataType {
    /// Returns true for scalar types (everything but arrays, objects and named types).
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Boolean | Self::Integer | Self::Number | Self::String | Self::DateTime | Self::Any
        )
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// The object fields, if this is an object type.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// The element attribute, if this is an array type.
    pub fn element(&self) -> Option<&AttributeDefinition> {
        match self {
            Self::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// Human readable kind name, as used in runtime error messages.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::Any => "any",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Named(name) => name,
        }
    }
}

/// A literal value used by enum validations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{:?}", v),
            Self::String(s) => write!(f, "{:?}", s),
        }
    }
}

/// Validation rules attached to an attribute.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValidationDefinition {
    /// Allowed values.
    #[serde(default, alias = "enum")]
    pub values: Vec<Literal>,
    /// Named string format (email, uri, date-time, ...).
    pub format: Option<String>,
    /// Regular expression the value must match.
    pub pattern: Option<String>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationDefinition {
    /// Returns true if no rule is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
            && self.format.is_none()
            && self.pattern.is_none()
            && self.minimum.is_none()
            && self.maximum.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
    }
}

/// A typed field description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawAttribute")]
pub struct AttributeDefinition {
    pub data_type: DataType,
    pub description: Option<String>,
    /// Names of required fields (object attributes only).
    pub required: Vec<String>,
    /// Names of fields that may not hold the zero value (object attributes only).
    pub non_zero: Vec<String>,
    pub validation: Option<ValidationDefinition>,
    /// View used to render this attribute when it references a media type.
    pub view: Option<String>,
}

impl AttributeDefinition {
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            description: None,
            required: Vec::new(),
            non_zero: Vec::new(),
            validation: None,
            view: None,
        }
    }

    /// Create an object attribute from `(name, attribute)` pairs.
    pub fn object<N: Into<String>>(fields: impl IntoIterator<Item = (N, AttributeDefinition)>) -> Self {
        Self::new(DataType::Object(
            fields.into_iter().map(|(n, a)| (n.into(), a)).collect(),
        ))
    }

    /// Create an array attribute of the given element.
    pub fn array(elem: AttributeDefinition) -> Self {
        Self::new(DataType::Array(Box::new(elem)))
    }

    /// Create a reference to a named user or media type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(DataType::Named(name.into()))
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark fields as required.
    pub fn required(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Mark fields as non-zero.
    pub fn non_zero(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.non_zero.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn validation(mut self, validation: ValidationDefinition) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Object fields, if this is an object attribute.
    pub fn fields(&self) -> Option<&Object> {
        self.data_type.as_object()
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&AttributeDefinition> {
        self.fields().and_then(|fields| fields.get(name))
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    pub fn is_non_zero(&self, name: &str) -> bool {
        self.non_zero.iter().any(|r| r == name)
    }

    /// Returns true if the field is represented by a pointer so that absence
    /// can be told apart from the zero value.
    pub fn is_primitive_pointer(&self, name: &str) -> bool {
        match self.field(name) {
            Some(att) => {
                att.data_type.is_primitive()
                    && att.data_type != DataType::Any
                    && !self.is_required(name)
                    && !self.is_non_zero(name)
            }
            None => false,
        }
    }

    /// Returns true if this attribute or any nested field or element carries
    /// a rule. Named types are not followed.
    pub fn has_validations(&self) -> bool {
        if self.validation.as_ref().is_some_and(|v| !v.is_empty()) {
            return true;
        }
        match &self.data_type {
            DataType::Object(fields) => {
                !self.required.is_empty() || fields.values().any(|f| f.has_validations())
            }
            DataType::Array(elem) => elem.has_validations(),
            _ => false,
        }
    }

    /// Copy of this object attribute where every field is required.
    pub fn all_required(&self) -> Self {
        let mut copy = self.clone();
        if let Some(fields) = self.fields() {
            copy.required = fields.keys().cloned().collect();
        }
        copy
    }
}

/// Serialized form of an attribute in a design document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAttribute {
    #[serde(rename = "type")]
    ty: String,
    elem: Option<Box<RawAttribute>>,
    #[serde(default)]
    fields: IndexMap<String, RawAttribute>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    non_zero: Vec<String>,
    description: Option<String>,
    view: Option<String>,
    #[serde(default, alias = "enum")]
    values: Vec<Literal>,
    format: Option<String>,
    pattern: Option<String>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl TryFrom<RawAttribute> for AttributeDefinition {
    type Error = String;

    fn try_from(raw: RawAttribute) -> Result<Self, Self::Error> {
        let data_type = match raw.ty.as_str() {
            "boolean" | "bool" => DataType::Boolean,
            "integer" | "int" => DataType::Integer,
            "number" | "float" => DataType::Number,
            "string" => DataType::String,
            "datetime" | "date-time" => DataType::DateTime,
            "any" => DataType::Any,
            "array" => {
                let elem = raw
                    .elem
                    .ok_or_else(|| "array attribute requires an `elem` definition".to_string())?;
                DataType::Array(Box::new(AttributeDefinition::try_from(*elem)?))
            }
            "object" => {
                let mut fields = Object::new();
                for (name, field) in raw.fields {
                    fields.insert(name, AttributeDefinition::try_from(field)?);
                }
                DataType::Object(fields)
            }
            "" => return Err("attribute type cannot be empty".to_string()),
            named => DataType::Named(named.to_string()),
        };

        if let DataType::Object(fields) = &data_type {
            for name in raw.required.iter().chain(raw.non_zero.iter()) {
                if !fields.contains_key(name) {
                    return Err(format!("`{}` is not a field of this object", name));
                }
            }
        }

        let validation = ValidationDefinition {
            values: raw.values,
            format: raw.format,
            pattern: raw.pattern,
            minimum: raw.minimum,
            maximum: raw.maximum,
            min_length: raw.min_length,
            max_length: raw.max_length,
        };

        Ok(Self {
            data_type,
            description: raw.description,
            required: raw.required,
            non_zero: raw.non_zero,
            validation: (!validation.is_empty()).then_some(validation),
            view: raw.view,
        })
    }
}
