//! Coercion of raw request strings into typed values.
//!
//! A [`Coercion`] is built from an attribute type and either rendered as the
//! Go code of a context factory or applied directly to a raw string with the
//! same parsing rules.

use apigen_design::DataType;
use chrono::{DateTime, FixedOffset};

use crate::{
    errors::{ParamError, ParamErrors},
    go_file::RenderScope,
    naming::goify,
};

/// How a raw string becomes a value of the declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    Boolean,
    Integer,
    Number,
    String,
    DateTime,
    Any,
    /// Comma separated list of elements.
    Array(Box<Coercion>),
}

/// A value produced by [`Coercion::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Number(f64),
    String(String),
    DateTime(DateTime<FixedOffset>),
    /// Array slots; `None` marks an element that failed to parse and keeps the
    /// zero value of its type.
    Array(Vec<Option<Value>>),
}

/// Input of one coercion rendering.
#[derive(Debug, Clone)]
pub struct CoerceData<'a> {
    /// Name reported in runtime errors.
    pub name: &'a str,
    /// Stem of the raw variable, read from `raw<Stem>`.
    pub stem: String,
    /// Whether the target holds a pointer to the value.
    pub pointer: bool,
    /// Go expression receiving the value.
    pub target: String,
}

impl<'a> CoerceData<'a> {
    /// Data for a request parameter read from `raw<Name>` into `target`.
    pub fn param(name: &'a str, pointer: bool, target: impl Into<String>) -> Self {
        Self {
            name,
            stem: goify(name, true),
            pointer,
            target: target.into(),
        }
    }
}

impl Coercion {
    /// The coercion for a declared type; objects and named types are not
    /// read from raw strings.
    pub fn for_type(data_type: &DataType) -> Option<Self> {
        match data_type {
            DataType::Boolean => Some(Self::Boolean),
            DataType::Integer => Some(Self::Integer),
            DataType::Number => Some(Self::Number),
            DataType::String => Some(Self::String),
            DataType::DateTime => Some(Self::DateTime),
            DataType::Any => Some(Self::Any),
            DataType::Array(elem) => Self::for_type(&elem.data_type).map(|c| Self::Array(Box::new(c))),
            DataType::Object(_) | DataType::Named(_) => None,
        }
    }

    /// Kind name used in "invalid parameter type" errors.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::Any => "any",
            Self::Array(_) => "array",
        }
    }

    /// Go type of the coerced value.
    pub fn go_type(&self) -> String {
        match self {
            Self::Boolean => "bool".to_string(),
            Self::Integer => "int".to_string(),
            Self::Number => "float64".to_string(),
            Self::String => "string".to_string(),
            Self::DateTime => "time.Time".to_string(),
            Self::Any => "interface{}".to_string(),
            Self::Array(elem) => format!("[]{}", elem.go_type()),
        }
    }

    /// Go packages the rendered code refers to.
    pub fn imports(&self) -> Vec<&'static str> {
        match self {
            Self::Boolean | Self::Integer | Self::Number => vec!["strconv"],
            Self::DateTime => vec!["time"],
            Self::String | Self::Any => Vec::new(),
            Self::Array(elem) => {
                let mut imports = vec!["strings"];
                if **elem != Self::String {
                    imports.extend(elem.imports());
                }
                imports
            }
        }
    }

    /// Render the Go code parsing `raw<Stem>` into the target.
    ///
    /// Failures chain a `goa.InvalidParamTypeError` onto `err` and leave the
    /// target untouched. Array elements are coerced one by one inside a loop
    /// nested one level deeper.
    pub fn render(&self, data: &CoerceData<'_>, scope: &mut RenderScope<'_>) {
        for module in self.imports() {
            scope.import(module);
        }
        let raw = format!("raw{}", data.stem);
        let var = goify(&data.stem, false);

        match self {
            Self::Boolean => self.render_parsed(data, scope, &format!("strconv.ParseBool({})", raw), &var, None),
            Self::Integer => self.render_parsed(data, scope, &format!("strconv.Atoi({})", raw), &var, Some("int")),
            Self::Number => {
                self.render_parsed(data, scope, &format!("strconv.ParseFloat({}, 64)", raw), &var, None)
            }
            Self::DateTime => {
                self.render_parsed(data, scope, &format!("time.Parse(time.RFC3339, {})", raw), &var, None)
            }
            Self::String | Self::Any => {
                let amp = if data.pointer { "&" } else { "" };
                scope.code.push_line(&format!("{} = {}{}", data.target, amp, raw));
            }
            Self::Array(elem) => {
                let elems = format!("elems{}", data.stem);
                scope
                    .code
                    .push_line(&format!("{} := strings.Split({}, \",\")", elems, raw));
                if **elem == Self::String {
                    scope.code.push_line(&format!("{} = {}", data.target, elems));
                    return;
                }
                let typed = format!("{}2", elems);
                scope.code.push_line(&format!(
                    "{} := make({}, len({}))",
                    typed,
                    self.go_type(),
                    elems
                ));
                scope
                    .code
                    .push_line(&format!("for i, rawElem := range {} {{", elems));
                scope.code.push_indent();
                let elem_data = CoerceData {
                    name: data.name,
                    stem: "Elem".to_string(),
                    pointer: false,
                    target: format!("{}[i]", typed),
                };
                elem.render(&elem_data, scope);
                scope.code.push_dedent();
                scope.code.push_line("}");
                scope.code.push_line(&format!("{} = {}", data.target, typed));
            }
        }
    }

    fn render_parsed(
        &self,
        data: &CoerceData<'_>,
        scope: &mut RenderScope<'_>,
        call: &str,
        var: &str,
        convert: Option<&str>,
    ) {
        let value = match convert {
            Some(ty) => format!("{}({})", ty, var),
            None => var.to_string(),
        };
        scope
            .code
            .push_line(&format!("if {}, err2 := {}; err2 == nil {{", var, call));
        scope.code.push_indent();
        if data.pointer {
            let (holder, tmp) = match convert {
                Some(_) => {
                    let holder = scope.namer.temp();
                    let tmp = scope.namer.temp();
                    scope.code.push_line(&format!("{} := {}", tmp, value));
                    (holder, format!("&{}", tmp))
                }
                None => (scope.namer.temp(), format!("&{}", var)),
            };
            scope.code.push_line(&format!("{} := {}", holder, tmp));
            scope.code.push_line(&format!("{} = {}", data.target, holder));
        } else {
            scope.code.push_line(&format!("{} = {}", data.target, value));
        }
        scope.code.push_dedent();
        scope.code.push_line("} else {");
        scope.code.push_indent();
        scope.code.push_line(&format!(
            "err = goa.InvalidParamTypeError({:?}, raw{}, {:?}, err)",
            data.name,
            data.stem,
            self.expected()
        ));
        scope.code.push_dedent();
        scope.code.push_line("}");
    }

    /// Parse a raw string the way the rendered code does.
    ///
    /// Errors are appended to `errors`; the returned value is `None` when the
    /// raw string could not be parsed at all.
    pub fn apply(&self, name: &str, raw: &str, errors: &mut ParamErrors) -> Option<Value> {
        let invalid = |errors: &mut ParamErrors, expected: &'static str| {
            errors.push(ParamError::InvalidParamType {
                name: name.to_string(),
                value: raw.to_string(),
                expected,
            });
        };
        match self {
            Self::Boolean => match parse_bool(raw) {
                Some(b) => Some(Value::Bool(b)),
                None => {
                    invalid(errors, self.expected());
                    None
                }
            },
            Self::Integer => match raw.parse::<i64>() {
                Ok(i) => Some(Value::Int(i)),
                Err(_) => {
                    invalid(errors, self.expected());
                    None
                }
            },
            Self::Number => match parse_float(raw) {
                Some(n) => Some(Value::Number(n)),
                None => {
                    invalid(errors, self.expected());
                    None
                }
            },
            Self::DateTime => match parse_rfc3339(raw) {
                Some(dt) => Some(Value::DateTime(dt)),
                None => {
                    invalid(errors, self.expected());
                    None
                }
            },
            Self::String | Self::Any => Some(Value::String(raw.to_string())),
            Self::Array(elem) => {
                let slots = raw
                    .split(',')
                    .map(|segment| elem.apply(name, segment, errors))
                    .collect();
                Some(Value::Array(slots))
            }
        }
    }
}

/// The literals accepted by Go's `strconv.ParseBool`.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Go's `strconv.ParseFloat(raw, 64)`, including hexadecimal mantissas with
/// a binary exponent such as `0x1.8p1`. Out of range values are rejected.
fn parse_float(raw: &str) -> Option<f64> {
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if unsigned.starts_with(['+', '-']) {
        return None;
    }
    let value = match unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
        Some(hex) => parse_hex_float(hex)?,
        None => unsigned.parse::<f64>().ok()?,
    };
    let infinity = unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity");
    if value.is_infinite() && !infinity {
        return None;
    }
    Some(if negative { -value } else { value })
}

fn parse_hex_float(hex: &str) -> Option<f64> {
    let (mantissa, exponent) = hex.split_once(['p', 'P'])?;
    let exponent: i32 = exponent.parse().ok()?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let mut value = 0f64;
    for c in whole.chars().chain(fraction.chars()) {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let scale = exponent.checked_sub(i32::try_from(fraction.len()).ok()?.checked_mul(4)?)?;
    Some(value * 2f64.powi(scale))
}

/// Go's `time.Parse(time.RFC3339, raw)`: an uppercase `T` separator, four
/// digit years and either `Z` or a `±hh:mm` offset.
fn parse_rfc3339(raw: &str) -> Option<DateTime<FixedOffset>> {
    const LAYOUT: &[u8] = b"dddd-dd-ddTdd:dd:dd";
    let bytes = raw.as_bytes();
    if bytes.len() <= LAYOUT.len() {
        return None;
    }
    let matches_layout = bytes.iter().zip(LAYOUT).all(|(b, l)| match l {
        b'd' => b.is_ascii_digit(),
        _ => b == l,
    });
    if !matches_layout {
        return None;
    }
    let normalized = match raw.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => raw.to_string(),
    };
    DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f%:z").ok()
}
