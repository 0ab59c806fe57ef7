//! Request errors reported by generated context factories.
//!
//! The generated Go code chains goa errors onto a running `err`; this module
//! models the same aggregate so the parsing rules can be exercised from Rust.

use std::fmt;

use thiserror::Error;

/// One problem found while building an action context from a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("missing required HTTP header \"{name}\"")]
    MissingHeader { name: String },

    #[error("missing required parameter \"{name}\"")]
    MissingParam { name: String },

    #[error("invalid value \"{value}\" for parameter \"{name}\", must be a {expected}")]
    InvalidParamType {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("invalid value for \"{name}\": {message}")]
    ValidationFailed { name: String, message: String },
}

impl ParamError {
    /// Name of the header or parameter the error is about.
    pub fn name(&self) -> &str {
        match self {
            Self::MissingHeader { name }
            | Self::MissingParam { name }
            | Self::InvalidParamType { name, .. }
            | Self::ValidationFailed { name, .. } => name,
        }
    }
}

/// Every error found in one request, in the order the fields are declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamErrors {
    errors: Vec<ParamError>,
}

impl ParamErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ParamError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamError> {
        self.errors.iter()
    }

    /// `Ok(value)` when no error was collected.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ParamErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParamErrors {}

impl IntoIterator for ParamErrors {
    type Item = ParamError;
    type IntoIter = std::vec::IntoIter<ParamError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_keep_order() {
        let mut errors = ParamErrors::new();
        errors.push(ParamError::MissingParam { name: "id".into() });
        errors.push(ParamError::InvalidParamType {
            name: "page".into(),
            value: "x".into(),
            expected: "integer",
        });

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "missing required parameter \"id\"; invalid value \"x\" for parameter \"page\", must be a integer"
        );
        let names: Vec<_> = errors.iter().map(|e| e.name().to_string()).collect();
        assert_eq!(names, vec!["id", "page"]);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ParamErrors::new().into_result(3), Ok(3));

        let mut errors = ParamErrors::new();
        errors.push(ParamError::MissingHeader {
            name: "Authorization".into(),
        });
        assert!(errors.into_result(()).is_err());
    }
}
