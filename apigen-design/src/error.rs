use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ProjectError;

/// Result type for design loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(design::io), help("pass the design file with --design <path>"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse design")]
    #[diagnostic(code(design::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{context} references unknown {kind} '{name}'")]
    #[diagnostic(code(design::unknown_reference))]
    UnknownReference {
        #[source_code]
        src: NamedSource<String>,
        #[label("referenced from here")]
        span: Option<SourceSpan>,
        context: String,
        kind: &'static str,
        name: String,
    },

    #[error("type name '{name}' is defined more than once")]
    #[diagnostic(
        code(design::duplicate_type),
        help("user types and media types share one namespace, rename one of them")
    )]
    DuplicateType {
        #[source_code]
        src: NamedSource<String>,
        #[label("defined again here")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("resource '{resource}' is its own ancestor")]
    #[diagnostic(code(design::parent_cycle))]
    ParentCycle {
        #[source_code]
        src: NamedSource<String>,
        resource: String,
    },

    #[error("invalid view in media type '{media_type}'")]
    #[diagnostic(code(design::invalid_view))]
    Projection {
        #[source_code]
        src: NamedSource<String>,
        media_type: String,
        #[source]
        source: ProjectError,
    },

    #[error("{message}")]
    #[diagnostic(code(design::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}

/// Source context for error reporting.
///
/// Encapsulates the source content and filename so validation code can build
/// diagnostics without threading both through every call.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Best effort span of the first occurrence of `needle` in the source.
    pub fn find(&self, needle: &str) -> Option<SourceSpan> {
        self.src
            .find(needle)
            .map(|offset| SourceSpan::from((offset, needle.len())))
    }

    pub fn unknown_reference(
        &self,
        context: impl Into<String>,
        kind: &'static str,
        name: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        Box::new(Error::UnknownReference {
            src: self.named_source(),
            span: self.find(&format!("\"{}\"", name)),
            context: context.into(),
            kind,
            name,
        })
    }

    pub fn duplicate_type(&self, name: impl Into<String>) -> Box<Error> {
        let name = name.into();
        Box::new(Error::DuplicateType {
            src: self.named_source(),
            span: self.find(&name),
            name,
        })
    }

    pub fn parent_cycle(&self, resource: impl Into<String>) -> Box<Error> {
        Box::new(Error::ParentCycle {
            src: self.named_source(),
            resource: resource.into(),
        })
    }

    pub fn projection(&self, media_type: impl Into<String>, source: ProjectError) -> Box<Error> {
        Box::new(Error::Projection {
            src: self.named_source(),
            media_type: media_type.into(),
            source,
        })
    }

    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }
}
