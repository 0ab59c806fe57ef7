//! Language-agnostic code generation traits.

use std::path::Path;

use apigen_design::{AttributeDefinition, DataType};
use eyre::Result;

use crate::Diagnostic;

/// Trait for language-specific code generators.
///
/// Implement this trait to add support for generating API glue code in a new language.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "go")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "go")
    fn file_extension(&self) -> &'static str;

    /// Render every file without writing to disk
    fn preview(&self) -> Result<Vec<PreviewFile>>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files written because their content changed
    pub written: Vec<String>,
    /// Files left untouched because they were up to date
    pub unchanged: Vec<String>,
    /// Warnings collected while rendering
    pub diagnostics: Vec<Diagnostic>,
}

/// A generated file for preview
#[derive(Debug, Clone)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// Trait for mapping design types to language-specific type expressions.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Reference to a type, as used in signatures and variable declarations.
    fn type_ref(&self, data_type: &DataType) -> String;

    /// Type of an object field, a pointer when the field must tell absence
    /// from the zero value.
    fn field_type(&self, parent: &AttributeDefinition, name: &str) -> Option<String>;

    /// Full type definition of an attribute.
    fn type_def(&self, attribute: &AttributeDefinition) -> String;

    /// Name of a user or media type.
    fn type_name(&self, name: &str) -> String;
}
