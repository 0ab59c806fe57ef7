//! Shared code generation utilities for apigen.
//!
//! This crate provides language-agnostic abstractions and utilities
//! used by language-specific code generators (e.g., `apigen-codegen-go`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`generation`] - Output management (FileRegistry, ImportCollector, etc.)
//! - [`language`] - Language-specific abstractions (LanguageCodegen, TypeMapper, etc.)
//! - [`lint`] - Design lints run before generation
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod generation;
pub mod language;
pub mod lint;

mod diagnostic;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::{CodeBuilder, CodeFragment, FileBuilder, Indent, Renderable};
pub use diagnostic::{Diagnostic, Severity};
pub use generation::{FileEntry, FileRegistry, ImportCollector, WriteStats};
pub use language::{GenerateResult, LanguageCodegen, NamingConvention, PreviewFile, TypeMapper};
pub use lint::{Lint, default_lints, run_lints};
