//! Gen operation - code generation from a design.

use std::path::Path;

use apigen_codegen::{LanguageCodegen, default_lints, run_lints};
use apigen_codegen_go::{Generator, GeneratorOptions};
use apigen_design::ApiDefinition;
use eyre::{Context, Result};
use tracing::debug;

use crate::reports::{GenerateReport, GenerationResult, WrittenResult};

/// Options for the gen operation.
pub struct GenerateOptions<'a> {
    /// Output directory for generated code.
    pub output_dir: &'a Path,
    /// Package layout of the generated code.
    pub generator: GeneratorOptions,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the gen operation.
///
/// Lint errors abort before anything is generated; warnings are reported.
pub fn generate(api: &ApiDefinition, opts: GenerateOptions<'_>) -> Result<GenerateReport> {
    let diagnostics = run_lints(api, &default_lints());
    if let Some(error) = diagnostics.iter().find(|d| d.severity.is_error()) {
        eyre::bail!("design has errors: {}", error);
    }
    let warnings = diagnostics
        .into_iter()
        .filter(|d| d.severity.is_warning())
        .collect();

    debug!(package = %opts.generator.package, import_path = %opts.generator.import_path, "generating");
    let generator = Generator::new(api).with_options(opts.generator);
    let result = if opts.dry_run {
        GenerationResult::Preview(generator.preview().wrap_err("Failed to generate code")?)
    } else {
        let generated = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to generate code")?;
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written: generated.written,
            unchanged: generated.unchanged,
            notes: generated.diagnostics,
        })
    };

    Ok(GenerateReport {
        api_name: api.name.clone(),
        warnings,
        result,
    })
}
