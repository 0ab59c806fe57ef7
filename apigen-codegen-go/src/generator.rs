use std::path::Path;

use apigen_codegen::{
    Diagnostic, FileEntry, FileRegistry, GenerateResult, LanguageCodegen, PreviewFile,
};
use apigen_core::GeneratedFile;
use apigen_design::{ApiDefinition, ApiVersionDefinition};
use eyre::{Result, eyre};
use tracing::{debug, info, warn};

use crate::{
    GoTypeMapper, RecursiveValidator,
    files::{ContextsGo, ControllersGo, Emitter, GoSource, HrefsGo, MediaTypesGo, UserTypesGo},
    go_file::RenderHelpers,
};

/// Options controlling where the generated package lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Name of the default package, also its directory under the output.
    pub package: String,
    /// Go import path of the default package, used by versioned packages.
    pub import_path: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            package: "app".to_string(),
            import_path: "app".to_string(),
        }
    }
}

/// Go code generator producing goa application glue code.
pub struct Generator<'a> {
    api: &'a ApiDefinition,
    options: GeneratorOptions,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "go"
    }

    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        let (registry, _) = self.render_files()?;
        Ok(registry.preview())
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let (registry, diagnostics) = self.render_files()?;
        let stats = registry.write_all(output_dir)?;
        info!(
            written = stats.written(),
            unchanged = stats.unchanged(),
            total = stats.total(),
            output = %output_dir.display(),
            "generated {} application", self.api.name
        );
        Ok(GenerateResult {
            written: stats.written_paths,
            unchanged: stats.unchanged_paths,
            diagnostics,
        })
    }
}

impl<'a> Generator<'a> {
    pub fn new(api: &'a ApiDefinition) -> Self {
        Self {
            api,
            options: GeneratorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Render every file of every version.
    ///
    /// A file whose templates fail is left out; the others are still
    /// rendered so that the returned error names every failed file.
    fn render_files(&self) -> Result<(FileRegistry, Vec<Diagnostic>)> {
        let validator = RecursiveValidator::new(self.api);
        let mut registry = FileRegistry::new();
        let mut diagnostics = Vec::new();
        let mut failures = Vec::new();

        for version in self.api.all_versions() {
            let (dir, package, helpers) = self.package_for(&version, &validator);
            for emitter in self.emitters(&version) {
                match GoSource::build(dir.as_str(), &package, emitter.as_ref(), &helpers) {
                    Ok(source) if source.is_empty() && !version.is_default() => {
                        debug!(path = %source.relative_path(), "skipped empty file");
                        diagnostics.push(
                            Diagnostic::info("generate", "nothing to generate")
                                .at(source.relative_path()),
                        );
                    }
                    Ok(source) => {
                        debug!(path = %source.relative_path(), "rendered file");
                        registry.register(FileEntry::new(source.relative_path(), source.render()));
                    }
                    Err(err) => {
                        warn!(error = ?err, "failed to render file");
                        failures.push(format!("{:#}", err));
                    }
                }
            }
        }

        if !failures.is_empty() {
            return Err(eyre!(
                "failed to generate {} file(s):\n  {}",
                failures.len(),
                failures.join("\n  ")
            ));
        }
        Ok((registry, diagnostics))
    }

    /// Directory, package name and helpers of the package of a version.
    fn package_for<'v>(
        &'v self,
        version: &ApiVersionDefinition,
        validator: &'v RecursiveValidator<'v>,
    ) -> (String, String, RenderHelpers<'v>) {
        let package = &self.options.package;
        if version.is_default() {
            let helpers = RenderHelpers::new(self.api, GoTypeMapper::new(self.api), validator);
            return (package.clone(), package.clone(), helpers);
        }
        let mapper = GoTypeMapper::new(self.api).qualified(package.as_str());
        let helpers = RenderHelpers::new(self.api, mapper, validator)
            .with_default_import(&self.options.import_path);
        (
            format!("{}/{}", package, version.package()),
            version.package(),
            helpers,
        )
    }

    fn emitters<'v>(&self, version: &'v ApiVersionDefinition) -> Vec<Box<dyn Emitter + 'v>> {
        let mut emitters: Vec<Box<dyn Emitter + 'v>> = vec![
            Box::new(ContextsGo::new(version)),
            Box::new(ControllersGo::new(version)),
            Box::new(HrefsGo::new(version)),
        ];
        if version.is_default() {
            emitters.push(Box::new(MediaTypesGo));
            emitters.push(Box::new(UserTypesGo));
        }
        emitters
    }
}
