//! GoFile abstraction for template-driven Go file generation.
//!
//! A [`GoFile`] is one source unit being assembled. Emitters execute
//! [`Template`]s against it; each execution renders into a fresh
//! [`RenderScope`] whose code and imports are merged into the file only when
//! the template succeeds.

use apigen_codegen::{CodeBuilder, FileBuilder, ImportCollector};
use apigen_core::GENERATED_HEADER;
use apigen_design::ApiDefinition;
use eyre::{Result, WrapErr};
use tracing::debug;

use crate::{GoTypeMapper, Validator, namer::Namer, render::GoFileBuilder};

/// Import path of the goa runtime package.
pub const GOA_PACKAGE: &str = "github.com/goadesign/goa";

/// Services available to every template of a file.
pub struct RenderHelpers<'a> {
    pub api: &'a ApiDefinition,
    pub mapper: GoTypeMapper<'a>,
    pub validator: &'a dyn Validator,
    /// Import path of the package named by the mapper qualifier.
    pub default_import: Option<String>,
}

impl<'a> RenderHelpers<'a> {
    pub fn new(api: &'a ApiDefinition, mapper: GoTypeMapper<'a>, validator: &'a dyn Validator) -> Self {
        Self {
            api,
            mapper,
            validator,
            default_import: None,
        }
    }

    pub fn with_default_import(mut self, path: impl Into<String>) -> Self {
        self.default_import = Some(path.into());
        self
    }

    /// The aliased import of the default package when `code` refers to it.
    fn default_package_use(&self, code: &str) -> Option<(&str, &str)> {
        let alias = self.mapper.qualifier()?;
        let path = self.default_import.as_deref()?;
        mentions_package(code, alias).then_some((path, alias))
    }
}

/// Returns true if `code` contains a selector `<package>.` not preceded by an
/// identifier character.
fn mentions_package(code: &str, package: &str) -> bool {
    let selector = format!("{}.", package);
    code.match_indices(&selector).any(|(i, _)| {
        code[..i]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '.'))
    })
}

/// State of one template execution.
pub struct RenderScope<'s> {
    pub code: CodeBuilder,
    pub imports: ImportCollector,
    pub namer: Namer,
    pub helpers: &'s RenderHelpers<'s>,
}

impl<'s> RenderScope<'s> {
    pub fn new(helpers: &'s RenderHelpers<'s>) -> Self {
        Self {
            code: CodeBuilder::go(),
            imports: ImportCollector::new(),
            namer: Namer::new(),
            helpers,
        }
    }

    pub fn import(&mut self, module: &str) {
        self.imports.add_module(module);
    }
}

/// A named rendering unit taking `D` as input.
pub trait Template<D: ?Sized> {
    /// Name used in logs and error reports.
    fn name(&self) -> &'static str;

    /// Render the template into the scope.
    fn render(&self, data: &D, scope: &mut RenderScope<'_>) -> Result<()>;
}

/// A Go source file under construction.
#[derive(Debug, Clone)]
pub struct GoFile {
    package: String,
    builder: FileBuilder,
    sections: usize,
}

impl GoFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            builder: FileBuilder::go(),
            sections: 0,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn add_import(&mut self, module: &str) {
        self.builder.imports.add_module(module);
    }

    pub fn add_aliased_import(&mut self, module: &str, alias: &str) {
        self.builder.imports.add_aliased(module, alias);
    }

    /// Returns true if no template produced any code yet.
    pub fn is_empty(&self) -> bool {
        self.sections == 0
    }

    /// Execute a template and append its output to the file.
    pub fn execute<D: ?Sized, T: Template<D> + ?Sized>(
        &mut self,
        template: &T,
        data: &D,
        helpers: &RenderHelpers<'_>,
    ) -> Result<()> {
        let mut scope = RenderScope::new(helpers);
        template
            .render(data, &mut scope)
            .wrap_err_with(|| format!("failed to render template '{}'", template.name()))?;

        let code = scope.code.build();
        debug!(template = template.name(), package = %self.package, bytes = code.len(), "rendered template");
        self.builder.imports.merge(&scope.imports);
        if let Some((path, alias)) = helpers.default_package_use(&code) {
            self.builder.imports.add_aliased(path, alias);
        }
        if !code.trim().is_empty() {
            if self.sections > 0 {
                self.builder.code.push_blank();
            }
            self.builder.code.push_raw(&code);
            self.sections += 1;
        }
        Ok(())
    }

    /// Render the complete file with the generated-code header.
    pub fn render(&self) -> String {
        self.builder
            .clone()
            .render_go_with_header(&self.package, GENERATED_HEADER)
    }
}
