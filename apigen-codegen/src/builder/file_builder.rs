//! A source file body together with the imports it needs.

use crate::{CodeBuilder, ImportCollector, Indent};

/// Code of one file plus its imports.
///
/// Backends add the rendering of the import block and package clause on top
/// of it.
///
/// ```
/// use apigen_codegen::FileBuilder;
///
/// let builder = FileBuilder::go()
///     .add_module("fmt")
///     .with_code(|c| c.line("func main() {}"));
///
/// assert!(builder.imports.has_module("fmt"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileBuilder {
    pub imports: ImportCollector,
    pub code: CodeBuilder,
}

impl FileBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            imports: ImportCollector::new(),
            code: CodeBuilder::new(indent),
        }
    }

    pub fn go() -> Self {
        Self::new(Indent::GO)
    }

    pub fn add_module(mut self, module: &str) -> Self {
        self.imports.add_module(module);
        self
    }

    /// Extend the body in one expression.
    pub fn with_code(mut self, f: impl FnOnce(CodeBuilder) -> CodeBuilder) -> Self {
        self.code = f(self.code);
        self
    }

    pub fn has_imports(&self) -> bool {
        !self.imports.is_empty()
    }

    pub fn into_parts(self) -> (ImportCollector, CodeBuilder) {
        (self.imports, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_imports_and_code() {
        let builder = FileBuilder::go()
            .add_module("time")
            .add_module("github.com/goadesign/goa")
            .with_code(|c| c.line("var _ = time.RFC3339"));

        assert!(builder.has_imports());
        assert!(builder.imports.has_module("github.com/goadesign/goa"));
        assert_eq!(builder.code.as_str(), "var _ = time.RFC3339\n");
    }

    #[test]
    fn test_into_parts() {
        let (imports, code) = FileBuilder::default().with_code(|c| c.line("x")).into_parts();
        assert!(imports.is_empty());
        assert_eq!(code.build(), "x\n");
    }
}
