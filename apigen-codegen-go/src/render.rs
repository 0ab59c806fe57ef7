//! Go-specific rendering utilities for code generation.

use apigen_codegen::{builder::FileBuilder, generation::ImportCollector};

/// Standard library packages have no dot in their first path element.
fn is_stdlib(module: &str) -> bool {
    !module.split('/').next().unwrap_or(module).contains('.')
}

fn import_lines(module: &str, aliases: &std::collections::BTreeSet<String>) -> Vec<String> {
    if aliases.is_empty() {
        vec![format!("\"{}\"", module)]
    } else {
        aliases
            .iter()
            .map(|alias| format!("{} \"{}\"", alias, module))
            .collect()
    }
}

/// Render imports as a Go import declaration.
///
/// Standard library packages come first, then a blank line and every other
/// package; both groups are sorted by path.
///
/// # Example
///
/// ```
/// use apigen_codegen::generation::ImportCollector;
/// use apigen_codegen_go::render_imports;
///
/// let mut imports = ImportCollector::new();
/// imports.add_module("github.com/goadesign/goa");
/// imports.add_module("strconv");
/// imports.add_module("fmt");
///
/// let rendered = render_imports(&imports);
/// assert_eq!(
///     rendered,
///     "import (\n\t\"fmt\"\n\t\"strconv\"\n\n\t\"github.com/goadesign/goa\"\n)"
/// );
/// ```
pub fn render_imports(imports: &ImportCollector) -> String {
    let mut std = Vec::new();
    let mut external = Vec::new();
    for (module, aliases) in imports.iter() {
        let group = if is_stdlib(module) { &mut std } else { &mut external };
        group.push((module, import_lines(module, aliases)));
    }
    std.sort_by(|a, b| a.0.cmp(b.0));
    external.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::from("import (\n");
    for (_, lines) in &std {
        for line in lines {
            out.push_str(&format!("\t{}\n", line));
        }
    }
    if !std.is_empty() && !external.is_empty() {
        out.push('\n');
    }
    for (_, lines) in &external {
        for line in lines {
            out.push_str(&format!("\t{}\n", line));
        }
    }
    out.push(')');
    out
}

/// Extension trait for FileBuilder with Go-specific rendering.
pub trait GoFileBuilder {
    /// Render the file as Go source code in the given package.
    fn render_go(self, package: &str) -> String;

    /// Render the file as Go source code with a header comment.
    fn render_go_with_header(self, package: &str, header: &str) -> String;
}

impl GoFileBuilder for FileBuilder {
    fn render_go(self, package: &str) -> String {
        let has_imports = self.has_imports();
        let (imports, code) = self.into_parts();
        let code_str = code.build();

        let mut out = format!("package {}\n", package);
        if has_imports {
            out.push('\n');
            out.push_str(&render_imports(&imports));
            out.push('\n');
        }
        if !code_str.is_empty() {
            out.push('\n');
            out.push_str(&code_str);
        }
        out
    }

    fn render_go_with_header(self, package: &str, header: &str) -> String {
        format!("{}\n\n{}", header, self.render_go(package))
    }
}
