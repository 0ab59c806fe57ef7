//! Go AST builders for generating type declarations and functions.
//!
//! These provide a high-level API for constructing Go syntax,
//! which can then be rendered via CodeBuilder.

mod funcs;
mod interfaces;
mod structs;

pub use funcs::{Func, Param};
pub use interfaces::{Interface, Method};
pub use structs::{Field, Struct};
pub(crate) use structs::{FieldRow, align_fields};

use apigen_codegen::CodeFragment;

/// Doc comment lines for a declaration, one `// ` line per source line.
pub(crate) fn doc_fragments(doc: &Option<String>) -> Vec<CodeFragment> {
    doc.iter()
        .flat_map(|doc| doc.lines().map(|line| CodeFragment::Comment(line.to_string())))
        .collect()
}
