//! Code fragments produced by AST nodes.
//!
//! Nodes describe their code as [`CodeFragment`]s; the
//! [`CodeBuilder`](super::CodeBuilder) applies them at its current
//! indentation.

/// A piece of generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code.
    Line(String),
    /// An empty line.
    Blank,
    /// A header line, an indented body and an optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// A line comment (`// text`).
    Comment(String),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// A `header {` ... `}` block, the shape of every Go body.
    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>) -> Self {
        Self::Block {
            header: format!("{} {{", header.into()),
            body,
            close: Some("}".to_string()),
        }
    }

    pub fn comment(s: impl Into<String>) -> Self {
        Self::Comment(s.into())
    }
}

/// A node that renders to code fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}

impl Renderable for CodeFragment {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braced_block() {
        let block = CodeFragment::braced("if err != nil", vec![CodeFragment::line("return err")]);
        assert_eq!(
            block,
            CodeFragment::Block {
                header: "if err != nil {".to_string(),
                body: vec![CodeFragment::Line("return err".to_string())],
                close: Some("}".to_string()),
            }
        );
    }

    #[test]
    fn test_fragment_renders_itself() {
        let comment = CodeFragment::comment("Identifier: application/vnd.bottle+json");
        assert_eq!(comment.to_fragments(), vec![comment.clone()]);
    }
}
