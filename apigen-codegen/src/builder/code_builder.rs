//! Indentation-aware accumulation of source lines.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates lines of code at a tracked indentation level.
///
/// Emitters thread one builder through many calls with the `push_*`
/// methods. The chaining methods (`line`, `block`, ...) wrap them for small
/// snippets built in one expression.
///
/// ```
/// use apigen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::go();
/// builder
///     .push_line("if err != nil {")
///     .push_indent()
///     .push_line("return err")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(builder.build(), "if err != nil {\n\treturn err\n}\n");
///
/// let code = CodeBuilder::go()
///     .block("func main()", |b| b.line("run()"))
///     .build();
/// assert_eq!(code, "func main() {\n\trun()\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// A builder indenting with tabs.
    pub fn go() -> Self {
        Self::new(Indent::GO)
    }

    /// Append a line at the current level. Empty lines carry no indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.indent.write(&mut self.buffer, self.level);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Append every line of a multi-line snippet at the current level.
    pub fn push_lines(&mut self, s: &str) -> &mut Self {
        s.lines().for_each(|line| {
            self.push_line(line);
        });
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Append text verbatim, without indentation or newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.push_line(&format!("// {}", text))
    }

    /// Append the fragments of a node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply(fragment);
        }
        self
    }

    fn apply(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Comment(text) => {
                self.push_comment(&text);
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header).push_indent();
                body.into_iter().for_each(|f| self.apply(f));
                self.push_dedent();
                if let Some(close) = close {
                    self.push_line(&close);
                }
            }
        }
    }

    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    pub fn lines(mut self, s: &str) -> Self {
        self.push_lines(s);
        self
    }

    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Append a `header {` block closed by `}`.
    pub fn block(self, header: &str, body: impl FnOnce(Self) -> Self) -> Self {
        let opened = self.line(&format!("{} {{", header)).indent();
        body(opened).dedent().line("}")
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.push_comment(text);
        self
    }

    pub fn build(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}
