//! Indentation of generated code.

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    /// A tab, as gofmt indents.
    #[default]
    Tab,
    /// A fixed number of spaces.
    Spaces(u8),
}

impl Indent {
    /// Indentation used for Go sources.
    pub const GO: Self = Self::Tab;

    /// Append `levels` levels of indentation to `buffer`.
    pub fn write(&self, buffer: &mut String, levels: usize) {
        match self {
            Self::Tab => buffer.extend(std::iter::repeat_n('\t', levels)),
            Self::Spaces(width) => buffer.extend(std::iter::repeat_n(' ', levels * *width as usize)),
        }
    }
}
