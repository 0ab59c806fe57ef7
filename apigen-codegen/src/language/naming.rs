//! Naming conventions for target languages.

/// Language-specific naming conventions.
///
/// Defines how design names map to exported and unexported identifiers and
/// how reserved words are escaped.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a design name to an exported identifier (e.g., "bottle_id" -> "BottleID")
    pub to_exported: fn(&str) -> String,
    /// Transform a design name to an unexported identifier (e.g., "bottle_id" -> "bottleID")
    pub to_unexported: fn(&str) -> String,
    /// Transform a design name to a file name (e.g., "BottleID" -> "bottle_id")
    pub to_file: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "type_")
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Exported identifier; these never collide with reserved words.
    pub fn exported_name(&self, name: &str) -> String {
        (self.to_exported)(name)
    }

    /// Unexported identifier, escaped when it is a reserved word.
    pub fn unexported_name(&self, name: &str) -> String {
        let transformed = (self.to_unexported)(name);
        self.safe_name(&transformed)
    }

    /// Transform for use as a file name.
    pub fn file_name(&self, name: &str) -> String {
        (self.to_file)(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper(s: &str) -> String {
        s.to_uppercase()
    }

    fn lower(s: &str) -> String {
        s.to_lowercase()
    }

    fn file(s: &str) -> String {
        format!("{}.go", s.to_lowercase())
    }

    fn escape(s: &str) -> String {
        format!("{}_", s)
    }

    const TEST: NamingConvention = NamingConvention {
        to_exported: upper,
        to_unexported: lower,
        to_file: file,
        reserved_words: &["type", "func"],
        escape_reserved: escape,
    };

    #[test]
    fn test_reserved_words_are_escaped() {
        assert!(TEST.is_reserved("type"));
        assert_eq!(TEST.unexported_name("TYPE"), "type_");
        assert_eq!(TEST.unexported_name("Name"), "name");
    }

    #[test]
    fn test_exported_and_file_names() {
        assert_eq!(TEST.exported_name("type"), "TYPE");
        assert_eq!(TEST.file_name("Hrefs"), "hrefs.go");
    }
}
