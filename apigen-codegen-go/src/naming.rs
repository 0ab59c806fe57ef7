//! Go-specific naming conventions.

use apigen_codegen::NamingConvention;
use apigen_core::to_snake_case;

/// Common initialisms kept upper-case in Go identifiers.
const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "OK", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XSRF", "XSS",
];

fn is_separator(c: char) -> bool {
    !c.is_ascii_alphanumeric()
}

fn camel(name: &str, exported: bool) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in name.split(is_separator).filter(|w| !w.is_empty()).enumerate() {
        let upper = word.to_ascii_uppercase();
        let first = i == 0 && !exported;
        if INITIALISMS.contains(&upper.as_str()) {
            if first {
                out.push_str(&word.to_ascii_lowercase());
            } else {
                out.push_str(&upper);
            }
            continue;
        }
        let mut chars = word.chars();
        if let Some(c) = chars.next() {
            if first {
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c.to_ascii_uppercase());
            }
            out.extend(chars);
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

fn exported(name: &str) -> String {
    camel(name, true)
}

fn unexported(name: &str) -> String {
    camel(name, false)
}

fn go_file(name: &str) -> String {
    format!("{}.go", to_snake_case(name))
}

fn escape_go_reserved(name: &str) -> String {
    format!("{}_", name)
}

/// Go naming conventions.
pub const GO_NAMING: NamingConvention = NamingConvention {
    to_exported: exported,
    to_unexported: unexported,
    to_file: go_file,
    reserved_words: &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
        "return", "select", "struct", "switch", "type", "var",
    ],
    escape_reserved: escape_go_reserved,
};

/// Turn a design name into a Go identifier.
///
/// Words are split on any non alphanumeric character, existing inner casing
/// is kept and initialisms are upper-cased (`bottle_id` -> `BottleID`).
/// Unexported identifiers that collide with a Go keyword get a trailing `_`.
pub fn goify(name: &str, exported: bool) -> String {
    if exported {
        GO_NAMING.exported_name(name)
    } else {
        GO_NAMING.unexported_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goify_exported() {
        assert_eq!(goify("bottle", true), "Bottle");
        assert_eq!(goify("bottle_id", true), "BottleID");
        assert_eq!(goify("accountID", true), "AccountID");
        assert_eq!(goify("created-at", true), "CreatedAt");
        assert_eq!(goify("http_url", true), "HTTPURL");
        assert_eq!(goify("list bottles", true), "ListBottles");
    }

    #[test]
    fn test_goify_unexported() {
        assert_eq!(goify("Bottle", false), "bottle");
        assert_eq!(goify("id", false), "id");
        assert_eq!(goify("api_key", false), "apiKey");
        assert_eq!(goify("type", false), "type_");
        assert_eq!(goify("range", false), "range_");
    }

    #[test]
    fn test_goify_leading_digit() {
        assert_eq!(goify("1st", true), "_1st");
        assert_eq!(goify("--", true), "_");
    }

    #[test]
    fn test_go_file_name() {
        assert_eq!(GO_NAMING.file_name("MediaTypes"), "media_types.go");
        assert!(GO_NAMING.is_reserved("func"));
        assert!(!GO_NAMING.is_reserved("bottle"));
    }
}
