//! Case conversions shared by the design model and the backends.

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// `list_bottles` and `list-bottles` become `ListBottles`.
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-']).map(capitalize).collect()
}

/// `MediaTypes` becomes `media_types`; dashes turn into underscores.
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.char_indices() {
        match c {
            '-' => out.push('_'),
            c if c.is_uppercase() => {
                if i > 0 {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
            }
            c => out.push(c),
        }
    }
    out
}

/// Capitalizes each space separated word: `full view` becomes `Full View`.
pub fn to_title(s: &str) -> String {
    s.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}
