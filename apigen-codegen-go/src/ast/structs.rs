//! Go struct type builder.

use apigen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::doc_fragments;

/// A field of a Go struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub tag: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            tag: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Struct tag, written between backquotes.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    fn row(&self) -> FieldRow {
        FieldRow::Field {
            name: self.name.clone(),
            ty: self.ty.clone(),
            tag: self.tag.clone(),
        }
    }
}

/// A line of a struct body, before column alignment.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldRow {
    /// A line that ends alignment, such as a comment or an embedded type.
    Text(String),
    Field {
        name: String,
        ty: String,
        tag: Option<String>,
    },
}

impl FieldRow {
    fn is_field(&self) -> bool {
        matches!(self, Self::Field { .. })
    }

    /// A field whose type spans several lines starts a new section after it.
    fn is_multiline(&self) -> bool {
        matches!(self, Self::Field { ty, .. } if ty.contains('\n'))
    }

    fn has_aligned_tag(&self) -> bool {
        matches!(self, Self::Field { tag: Some(_), .. }) && !self.is_multiline()
    }

    fn name_width(&self) -> usize {
        match self {
            Self::Field { name, .. } => name.chars().count(),
            Self::Text(_) => 0,
        }
    }

    fn ty_width(&self) -> usize {
        match self {
            Self::Field { ty, .. } => ty.chars().count(),
            Self::Text(_) => 0,
        }
    }
}

/// Lay out struct body rows the way gofmt does.
///
/// Names of consecutive fields share one column; types share a column over
/// each run of consecutive tagged fields. Comments, embedded types and
/// multi-line fields break the runs. The last cell of a line is not padded.
pub(crate) fn align_fields(rows: &[FieldRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len());
    for section in rows.chunk_by(|a, b| a.is_field() && b.is_field() && !a.is_multiline()) {
        let name_width = section.iter().map(FieldRow::name_width).max().unwrap_or(0);
        for run in section.chunk_by(|a, b| a.has_aligned_tag() && b.has_aligned_tag()) {
            let ty_width = run.iter().map(FieldRow::ty_width).max().unwrap_or(0);
            for row in run {
                let line = match row {
                    FieldRow::Text(text) => text.clone(),
                    FieldRow::Field { name, ty, tag: Some(tag) } if !row.is_multiline() => {
                        format!("{:<name_width$} {:<ty_width$} `{}`", name, ty, tag)
                    }
                    FieldRow::Field { name, ty, tag: Some(tag) } => {
                        format!("{:<name_width$} {} `{}`", name, ty, tag)
                    }
                    FieldRow::Field { name, ty, tag: None } => format!("{:<name_width$} {}", name, ty),
                };
                lines.push(line);
            }
        }
    }
    lines
}

/// Builder for `type Name struct { ... }` declarations.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    doc: Option<String>,
    embeds: Vec<String>,
    fields: Vec<Field>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            embeds: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Embed a type, listed before the named fields.
    pub fn embed(mut self, ty: impl Into<String>) -> Self {
        self.embeds.push(ty.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the struct as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = doc_fragments(&self.doc);
        if self.embeds.is_empty() && self.fields.is_empty() {
            fragments.push(CodeFragment::line(format!("type {} struct{{}}", self.name)));
            return fragments;
        }

        let mut rows: Vec<FieldRow> = self.embeds.iter().cloned().map(FieldRow::Text).collect();
        for field in &self.fields {
            rows.extend(
                field
                    .doc
                    .iter()
                    .flat_map(|doc| doc.lines().map(|line| FieldRow::Text(format!("// {}", line)))),
            );
            rows.push(field.row());
        }
        let body = align_fields(&rows).into_iter().map(CodeFragment::line).collect();
        fragments.push(CodeFragment::braced(format!("type {} struct", self.name), body));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_struct() {
        assert_eq!(Struct::new("Empty").build(), "type Empty struct{}\n");
    }

    #[test]
    fn test_context_struct() {
        let s = Struct::new("ShowBottleContext")
            .doc("ShowBottleContext provides the bottle show action context.")
            .embed("*goa.Context")
            .field(Field::new("BottleID", "int"))
            .build();
        assert_eq!(
            s,
            "// ShowBottleContext provides the bottle show action context.\ntype ShowBottleContext struct {\n\t*goa.Context\n\tBottleID int\n}\n"
        );
    }

    #[test]
    fn test_fields_are_aligned() {
        let s = Struct::new("ShowBottleContext")
            .embed("*goa.Context")
            .field(Field::new("ID", "int"))
            .field(Field::new("Page", "*int"))
            .field(Field::new("Payload", "*CreateBottlePayload"))
            .build();
        assert_eq!(
            s,
            "type ShowBottleContext struct {\n\t*goa.Context\n\tID      int\n\tPage    *int\n\tPayload *CreateBottlePayload\n}\n"
        );
    }

    #[test]
    fn test_align_tag_runs() {
        let field = |name: &str, ty: &str, tag: Option<&str>| FieldRow::Field {
            name: name.to_string(),
            ty: ty.to_string(),
            tag: tag.map(str::to_string),
        };
        let rows = vec![
            field("Color", "string", Some("json:\"color\"")),
            field("Vintage", "*int", Some("json:\"vintage,omitempty\"")),
            field("Sweet", "bool", None),
            field("Name", "string", Some("json:\"name\"")),
            FieldRow::Text("// Origin of the wine".to_string()),
            field("Country", "*string", Some("json:\"country,omitempty\"")),
        ];

        assert_eq!(
            align_fields(&rows),
            vec![
                "Color   string `json:\"color\"`",
                "Vintage *int   `json:\"vintage,omitempty\"`",
                "Sweet   bool",
                "Name    string `json:\"name\"`",
                "// Origin of the wine",
                "Country *string `json:\"country,omitempty\"`",
            ]
        );
    }

    #[test]
    fn test_multiline_field_starts_new_section() {
        let rows = vec![
            FieldRow::Field {
                name: "ID".to_string(),
                ty: "int".to_string(),
                tag: Some("json:\"id\"".to_string()),
            },
            FieldRow::Field {
                name: "Origin".to_string(),
                ty: "struct {\n\t\tCountry string\n\t}".to_string(),
                tag: Some("json:\"origin\"".to_string()),
            },
            FieldRow::Field {
                name: "Rating".to_string(),
                ty: "int".to_string(),
                tag: None,
            },
        ];

        assert_eq!(
            align_fields(&rows),
            vec![
                "ID     int `json:\"id\"`",
                "Origin struct {\n\t\tCountry string\n\t} `json:\"origin\"`",
                "Rating int",
            ]
        );
    }

    #[test]
    fn test_field_doc_and_tag() {
        let s = Struct::new("Bottle")
            .field(
                Field::new("Name", "*string")
                    .doc("Name of bottle")
                    .tag("json:\"name,omitempty\""),
            )
            .build();
        assert!(s.contains("\t// Name of bottle\n\tName *string `json:\"name,omitempty\"`\n"));
    }
}
