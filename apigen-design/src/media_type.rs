//! Media types, views and user types.

use apigen_core::{to_pascal_case, to_title};
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{ApiDefinition, AttributeDefinition, DataType, Object};

/// Name of the view used when no view is requested.
pub const DEFAULT_VIEW: &str = "default";
/// Name of the reserved view used to render links.
pub const LINK_VIEW: &str = "link";
/// Name of the view entry that pulls in the links type.
pub const LINKS_ATTRIBUTE: &str = "links";

/// Errors raised while projecting a media type onto a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    #[error("media type '{media_type}' has no view '{view}'")]
    UnknownView { media_type: String, view: String },

    #[error("view '{view}' of media type '{media_type}' lists unknown attribute '{attribute}'")]
    UnknownAttribute {
        media_type: String,
        view: String,
        attribute: String,
    },

    #[error("media type '{media_type}' references unknown media type '{name}'")]
    UnknownMediaType { media_type: String, name: String },

    #[error("link '{link}' of media type '{media_type}' does not reference a media type")]
    InvalidLink { media_type: String, link: String },

    #[error("media type '{media_type}' must be an object or a collection to define views")]
    NotAnObject { media_type: String },
}

/// A named DSL type independent of any media type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserTypeDefinition {
    #[serde(skip)]
    pub type_name: String,
    pub description: Option<String>,
    pub attribute: AttributeDefinition,
}

impl UserTypeDefinition {
    pub fn new(type_name: impl Into<String>, attribute: AttributeDefinition) -> Self {
        Self {
            type_name: type_name.into(),
            description: None,
            attribute,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One attribute listed by a view, optionally rendered with a nested view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawViewAttribute")]
pub struct ViewAttribute {
    pub name: String,
    pub view: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawViewAttribute {
    Name(String),
    Detailed { name: String, view: Option<String> },
}

impl From<RawViewAttribute> for ViewAttribute {
    fn from(raw: RawViewAttribute) -> Self {
        match raw {
            RawViewAttribute::Name(name) => Self { name, view: None },
            RawViewAttribute::Detailed { name, view } => Self { name, view },
        }
    }
}

/// The ordered attributes rendered by a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ViewDefinition {
    pub attributes: Vec<ViewAttribute>,
}

impl ViewDefinition {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            attributes: names
                .into_iter()
                .map(|name| ViewAttribute {
                    name: name.into(),
                    view: None,
                })
                .collect(),
        }
    }

    /// Render an attribute with a nested view.
    pub fn with_nested(mut self, name: impl Into<String>, view: impl Into<String>) -> Self {
        self.attributes.push(ViewAttribute {
            name: name.into(),
            view: Some(view.into()),
        });
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }
}

fn default_link_view() -> String {
    LINK_VIEW.to_string()
}

/// A link to the media type held by one attribute of the parent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkDefinition {
    /// Parent attribute holding the linked media type, defaults to the link name.
    pub attribute: Option<String>,
    /// View used to render the linked media type.
    #[serde(default = "default_link_view")]
    pub view: String,
}

impl Default for LinkDefinition {
    fn default() -> Self {
        Self {
            attribute: None,
            view: default_link_view(),
        }
    }
}

/// A response body shape with named views.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaTypeDefinition {
    #[serde(skip)]
    pub identifier: String,
    /// Derived from the identifier when omitted.
    #[serde(default)]
    pub type_name: String,
    pub description: Option<String>,
    pub attribute: AttributeDefinition,
    #[serde(default)]
    pub views: IndexMap<String, ViewDefinition>,
    #[serde(default)]
    pub links: IndexMap<String, LinkDefinition>,
}

impl MediaTypeDefinition {
    pub fn new(
        identifier: impl Into<String>,
        type_name: impl Into<String>,
        attribute: AttributeDefinition,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            type_name: type_name.into(),
            description: None,
            attribute,
            views: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn view(mut self, name: impl Into<String>, view: ViewDefinition) -> Self {
        self.views.insert(name.into(), view);
        self
    }

    pub fn link(mut self, name: impl Into<String>, link: LinkDefinition) -> Self {
        self.links.insert(name.into(), link);
        self
    }

    /// The element media type name if this media type is a collection.
    pub fn collection_of(&self) -> Option<&str> {
        match &self.attribute.data_type {
            DataType::Array(elem) => match &elem.data_type {
                DataType::Named(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// The type name of the projection of this media type onto `view`.
    pub fn projected_type_name(&self, view: &str) -> String {
        if view == DEFAULT_VIEW {
            self.type_name.clone()
        } else {
            format!("{}{}", self.type_name, to_title(view))
        }
    }

    /// Views that produce a standalone type, in declaration order.
    ///
    /// Collections render the views of their element media type.
    pub fn rendered_views(&self, api: &ApiDefinition) -> Vec<String> {
        let views = match self.collection_of().and_then(|elem| api.media_type_by_name(elem)) {
            Some(elem) if elem.collection_of().is_none() => &elem.views,
            _ => &self.views,
        };
        views
            .keys()
            .filter(|name| *name != LINK_VIEW)
            .cloned()
            .collect()
    }

    /// Project this media type onto a view.
    ///
    /// Returns the projected media type and, when the view renders links, the
    /// links user type shared by every view of this media type.
    pub fn project(
        &self,
        api: &ApiDefinition,
        view: &str,
    ) -> Result<(MediaTypeDefinition, Option<UserTypeDefinition>), ProjectError> {
        if let Some(elem_name) = self.collection_of() {
            return self.project_collection(api, elem_name, view);
        }

        let view_def = self.views.get(view).ok_or_else(|| ProjectError::UnknownView {
            media_type: self.identifier.clone(),
            view: view.to_string(),
        })?;
        let fields = self
            .attribute
            .fields()
            .ok_or_else(|| ProjectError::NotAnObject {
                media_type: self.identifier.clone(),
            })?;

        let mut projected = Object::new();
        let mut links = None;
        for entry in &view_def.attributes {
            if entry.name == LINKS_ATTRIBUTE && !fields.contains_key(LINKS_ATTRIBUTE) {
                let links_type = self.links_type(api, view)?;
                projected.insert(
                    LINKS_ATTRIBUTE.to_string(),
                    AttributeDefinition::named(&links_type.type_name),
                );
                links = Some(links_type);
                continue;
            }
            let field = fields
                .get(&entry.name)
                .ok_or_else(|| ProjectError::UnknownAttribute {
                    media_type: self.identifier.clone(),
                    view: view.to_string(),
                    attribute: entry.name.clone(),
                })?;
            let nested_view = entry.view.as_deref().or(field.view.as_deref());
            let field = match nested_view {
                Some(nested) if nested != DEFAULT_VIEW => {
                    self.project_reference(api, field, nested)?
                }
                _ => field.clone(),
            };
            projected.insert(entry.name.clone(), field);
        }

        let keep = |names: &[String]| -> Vec<String> {
            names
                .iter()
                .filter(|n| projected.contains_key(*n))
                .cloned()
                .collect()
        };
        let required = keep(&self.attribute.required);
        let non_zero = keep(&self.attribute.non_zero);

        let mut attribute = self.attribute.clone();
        attribute.data_type = DataType::Object(projected);
        attribute.required = required;
        attribute.non_zero = non_zero;

        let mut views = IndexMap::new();
        views.insert(DEFAULT_VIEW.to_string(), view_def.clone());

        Ok((
            MediaTypeDefinition {
                identifier: self.view_identifier(view),
                type_name: self.projected_type_name(view),
                description: self.description.clone(),
                attribute,
                views,
                links: IndexMap::new(),
            },
            links,
        ))
    }

    fn view_identifier(&self, view: &str) -> String {
        if view == DEFAULT_VIEW {
            self.identifier.clone()
        } else {
            format!("{}; view={}", self.identifier, view)
        }
    }

    fn project_collection(
        &self,
        api: &ApiDefinition,
        elem_name: &str,
        view: &str,
    ) -> Result<(MediaTypeDefinition, Option<UserTypeDefinition>), ProjectError> {
        let elem = api
            .media_type_by_name(elem_name)
            .ok_or_else(|| ProjectError::UnknownMediaType {
                media_type: self.identifier.clone(),
                name: elem_name.to_string(),
            })?;
        let (elem_projected, elem_links) = elem.project(api, view)?;

        let attribute = AttributeDefinition {
            data_type: DataType::Array(Box::new(AttributeDefinition::named(
                &elem_projected.type_name,
            ))),
            ..self.attribute.clone()
        };
        let links = elem_links.map(|links| UserTypeDefinition {
            type_name: format!("{}Array", links.type_name),
            description: links.description.clone(),
            attribute: AttributeDefinition::array(AttributeDefinition::named(&links.type_name)),
        });

        Ok((
            MediaTypeDefinition {
                identifier: self.view_identifier(view),
                type_name: format!("{}Collection", elem_projected.type_name),
                description: self.description.clone(),
                attribute,
                views: IndexMap::new(),
                links: IndexMap::new(),
            },
            links,
        ))
    }

    /// Rewrite a reference to a media type so it points at the projected type.
    fn project_reference(
        &self,
        api: &ApiDefinition,
        field: &AttributeDefinition,
        view: &str,
    ) -> Result<AttributeDefinition, ProjectError> {
        let mut rewritten = field.clone();
        rewritten.view = None;
        match &field.data_type {
            DataType::Named(name) => {
                if let Some(mt) = api.media_type_by_name(name) {
                    let (projected, _) = mt.project(api, view)?;
                    rewritten.data_type = match projected.collection_of() {
                        Some(elem) => DataType::Array(Box::new(AttributeDefinition::named(elem))),
                        None => DataType::Named(projected.type_name),
                    };
                }
            }
            DataType::Array(elem) => {
                rewritten.data_type = DataType::Array(Box::new(self.project_reference(api, elem, view)?));
            }
            _ => {}
        }
        Ok(rewritten)
    }

    /// Build the `<TypeName>Links` user type holding every declared link.
    fn links_type(&self, api: &ApiDefinition, view: &str) -> Result<UserTypeDefinition, ProjectError> {
        if self.links.is_empty() {
            return Err(ProjectError::UnknownAttribute {
                media_type: self.identifier.clone(),
                view: view.to_string(),
                attribute: LINKS_ATTRIBUTE.to_string(),
            });
        }

        let mut fields = Object::new();
        for (name, link) in &self.links {
            let attribute_name = link.attribute.as_deref().unwrap_or(name);
            let invalid = || ProjectError::InvalidLink {
                media_type: self.identifier.clone(),
                link: name.clone(),
            };
            let target = match self.attribute.field(attribute_name).map(|f| &f.data_type) {
                Some(DataType::Named(target)) => target,
                _ => return Err(invalid()),
            };
            let linked = api.media_type_by_name(target).ok_or_else(invalid)?;
            let (projected, _) = linked.project(api, &link.view)?;
            let mut attribute = projected.attribute;
            attribute.description = linked.description.clone();
            fields.insert(name.clone(), attribute);
        }

        let type_name = format!("{}Links", self.type_name);
        Ok(UserTypeDefinition {
            description: Some(format!(
                "{} contains links to related resources of {}.",
                type_name, self.type_name
            )),
            type_name,
            attribute: AttributeDefinition::object(fields),
        })
    }
}

/// Derive a type name from a media type identifier
/// ("application/vnd.goa.bottle+json; view=tiny" -> "GoaBottle").
pub fn type_name_from_identifier(identifier: &str) -> String {
    let base = identifier.split(';').next().unwrap_or(identifier).trim();
    let subtype = base.rsplit('/').next().unwrap_or(base);
    let subtype = subtype.split('+').next().unwrap_or(subtype);
    let subtype = subtype.strip_prefix("vnd.").unwrap_or(subtype);
    to_pascal_case(&subtype.replace('.', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationDefinition;

    fn account() -> MediaTypeDefinition {
        MediaTypeDefinition::new(
            "application/vnd.account+json",
            "Account",
            AttributeDefinition::object([
                ("id", AttributeDefinition::new(DataType::Integer)),
                ("href", AttributeDefinition::new(DataType::String)),
                ("name", AttributeDefinition::new(DataType::String)),
            ])
            .required(["id", "href", "name"]),
        )
        .description("A tenant account")
        .view("default", ViewDefinition::new(["id", "href", "name"]))
        .view("tiny", ViewDefinition::new(["id", "name"]))
        .view("link", ViewDefinition::new(["id", "href"]))
    }

    fn bottle() -> MediaTypeDefinition {
        MediaTypeDefinition::new(
            "application/vnd.bottle+json",
            "Bottle",
            AttributeDefinition::object([
                ("id", AttributeDefinition::new(DataType::Integer)),
                ("href", AttributeDefinition::new(DataType::String)),
                (
                    "name",
                    AttributeDefinition::new(DataType::String).validation(ValidationDefinition {
                        min_length: Some(2),
                        ..Default::default()
                    }),
                ),
                ("vintage", AttributeDefinition::new(DataType::Integer)),
                ("account", AttributeDefinition::named("Account")),
            ])
            .required(["id", "href", "name", "vintage"]),
        )
        .view(
            "default",
            ViewDefinition::new(["id", "href", "name", "vintage", "links"]),
        )
        .view(
            "tiny",
            ViewDefinition::new(["id", "href", "name", "links"]).with_nested("account", "tiny"),
        )
        .view("link", ViewDefinition::new(["id", "href"]))
        .link("account", LinkDefinition::default())
    }

    fn api() -> ApiDefinition {
        let collection = MediaTypeDefinition::new(
            "application/vnd.bottle+json; type=collection",
            "BottleCollection",
            AttributeDefinition::array(AttributeDefinition::named("Bottle")),
        );
        ApiDefinition::new("cellar")
            .with_media_type(account())
            .with_media_type(bottle())
            .with_media_type(collection)
    }

    #[test]
    fn test_project_default_view() {
        let api = api();
        let (projected, links) = bottle().project(&api, "default").unwrap();

        assert_eq!(projected.type_name, "Bottle");
        assert_eq!(projected.identifier, "application/vnd.bottle+json");
        let fields = projected.attribute.fields().unwrap();
        assert_eq!(
            fields.keys().collect::<Vec<_>>(),
            vec!["id", "href", "name", "vintage", "links"]
        );
        assert_eq!(fields["links"].data_type, DataType::Named("BottleLinks".into()));
        assert!(fields["name"].validation.is_some());
        assert_eq!(projected.attribute.required, vec!["id", "href", "name", "vintage"]);

        let links = links.unwrap();
        assert_eq!(links.type_name, "BottleLinks");
        let account_link = links.attribute.field("account").unwrap();
        assert_eq!(
            account_link.fields().unwrap().keys().collect::<Vec<_>>(),
            vec!["id", "href"]
        );
    }

    #[test]
    fn test_project_named_view() {
        let api = api();
        let (projected, _) = bottle().project(&api, "tiny").unwrap();

        assert_eq!(projected.type_name, "BottleTiny");
        assert_eq!(projected.identifier, "application/vnd.bottle+json; view=tiny");
        assert_eq!(projected.attribute.required, vec!["id", "href", "name"]);
        assert_eq!(
            projected.attribute.field("account").unwrap().data_type,
            DataType::Named("AccountTiny".into())
        );
    }

    #[test]
    fn test_links_type_is_shared_across_views() {
        let api = api();
        let (_, default_links) = bottle().project(&api, "default").unwrap();
        let (_, tiny_links) = bottle().project(&api, "tiny").unwrap();
        let (_, link_links) = bottle().project(&api, "link").unwrap();

        assert_eq!(default_links, tiny_links);
        assert!(link_links.is_none());
    }

    #[test]
    fn test_project_collection() {
        let api = api();
        let collection = api
            .media_type_with_identifier("application/vnd.bottle+json; type=collection")
            .unwrap();
        let (projected, links) = collection.project(&api, "tiny").unwrap();

        assert_eq!(projected.type_name, "BottleTinyCollection");
        assert_eq!(
            projected.attribute.data_type,
            DataType::Array(Box::new(AttributeDefinition::named("BottleTiny")))
        );
        assert_eq!(links.unwrap().type_name, "BottleLinksArray");
    }

    #[test]
    fn test_project_unknown_view() {
        let err = account().project(&api(), "full").unwrap_err();
        assert_eq!(
            err,
            ProjectError::UnknownView {
                media_type: "application/vnd.account+json".into(),
                view: "full".into(),
            }
        );
    }

    #[test]
    fn test_project_unknown_attribute() {
        let mt = account().view("broken", ViewDefinition::new(["id", "owner"]));
        let err = mt.project(&api(), "broken").unwrap_err();
        assert!(matches!(err, ProjectError::UnknownAttribute { attribute, .. } if attribute == "owner"));
    }

    #[test]
    fn test_links_without_declared_links() {
        let mt = account().view("linked", ViewDefinition::new(["id", "links"]));
        let err = mt.project(&api(), "linked").unwrap_err();
        assert!(matches!(err, ProjectError::UnknownAttribute { attribute, .. } if attribute == "links"));
    }

    #[test]
    fn test_rendered_views_skip_link() {
        let api = api();
        assert_eq!(bottle().rendered_views(&api), vec!["default", "tiny"]);

        let collection = api
            .media_type_with_identifier("application/vnd.bottle+json; type=collection")
            .unwrap();
        assert_eq!(collection.rendered_views(&api), vec!["default", "tiny"]);
    }

    #[test]
    fn test_type_name_from_identifier() {
        assert_eq!(type_name_from_identifier("application/vnd.bottle+json"), "Bottle");
        assert_eq!(
            type_name_from_identifier("application/vnd.goa.example.bottle+json; view=tiny"),
            "GoaExampleBottle"
        );
        assert_eq!(type_name_from_identifier("text/plain"), "Plain");
    }
}
