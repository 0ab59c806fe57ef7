//! The API root definition and its lookups.

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    AttributeDefinition, Error, MediaTypeDefinition, ResourceDefinition, Result,
    UserTypeDefinition, media_type::type_name_from_identifier, validate::DesignValidator,
};

/// Default file name used in error reports when parsing from a string.
pub const DEFAULT_FILENAME: &str = "design.toml";

/// Package used when the design declares no encoder or decoder.
pub const DEFAULT_ENCODING_PACKAGE: &str = "github.com/goadesign/goa/encoding/json";

/// An API version and the base path its resources live under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiVersionDefinition {
    /// Version name, empty for the default version.
    #[serde(default)]
    pub version: String,
    pub base_path: Option<String>,
}

impl ApiVersionDefinition {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            base_path: None,
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn is_default(&self) -> bool {
        self.version.is_empty()
    }

    /// Base path of the version, falling back to the API base path.
    pub fn base_path<'a>(&'a self, api: &'a ApiDefinition) -> &'a str {
        self.base_path.as_deref().unwrap_or(&api.base_path)
    }

    /// Name of the package holding the version code ("1.0" -> "v1_0").
    pub fn package(&self) -> String {
        let sanitized: String = self
            .version
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        if sanitized.starts_with(|c: char| c.is_ascii_alphabetic()) {
            sanitized
        } else {
            format!("v{}", sanitized)
        }
    }
}

fn default_factory() -> String {
    "Factory".to_string()
}

/// An encoder or decoder package registered on the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncodingDefinition {
    pub package_path: String,
    /// Package level function returning the encoder or decoder factory.
    #[serde(default = "default_factory")]
    pub factory: String,
    pub mime_types: Vec<String>,
    #[serde(default)]
    pub default: bool,
}

impl EncodingDefinition {
    pub fn new(
        package_path: impl Into<String>,
        mime_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            package_path: package_path.into(),
            factory: default_factory(),
            mime_types: mime_types.into_iter().map(Into::into).collect(),
            default: false,
        }
    }

    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Name of the Go package, the last segment of its path.
    pub fn package_name(&self) -> &str {
        self.package_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.package_path)
    }

    fn json() -> Self {
        Self::new(DEFAULT_ENCODING_PACKAGE, ["application/json"]).as_default()
    }
}

/// A type reachable by name from an attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NamedType<'a> {
    User(&'a UserTypeDefinition),
    Media(&'a MediaTypeDefinition),
}

impl<'a> NamedType<'a> {
    pub fn type_name(&self) -> &'a str {
        match self {
            Self::User(ut) => &ut.type_name,
            Self::Media(mt) => &mt.type_name,
        }
    }

    pub fn attribute(&self) -> &'a AttributeDefinition {
        match self {
            Self::User(ut) => &ut.attribute,
            Self::Media(mt) => &mt.attribute,
        }
    }
}

/// Root of a design.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiDefinition {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub base_path: String,
    /// Non-default versions.
    #[serde(default)]
    pub versions: Vec<ApiVersionDefinition>,
    #[serde(default)]
    pub encoders: Vec<EncodingDefinition>,
    #[serde(default)]
    pub decoders: Vec<EncodingDefinition>,
    /// Media types keyed by identifier.
    #[serde(default)]
    pub media_types: IndexMap<String, MediaTypeDefinition>,
    /// User types keyed by type name.
    #[serde(default)]
    pub types: IndexMap<String, UserTypeDefinition>,
    #[serde(default)]
    pub resources: IndexMap<String, ResourceDefinition>,
}

impl FromStr for ApiDefinition {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, DEFAULT_FILENAME)
    }
}

impl ApiDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Load and validate a design file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a design with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let mut api: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        api.normalize();
        DesignValidator::new(content, filename).validate(&api)?;
        Ok(api)
    }

    /// Copy map keys into the definitions they index.
    pub fn normalize(&mut self) {
        for (identifier, mt) in &mut self.media_types {
            mt.identifier = identifier.clone();
            if mt.type_name.is_empty() {
                mt.type_name = type_name_from_identifier(identifier);
            }
        }
        for (name, ut) in &mut self.types {
            ut.type_name = name.clone();
        }
        for (name, resource) in &mut self.resources {
            resource.name = name.clone();
            for (action_name, action) in &mut resource.actions {
                action.name = action_name.clone();
                for (response_name, response) in &mut action.responses {
                    response.name = response_name.clone();
                }
            }
        }
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_version(mut self, version: ApiVersionDefinition) -> Self {
        self.versions.push(version);
        self
    }

    pub fn with_encoder(mut self, encoder: EncodingDefinition) -> Self {
        self.encoders.push(encoder);
        self
    }

    pub fn with_decoder(mut self, decoder: EncodingDefinition) -> Self {
        self.decoders.push(decoder);
        self
    }

    pub fn with_media_type(mut self, mt: MediaTypeDefinition) -> Self {
        self.media_types.insert(mt.identifier.clone(), mt);
        self
    }

    pub fn with_type(mut self, ut: UserTypeDefinition) -> Self {
        self.types.insert(ut.type_name.clone(), ut);
        self
    }

    pub fn with_resource(mut self, resource: ResourceDefinition) -> Self {
        self.resources.insert(resource.name.clone(), resource);
        self
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceDefinition> {
        self.resources.get(name)
    }

    /// Look up a media type by identifier, ignoring parameters other than `type`.
    pub fn media_type_with_identifier(&self, identifier: &str) -> Option<&MediaTypeDefinition> {
        self.media_types.get(identifier).or_else(|| {
            let base = identifier.split(';').next().unwrap_or(identifier).trim();
            self.media_types.get(base)
        })
    }

    pub fn media_type_by_name(&self, type_name: &str) -> Option<&MediaTypeDefinition> {
        self.media_types.values().find(|mt| mt.type_name == type_name)
    }

    pub fn user_type(&self, type_name: &str) -> Option<&UserTypeDefinition> {
        self.types.get(type_name)
    }

    /// Resolve a type name, user types first.
    pub fn named_type(&self, type_name: &str) -> Option<NamedType<'_>> {
        self.user_type(type_name)
            .map(NamedType::User)
            .or_else(|| self.media_type_by_name(type_name).map(NamedType::Media))
    }

    /// Resolve a type name as it appears in generated code.
    ///
    /// Besides user types this covers every media type projection and the
    /// links types built while projecting.
    pub fn rendered_type(&self, type_name: &str) -> Option<AttributeDefinition> {
        if let Some(ut) = self.user_type(type_name) {
            return Some(ut.attribute.clone());
        }
        for mt in self.media_types.values() {
            for view in mt.rendered_views(self) {
                let Ok((projected, links)) = mt.project(self, &view) else {
                    continue;
                };
                if projected.type_name == type_name {
                    return Some(projected.attribute);
                }
                if let Some(links) = links
                    && links.type_name == type_name
                {
                    return Some(links.attribute);
                }
            }
        }
        None
    }

    /// The default version, rooted at the API base path.
    pub fn default_version(&self) -> ApiVersionDefinition {
        ApiVersionDefinition::default()
    }

    pub fn version(&self, name: &str) -> Option<&ApiVersionDefinition> {
        self.versions.iter().find(|v| v.version == name)
    }

    /// The version a resource belongs to.
    pub fn version_of(&self, resource: &ResourceDefinition) -> ApiVersionDefinition {
        resource
            .version
            .as_deref()
            .and_then(|name| self.version(name))
            .cloned()
            .unwrap_or_else(|| self.default_version())
    }

    /// Every version, the default one first.
    pub fn all_versions(&self) -> Vec<ApiVersionDefinition> {
        std::iter::once(self.default_version())
            .chain(self.versions.iter().filter(|v| !v.is_default()).cloned())
            .collect()
    }

    /// Resources belonging to a version, in declaration order.
    pub fn resources_for<'a>(
        &'a self,
        version: &'a ApiVersionDefinition,
    ) -> impl Iterator<Item = &'a ResourceDefinition> + 'a {
        self.resources.values().filter(move |r| r.belongs_to(version))
    }

    /// Declared encoders, or the JSON encoder when none is declared.
    pub fn encoders(&self) -> Vec<EncodingDefinition> {
        if self.encoders.is_empty() {
            vec![EncodingDefinition::json()]
        } else {
            self.encoders.clone()
        }
    }

    /// Declared decoders, or the JSON decoder when none is declared.
    pub fn decoders(&self) -> Vec<EncodingDefinition> {
        if self.decoders.is_empty() {
            vec![EncodingDefinition::json()]
        } else {
            self.decoders.clone()
        }
    }
}
