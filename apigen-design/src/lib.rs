//! Design model for the apigen code generator.
//!
//! A design describes a web API: its resources and actions, the routes that
//! reach them, the parameters and payloads they accept and the media types
//! they respond with.
//!
//! # Architecture
//!
//! ```text
//! design.toml (TOML) → apigen-design (model + validation) → apigen-codegen-go → app/*.go
//! ```
//!
//! Designs are usually loaded with [`ApiDefinition::from_file`], which parses
//! the document and checks every cross reference. The builder methods on each
//! definition allow constructing designs in code.

mod api;
mod attribute;
mod error;
mod media_type;
mod resource;
mod route;
mod validate;

pub use api::{
    ApiDefinition, ApiVersionDefinition, DEFAULT_ENCODING_PACKAGE, DEFAULT_FILENAME,
    EncodingDefinition, NamedType,
};
pub use attribute::{AttributeDefinition, DataType, Literal, Object, ValidationDefinition};
pub use error::{Error, Result, SourceContext};
pub use media_type::{
    DEFAULT_VIEW, LINK_VIEW, LINKS_ATTRIBUTE, LinkDefinition, MediaTypeDefinition, ProjectError,
    UserTypeDefinition, ViewAttribute, ViewDefinition, type_name_from_identifier,
};
pub use resource::{ActionDefinition, ResourceDefinition, ResponseDefinition};
pub use route::{RouteDefinition, clean_path, join_paths, path_params, path_template};
pub use validate::DesignValidator;
