//! Go backend of apigen.
//!
//! Turns an [`ApiDefinition`](apigen_design::ApiDefinition) into the glue code
//! of a goa application: request contexts, controller interfaces and their
//! mount functions, payload decoders, href builders, media types and user
//! types.
//!
//! ```no_run
//! use apigen_codegen_go::{Generator, LanguageCodegen};
//! use apigen_design::ApiDefinition;
//!
//! # fn main() -> eyre::Result<()> {
//! let api = ApiDefinition::from_file("design.toml")?;
//! let result = Generator::new(&api).generate(std::path::Path::new("."))?;
//! println!("{} files written", result.written.len());
//! # Ok(())
//! # }
//! ```

mod coerce;
mod errors;
mod generator;
mod go_file;
mod namer;
mod naming;
mod projector;
mod render;
mod type_mapper;
mod validation;

pub mod ast;
pub mod data;
pub mod files;
pub mod templates;

pub use apigen_codegen::{GenerateResult, LanguageCodegen, PreviewFile};
pub use coerce::{CoerceData, Coercion, Value};
pub use data::{ContextData, Evaluation, RawRequest};
pub use errors::{ParamError, ParamErrors};
pub use generator::{Generator, GeneratorOptions};
pub use go_file::{GOA_PACKAGE, GoFile, RenderHelpers, RenderScope, Template};
pub use namer::Namer;
pub use naming::{GO_NAMING, goify};
pub use projector::{Projections, project_views};
pub use render::{GoFileBuilder, render_imports};
pub use type_mapper::GoTypeMapper;
pub use validation::{RecursiveValidator, Validator};
