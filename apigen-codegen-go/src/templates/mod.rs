//! Templates turning template data into Go source.
//!
//! Each template is a small strategy executed through
//! [`GoFile::execute`](crate::GoFile::execute); the emitters in
//! [`files`](crate::files) decide which templates run for each file.

mod context;
mod controller;
mod resource;
mod types;

pub use context::{ContextTemplate, NewContextTemplate, PayloadTemplate, ResponsesTemplate};
pub use controller::{ControllerTemplate, MountTemplate, UnmarshalTemplate};
pub use resource::HrefTemplate;
pub use types::{MediaTypeTemplate, UserTypeTemplate};
