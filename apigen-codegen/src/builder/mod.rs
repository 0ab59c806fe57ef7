//! Building blocks for emitting source text.
//!
//! [`CodeBuilder`] accumulates indented lines, either directly or by applying
//! the [`CodeFragment`]s of a [`Renderable`] node. [`FileBuilder`] pairs a
//! builder with the imports the code needs.

mod code_builder;
mod file_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use file_builder::FileBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
