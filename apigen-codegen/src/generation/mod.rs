//! Code generation outputs and file management.
//!
//! - [`ImportCollector`] - Import tracking and deduplication
//! - [`FileRegistry`] - Declarative file registration and generation

mod imports;
mod registry;

pub use imports::ImportCollector;
pub use registry::{FileEntry, FileRegistry, WriteStats};
