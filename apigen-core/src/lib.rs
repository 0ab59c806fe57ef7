//! Core utilities and types for the apigen generator.
//!
//! This crate provides fundamental types and utilities used across
//! the apigen crates.

mod file;
mod utils;

// File operations
pub use file::{File, GENERATED_HEADER, GeneratedFile, WriteResult};
// String utilities
pub use utils::{to_pascal_case, to_snake_case, to_title};
