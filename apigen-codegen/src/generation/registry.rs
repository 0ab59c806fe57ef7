//! File registration for declarative code generation.
//!
//! Generators register every rendered file, then either preview the registry
//! or write it out in one pass.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = FileRegistry::new();
//! registry.register(FileEntry::new("app/contexts.go", contexts.render()));
//! registry.register(FileEntry::new("app/hrefs.go", hrefs.render()));
//! let stats = registry.write_all(&output_dir)?;
//! ```

use std::path::{Path, PathBuf};

use apigen_core::{File, WriteResult};
use eyre::Result;
use tracing::info;

use crate::language::PreviewFile;

/// A file waiting to be written, relative to the output directory.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the full path for this entry.
    pub fn full_path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    /// Write this file to disk, leaving identical files untouched.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        File::new(self.full_path(base), self.content.as_str()).write()
    }
}

/// Registry for collecting generated files in registration order.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Preview all files (returns path and content pairs).
    pub fn preview(&self) -> Vec<PreviewFile> {
        self.entries
            .iter()
            .map(|e| PreviewFile {
                path: e.path.clone(),
                content: e.content.clone(),
            })
            .collect()
    }

    /// Write all files to the output directory.
    pub fn write_all(&self, base: &Path) -> Result<WriteStats> {
        let mut stats = WriteStats::default();

        for entry in &self.entries {
            match entry.write(base)? {
                WriteResult::Written => {
                    info!(path = %entry.path, "wrote generated file");
                    stats.written_paths.push(entry.path.clone());
                }
                WriteResult::Unchanged => {
                    stats.unchanged_paths.push(entry.path.clone());
                }
            }
        }

        Ok(stats)
    }
}

/// Statistics from a write operation.
#[derive(Debug, Default)]
pub struct WriteStats {
    /// Paths of written files.
    pub written_paths: Vec<String>,
    /// Paths of files whose content was already up to date.
    pub unchanged_paths: Vec<String>,
}

impl WriteStats {
    pub fn written(&self) -> usize {
        self.written_paths.len()
    }

    pub fn unchanged(&self) -> usize {
        self.unchanged_paths.len()
    }

    /// Total number of files processed.
    pub fn total(&self) -> usize {
        self.written() + self.unchanged()
    }
}
