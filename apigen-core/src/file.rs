use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use tracing::debug;

/// Header prepended to every generated source file.
pub const GENERATED_HEADER: &str = "// Code generated by apigen, DO NOT EDIT.";

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        File::new(self.path(base), self.render()).write()
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had the same content and was left untouched
    Unchanged,
}

/// A rendered source unit waiting to be persisted.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file, skipping the write when the content on disk is identical.
    pub fn write(&self) -> Result<WriteResult> {
        if let Ok(existing) = std::fs::read_to_string(&self.path)
            && existing == self.content
        {
            debug!(path = %self.path.display(), "generated file unchanged");
            return Ok(WriteResult::Unchanged);
        }
        write_file(&self.path, &self.content)?;
        debug!(path = %self.path.display(), bytes = self.content.len(), "generated file written");
        Ok(WriteResult::Written)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app").join("v1").join("contexts.go");

        write_file(&path, "package v1").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "package v1");
    }

    #[test]
    fn test_file_write_overwrites_changed_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hrefs.go");

        fs::write(&path, "package old").unwrap();

        let result = File::new(&path, "package app").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "package app");
    }

    #[test]
    fn test_file_write_skips_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("media_types.go");

        let file = File::new(&path, "package app\n");
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert_eq!(file.write().unwrap(), WriteResult::Unchanged);
    }

    #[test]
    fn test_file_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("user_types.go");

        let file = File::new(&path, "package app");
        assert!(!file.exists());

        fs::write(&path, "package app").unwrap();
        assert!(file.exists());
    }

    #[test]
    fn test_generated_file_write_joins_base() {
        struct Hrefs;
        impl GeneratedFile for Hrefs {
            fn path(&self, base: &Path) -> PathBuf {
                base.join("app").join("hrefs.go")
            }

            fn render(&self) -> String {
                format!("{}\n\npackage app\n", GENERATED_HEADER)
            }
        }

        let temp = TempDir::new().unwrap();
        Hrefs.write(temp.path()).unwrap();

        let written = fs::read_to_string(temp.path().join("app/hrefs.go")).unwrap();
        assert!(written.starts_with(GENERATED_HEADER));
    }
}
