//! The generated Go files.
//!
//! Each emitter decides which templates run, in which order, for one file of
//! a generated package. [`GoSource`] runs an emitter against a fresh
//! [`GoFile`] and exposes the result as a [`GeneratedFile`].

mod contexts_go;
mod controllers_go;
mod hrefs_go;
mod media_types_go;
mod user_types_go;

use std::path::{Path, PathBuf};

use apigen_core::GeneratedFile;
use eyre::{Result, WrapErr};

pub use contexts_go::ContextsGo;
pub use controllers_go::ControllersGo;
pub use hrefs_go::HrefsGo;
pub use media_types_go::MediaTypesGo;
pub use user_types_go::UserTypesGo;

use crate::go_file::{GoFile, RenderHelpers};

/// One file of a generated Go package.
pub trait Emitter {
    /// File name inside the package directory.
    fn file_name(&self) -> &'static str;

    /// Execute the templates of the file.
    fn emit(&self, file: &mut GoFile, helpers: &RenderHelpers<'_>) -> Result<()>;
}

/// A rendered Go file, relative to the output directory.
#[derive(Debug, Clone)]
pub struct GoSource {
    dir: String,
    name: &'static str,
    file: GoFile,
}

impl GoSource {
    /// Run `emitter` into a new file of package `package` stored under `dir`.
    pub fn build(
        dir: impl Into<String>,
        package: &str,
        emitter: &dyn Emitter,
        helpers: &RenderHelpers<'_>,
    ) -> Result<Self> {
        let dir = dir.into();
        let mut file = GoFile::new(package);
        emitter
            .emit(&mut file, helpers)
            .wrap_err_with(|| format!("failed to generate {}/{}", dir, emitter.file_name()))?;
        Ok(Self {
            dir,
            name: emitter.file_name(),
            file,
        })
    }

    /// Path relative to the output directory, with `/` separators.
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.dir, self.name)
    }

    /// Returns true if no template produced code.
    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }
}

impl GeneratedFile for GoSource {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.dir).join(self.name)
    }

    fn render(&self) -> String {
        self.file.render()
    }
}
