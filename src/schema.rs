//! Schema location handling.
//!
//! The master XSD pulls in sibling fragments through relative
//! `schemaLocation` references. libxml2 resolves those against the URI the
//! master was loaded from, so the master is always handed over by its
//! absolute path and the process working directory is never touched.

use std::path::{Path, PathBuf};

use crate::error::ValidateError;

/// Directory holding the bundled OASIS schema set.
pub const BUNDLED_SCHEMA_DIR: &str = "Core";

/// File name of the XLIFF 2.2 core master schema.
pub const MASTER_SCHEMA_FILE: &str = "xliff_core_2.2.xsd";

/// A resolved root schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLocation {
    root: PathBuf,
    base_dir: PathBuf,
}

impl SchemaLocation {
    /// Resolve `path` to an absolute schema location.
    ///
    /// Relative paths are taken against the current directory at call time.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, ValidateError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ValidateError::SchemaNotFound {
                path: path.to_path_buf(),
            });
        }

        let root = path
            .canonicalize()
            .map_err(|e| ValidateError::io(path, e))?;
        let base_dir = root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        log::debug!(
            "resolved schema {} (includes relative to {})",
            root.display(),
            base_dir.display()
        );

        Ok(Self { root, base_dir })
    }

    /// Bundled master schema inside `dir`.
    pub fn bundled_in(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref()
            .join(BUNDLED_SCHEMA_DIR)
            .join(MASTER_SCHEMA_FILE)
    }

    /// Absolute path of the master schema.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that relative includes and imports resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The master path as libxml2 expects it.
    pub(crate) fn root_str(&self) -> Result<&str, ValidateError> {
        self.root.to_str().ok_or_else(|| ValidateError::InvalidPath {
            path: self.root.clone(),
        })
    }
}
