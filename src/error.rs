//! Error taxonomy for schema loading and document validation.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::validation::Diagnostic;

/// Everything that can stop a validation run before a verdict is reached.
///
/// A document that fails the schema is *not* an error: it is reported as a
/// [`ValidationResult`](crate::validation::ValidationResult) with diagnostics.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("master schema not found at {}", .path.display())]
    SchemaNotFound { path: PathBuf },

    #[error("file '{}' not found", .path.display())]
    DocumentNotFound { path: PathBuf },

    #[error("'{}' is not well-formed XML (line {line}): {message}", .path.display())]
    MalformedDocument {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("failed to compile schema {}: {}", .path.display(), summarize(.diagnostics))]
    SchemaCompile {
        path: PathBuf,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("path is not valid UTF-8: {}", .path.display())]
    InvalidPath { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl ValidateError {
    /// Stable machine-readable name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidateError::SchemaNotFound { .. } => "schema_not_found",
            ValidateError::DocumentNotFound { .. } => "document_not_found",
            ValidateError::MalformedDocument { .. } => "malformed_document",
            ValidateError::SchemaCompile { .. } => "schema_compile",
            ValidateError::InvalidPath { .. } => "invalid_path",
            ValidateError::Io { .. } => "io",
            ValidateError::Config { .. } => "config",
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ValidateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    match diagnostics.first() {
        None => "no diagnostics reported by the schema engine".to_string(),
        Some(first) if diagnostics.len() == 1 => format!("line {}: {}", first.line, first.message),
        Some(first) => format!(
            "line {}: {} (and {} more)",
            first.line,
            first.message,
            diagnostics.len() - 1
        ),
    }
}
