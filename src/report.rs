//! Turning a validation run into what the user sees.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::ValidateError;
use crate::validation::{Diagnostic, ValidationResult};

/// The three ways a run can end.
#[derive(Debug)]
pub enum Outcome {
    Valid,
    Invalid(ValidationResult),
    Failed(ValidateError),
}

impl From<Result<ValidationResult, ValidateError>> for Outcome {
    fn from(result: Result<ValidationResult, ValidateError>) -> Self {
        match result {
            Ok(result) if result.is_valid() => Outcome::Valid,
            Ok(result) => Outcome::Invalid(result),
            Err(err) => Outcome::Failed(err),
        }
    }
}

impl Outcome {
    pub const EXIT_VALID: u8 = 0;
    pub const EXIT_INVALID: u8 = 1;
    pub const EXIT_FAILED: u8 = 3;

    /// Process exit code. 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Valid => Self::EXIT_VALID,
            Outcome::Invalid(_) => Self::EXIT_INVALID,
            Outcome::Failed(_) => Self::EXIT_FAILED,
        }
    }

    pub fn render(&self, file: &Path, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => render_text(file, self),
            OutputFormat::Json => render_json(file, self),
        }
    }
}

/// Human-readable report, one trailing newline.
pub fn render_text(file: &Path, outcome: &Outcome) -> String {
    let file = file.display();
    let mut out = String::new();

    match outcome {
        Outcome::Valid => {
            let _ = writeln!(out, "✅ Success: '{file}' is a valid XLIFF 2.2 file.");
        }
        Outcome::Invalid(result) => {
            let _ = writeln!(out, "❌ Validation Failed for '{file}':");
            for diagnostic in &result.diagnostics {
                let _ = writeln!(
                    out,
                    "  - Line {}: {}",
                    diagnostic.line, diagnostic.message
                );
            }
        }
        Outcome::Failed(ValidateError::SchemaNotFound { path }) => {
            let _ = writeln!(out, "Error: Master schema not found at {}", path.display());
        }
        Outcome::Failed(ValidateError::DocumentNotFound { path }) => {
            let _ = writeln!(out, "Error: File '{}' not found.", path.display());
        }
        Outcome::Failed(err) => {
            let _ = writeln!(out, "An error occurred: {err}");
        }
    }

    out
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum JsonReport<'a> {
    Valid {
        file: String,
        diagnostics: &'a [Diagnostic],
    },
    Invalid {
        file: String,
        diagnostics: &'a [Diagnostic],
    },
    Error {
        file: String,
        error: JsonError,
    },
}

#[derive(Serialize)]
struct JsonError {
    kind: &'static str,
    message: String,
}

/// Machine-readable report as a single JSON line.
pub fn render_json(file: &Path, outcome: &Outcome) -> String {
    let file = file.display().to_string();
    let report = match outcome {
        Outcome::Valid => JsonReport::Valid {
            file,
            diagnostics: &[],
        },
        Outcome::Invalid(result) => JsonReport::Invalid {
            file,
            diagnostics: &result.diagnostics,
        },
        Outcome::Failed(err) => JsonReport::Error {
            file,
            error: JsonError {
                kind: err.kind(),
                message: err.to_string(),
            },
        },
    };

    match serde_json::to_string(&report) {
        Ok(json) => json + "\n",
        Err(e) => {
            log::error!("failed to serialize report: {e}");
            String::from("{\"status\":\"error\"}\n")
        }
    }
}
