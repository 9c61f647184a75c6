//! Validation Engine
//!
//! Drives libxml2: compiles the master schema once, then checks documents
//! against it and turns the engine's error log into [`Diagnostic`]s.

use std::path::Path;
use std::time::Instant;

use libxml::error::{StructuredError, XmlErrorLevel};
use libxml::parser::{Parser, ParserOptions, XmlParseFailure};
use libxml::schemas::{SchemaParserContext, SchemaValidationContext};
use libxml::tree::Document;
use serde::Serialize;

use crate::error::ValidateError;
use crate::schema::SchemaLocation;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl From<XmlErrorLevel> for Severity {
    fn from(level: XmlErrorLevel) -> Self {
        match level {
            XmlErrorLevel::Error | XmlErrorLevel::Fatal => Severity::Error,
            XmlErrorLevel::Warning => Severity::Warning,
            XmlErrorLevel::None => Severity::Info,
        }
    }
}

/// A single message from the schema engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based source line, 0 when the engine did not report one.
    pub line: usize,
    pub message: String,
    pub severity: Severity,
}

impl From<StructuredError> for Diagnostic {
    fn from(error: StructuredError) -> Self {
        Self {
            line: error
                .line
                .and_then(|line| usize::try_from(line).ok())
                .unwrap_or(0),
            message: error
                .message
                .as_deref()
                .map(str::trim_end)
                .unwrap_or("unknown schema error")
                .to_string(),
            severity: Severity::from(error.level),
        }
    }
}

fn to_diagnostics(errors: Vec<StructuredError>) -> Vec<Diagnostic> {
    errors.into_iter().map(Diagnostic::from).collect()
}

/// Verdict for one document, diagnostics in engine order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            diagnostics: Vec::new(),
        }
    }

    pub fn invalid(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            valid: false,
            diagnostics,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }
}

/// A compiled schema, reusable across documents.
pub struct Validator {
    location: SchemaLocation,
    context: SchemaValidationContext,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl Validator {
    /// Compile the schema at `location`, resolving its includes and imports
    /// against [`SchemaLocation::base_dir`].
    pub fn compile(location: SchemaLocation) -> Result<Self, ValidateError> {
        let started = Instant::now();
        let mut parser = SchemaParserContext::from_file(location.root_str()?);
        let context = SchemaValidationContext::from_parser(&mut parser).map_err(|errors| {
            ValidateError::SchemaCompile {
                path: location.root().to_path_buf(),
                diagnostics: to_diagnostics(errors),
            }
        })?;

        log::debug!(
            "compiled schema {} in {:?}",
            location.root().display(),
            started.elapsed()
        );

        Ok(Self { location, context })
    }

    pub fn location(&self) -> &SchemaLocation {
        &self.location
    }

    /// Validate the document at `path`.
    ///
    /// `path` is interpreted relative to the current directory.
    pub fn validate_file(&mut self, path: &Path) -> Result<ValidationResult, ValidateError> {
        if !path.is_file() {
            return Err(ValidateError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| ValidateError::io(path, e))?;
        let document = parse_document(path, &bytes)?;

        Ok(self.validate_document(path, &document))
    }

    /// Validate an in-memory document. `name` only labels errors.
    pub fn validate_str(&mut self, name: &Path, xml: &str) -> Result<ValidationResult, ValidateError> {
        let document = parse_document(name, xml.as_bytes())?;
        Ok(self.validate_document(name, &document))
    }

    fn validate_document(&mut self, name: &Path, document: &Document) -> ValidationResult {
        // a passing run leaves its warnings in the log
        let stale = self.context.drain_errors();
        if !stale.is_empty() {
            log::debug!("discarding {} stale schema message(s)", stale.len());
        }

        let started = Instant::now();
        let result = match self.context.validate_document(document) {
            Ok(()) => ValidationResult::valid(),
            Err(errors) => ValidationResult::invalid(to_diagnostics(errors)),
        };

        log::debug!(
            "validated {} in {:?}: {} diagnostic(s)",
            name.display(),
            started.elapsed(),
            result.diagnostics.len()
        );

        result
    }
}

fn parser_options<'a>() -> ParserOptions<'a> {
    // diagnostics are collected, not printed
    ParserOptions {
        recover: false,
        no_net: true,
        no_error: true,
        no_warning: true,
        ..ParserOptions::default()
    }
}

/// Parse `bytes` as XML, keeping libxml2's own complaint when it refuses.
fn parse_document(path: &Path, bytes: &[u8]) -> Result<Document, ValidateError> {
    match Parser::default().parse_string_with_diagnostics(bytes, parser_options()) {
        Ok((document, warnings)) => {
            for warning in warnings.into_iter().map(Diagnostic::from) {
                log::warn!(
                    "{} line {}: {}",
                    path.display(),
                    warning.line,
                    warning.message
                );
            }
            Ok(document)
        }
        Err(XmlParseFailure::ParseFailed(errors)) => Err(malformed(path, to_diagnostics(errors))),
        Err(failure) => Err(ValidateError::MalformedDocument {
            path: path.to_path_buf(),
            line: 0,
            message: failure.to_string(),
        }),
    }
}

/// First error-level diagnostic wins; libxml2 may follow it with cascades.
fn malformed(path: &Path, diagnostics: Vec<Diagnostic>) -> ValidateError {
    let first = diagnostics
        .iter()
        .position(|d| d.severity == Severity::Error)
        .unwrap_or(0);
    let (line, message) = match diagnostics.into_iter().nth(first) {
        Some(diagnostic) => (diagnostic.line, diagnostic.message),
        None => (0, "parser returned no document".to_string()),
    };
    ValidateError::MalformedDocument {
        path: path.to_path_buf(),
        line,
        message,
    }
}

/// Validate `document` against the schema rooted at `schema_root`.
///
/// The schema is located and compiled before the document is looked at, so a
/// missing schema is reported without touching the document.
pub fn validate(schema_root: &Path, document: &Path) -> Result<ValidationResult, ValidateError> {
    let location = SchemaLocation::resolve(schema_root)?;
    let mut validator = Validator::compile(location)?;
    validator.validate_file(document)
}
