//! XLIFF 2.2 Validator
//!
//! Validates XLIFF 2.2 translation-interchange files against the OASIS
//! XLIFF 2.2 XML schema, with line-numbered diagnostics.
//!
//! This library provides:
//! - Schema location and compilation with relative include resolution
//! - Well-formedness and schema validation of documents
//! - Text and JSON reporting
//! - Configuration management

pub mod config;
pub mod error;
pub mod report;
pub mod schema;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use error::ValidateError;
pub use report::Outcome;
pub use schema::SchemaLocation;
pub use validation::{validate, Diagnostic, Severity, ValidationResult, Validator};
