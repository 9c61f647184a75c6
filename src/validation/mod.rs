//! Validation Engine
//!
//! Schema compilation, document parsing, and schema validation.

pub mod engine;

pub use engine::{validate, Diagnostic, Severity, ValidationResult, Validator};
