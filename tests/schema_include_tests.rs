//! Relative include resolution and schema compile failures
mod common;

use std::fs;

use common::{document, fixture, line_of};
use xliff_validator::{validate, SchemaLocation, ValidateError, Validator};

#[test]
fn include_is_resolved_against_schema_directory() {
    let schema = fixture("schemas/nested/catalog.xsd");
    let result = validate(&schema, &document("catalog.xml")).expect("validate");
    assert!(result.is_valid(), "diagnostics: {:?}", result.diagnostics);
}

#[test]
fn included_type_constraints_apply() {
    let schema = fixture("schemas/nested/catalog.xsd");
    let path = document("catalog_invalid.xml");
    let result = validate(&schema, &path).expect("validate");

    assert!(!result.is_valid());
    let expected_line = line_of(&path, "<entry>Missing key");
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| d.line == expected_line && d.message.contains("key")),
        "diagnostics: {:?}",
        result.diagnostics
    );
}

#[test]
fn schema_copied_elsewhere_still_finds_its_fragments() {
    let dir = tempfile::tempdir().expect("tempdir");
    let types = dir.path().join("types");
    fs::create_dir_all(&types).expect("mkdir");
    fs::copy(
        fixture("schemas/nested/catalog.xsd"),
        dir.path().join("catalog.xsd"),
    )
    .expect("copy master");
    fs::copy(
        fixture("schemas/nested/types/common.xsd"),
        types.join("common.xsd"),
    )
    .expect("copy fragment");

    let result = validate(&dir.path().join("catalog.xsd"), &document("catalog.xml"))
        .expect("validate");
    assert!(result.is_valid());
}

#[test]
fn missing_fragment_is_a_compile_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::copy(
        fixture("schemas/nested/catalog.xsd"),
        dir.path().join("catalog.xsd"),
    )
    .expect("copy master");

    let location = SchemaLocation::resolve(dir.path().join("catalog.xsd")).expect("resolve");
    let err = Validator::compile(location).unwrap_err();
    assert!(matches!(err, ValidateError::SchemaCompile { .. }), "{err:?}");
}

#[test]
fn broken_schema_reports_engine_diagnostics() {
    let location = SchemaLocation::resolve(fixture("schemas/broken.xsd")).expect("resolve");
    match Validator::compile(location) {
        Err(ValidateError::SchemaCompile { diagnostics, .. }) => {
            assert!(!diagnostics.is_empty());
            assert!(
                diagnostics.iter().any(|d| d.message.contains("undefinedType")),
                "diagnostics: {diagnostics:?}"
            );
        }
        other => panic!("expected SchemaCompile, got {other:?}"),
    }
}

#[test]
fn schema_compile_error_is_raised_before_document_lookup() {
    let err = validate(&fixture("schemas/broken.xsd"), &document("does-not-exist.xml")).unwrap_err();
    assert!(matches!(err, ValidateError::SchemaCompile { .. }));
}

#[test]
fn location_exposes_base_directory() {
    let location =
        SchemaLocation::resolve(fixture("schemas/nested/catalog.xsd")).expect("resolve");
    assert!(location.base_dir().join("types/common.xsd").is_file());
}
