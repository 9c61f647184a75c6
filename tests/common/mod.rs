use std::path::{Path, PathBuf};

#[allow(dead_code)]
pub fn manifest_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

#[allow(dead_code)]
pub fn bundled_schema() -> PathBuf {
    manifest_dir().join("Core").join("xliff_core_2.2.xsd")
}

#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    manifest_dir().join("tests/fixtures").join(name)
}

#[allow(dead_code)]
pub fn document(name: &str) -> PathBuf {
    fixture("documents").join(name)
}

/// 1-based line of the first occurrence of `needle` in the file at `path`.
#[allow(dead_code)]
pub fn line_of(path: &Path, needle: &str) -> usize {
    let content = std::fs::read_to_string(path).expect("read fixture");
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|idx| idx + 1)
        .unwrap_or_else(|| panic!("{needle:?} not found in {}", path.display()))
}
