//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a fixture file into memory.
pub fn fixture_bytes(name: &str) -> Vec<u8> {
	let path = fixture_path(name);
	std::fs::read(&path).unwrap_or_else(|err| panic!("fixture {} should be readable: {err}", path.display()))
}

/// Fresh scratch directory, removed on drop.
pub fn scratch_dir() -> TempDir {
	tempfile::Builder::new().prefix("tagset-test-").tempdir().expect("scratch dir is created")
}

/// Copy a fixture into `dir` and return the copy's path.
pub fn copy_fixture(name: &str, dir: &Path) -> PathBuf {
	let target = dir.join(name);
	std::fs::write(&target, fixture_bytes(name)).expect("fixture copy is written");
	target
}

/// Parse bytes as JSON, panicking with the text on failure.
pub fn parse_json(bytes: &[u8]) -> serde_json::Value {
	serde_json::from_slice(bytes).unwrap_or_else(|err| panic!("invalid json ({err}): {}", String::from_utf8_lossy(bytes)))
}
