use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tempfile::NamedTempFile;

use crate::settings::{Result, SettingsError};

/// Raw byte source and sink behind a catalog.
///
/// Reading or writing a store that is not ready fails with
/// [`SettingsError::StorageUnavailable`].
pub trait ByteStore: Send {
	/// Point the store at `location` and prepare it. Returns readiness.
	fn configure(&mut self, location: &str) -> Result<bool>;

	/// Whether reads and writes can proceed.
	fn is_ready(&self) -> bool;

	/// Read the full stored document.
	fn read_all(&self) -> Result<Vec<u8>>;

	/// Replace the full stored document.
	fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

	/// Location label for diagnostics.
	fn location(&self) -> String;
}

/// File-backed store with atomic replace-on-write.
#[derive(Debug, Default)]
pub struct FileStore {
	path: Option<PathBuf>,
}

impl FileStore {
	/// Unconfigured store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Store configured at `path`, creating the file when missing.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let mut store = Self::new();
		store.configure(&path.as_ref().to_string_lossy())?;
		Ok(store)
	}

	/// Configured file path.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	fn ready_path(&self) -> Result<&Path> {
		self.path.as_deref().ok_or_else(|| SettingsError::StorageUnavailable {
			location: self.location(),
		})
	}
}

impl ByteStore for FileStore {
	fn configure(&mut self, location: &str) -> Result<bool> {
		let path = PathBuf::from(location);
		if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			fs::create_dir_all(parent)?;
		}
		if !path.exists() {
			fs::File::create(&path)?;
		}
		self.path = Some(path);
		Ok(true)
	}

	fn is_ready(&self) -> bool {
		self.path.is_some()
	}

	fn read_all(&self) -> Result<Vec<u8>> {
		Ok(fs::read(self.ready_path()?)?)
	}

	fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
		let path = self.ready_path()?;
		let dir = match path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};

		let mut tmp = NamedTempFile::new_in(dir)?;
		tmp.write_all(bytes)?;
		tmp.as_file().sync_all()?;
		tmp.persist(path).map_err(|err| SettingsError::Io(err.error))?;
		Ok(())
	}

	fn location(&self) -> String {
		match &self.path {
			Some(path) => path.display().to_string(),
			None => "<unconfigured file store>".to_owned(),
		}
	}
}

#[derive(Debug, Default)]
struct MemoryState {
	bytes: Vec<u8>,
	fail_writes: bool,
	writes: usize,
}

/// In-memory store. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	label: Option<Arc<str>>,
	state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
	/// Unconfigured, empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Configured store holding `bytes`.
	pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		let store = Self {
			label: Some("memory".into()),
			..Self::default()
		};
		store.lock().bytes = bytes.into();
		store
	}

	/// Copy of the stored bytes.
	pub fn bytes(&self) -> Vec<u8> {
		self.lock().bytes.clone()
	}

	/// Number of successful writes.
	pub fn write_count(&self) -> usize {
		self.lock().writes
	}

	/// Make subsequent writes fail with an IO error.
	pub fn set_fail_writes(&self, fail: bool) {
		self.lock().fail_writes = fail;
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn ensure_ready(&self) -> Result<()> {
		if self.is_ready() {
			return Ok(());
		}
		Err(SettingsError::StorageUnavailable { location: self.location() })
	}
}

impl ByteStore for MemoryStore {
	fn configure(&mut self, location: &str) -> Result<bool> {
		self.label = Some(location.into());
		Ok(true)
	}

	fn is_ready(&self) -> bool {
		self.label.is_some()
	}

	fn read_all(&self) -> Result<Vec<u8>> {
		self.ensure_ready()?;
		Ok(self.bytes())
	}

	fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
		self.ensure_ready()?;
		let mut state = self.lock();
		if state.fail_writes {
			return Err(SettingsError::Io(std::io::Error::other("simulated write failure")));
		}
		state.bytes = bytes.to_vec();
		state.writes += 1;
		Ok(())
	}

	fn location(&self) -> String {
		match &self.label {
			Some(label) => label.to_string(),
			None => "<unconfigured memory store>".to_owned(),
		}
	}
}
