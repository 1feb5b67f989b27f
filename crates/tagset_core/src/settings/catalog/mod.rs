use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::settings::{
	ByteStore, DecodeOptions, EncodeOptions, Result, Setting, SettingRecord, SettingValue, SettingsError, Value, WriteOptions, read_document,
	write_document,
};

/// Result of one validation callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
	/// Value accepted silently.
	Passed,
	/// Value accepted with a message for the operator.
	Warning(String),
	/// Value rejected.
	Error(String),
}

impl Validation {
	/// Outcome class of this validation.
	pub fn outcome(&self) -> UpdateOutcome {
		match self {
			Self::Passed => UpdateOutcome::Success,
			Self::Warning(_) => UpdateOutcome::Warning,
			Self::Error(_) => UpdateOutcome::Failure,
		}
	}

	/// Attached message, if any.
	pub fn message(&self) -> Option<&str> {
		match self {
			Self::Passed => None,
			Self::Warning(message) | Self::Error(message) => Some(message),
		}
	}
}

/// Overall outcome of one or more updates, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UpdateOutcome {
	/// Every update passed.
	Success,
	/// At least one warning and no errors.
	Warning,
	/// At least one update was rejected.
	Failure,
}

impl UpdateOutcome {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Success => "success",
			Self::Warning => "warning",
			Self::Failure => "failure",
		}
	}
}

/// Classified result of one update attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
	/// Target setting identifier.
	pub identifier: String,
	/// Validation classification.
	pub validation: Validation,
	/// Whether the value was stored.
	pub applied: bool,
}

impl ValidationReport {
	/// Outcome class of this report.
	pub fn outcome(&self) -> UpdateOutcome {
		self.validation.outcome()
	}
}

/// Reports of a batch update plus the combined outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
	/// One report per requested update, in request order.
	pub reports: Vec<ValidationReport>,
	/// Most severe outcome across `reports`.
	pub outcome: UpdateOutcome,
}

/// Per-setting encode or decode failure.
#[derive(Debug)]
pub struct SettingFailure {
	/// Setting identifier.
	pub identifier: String,
	/// Failure cause.
	pub error: SettingsError,
}

/// Summary of a load.
#[derive(Debug, Default)]
pub struct LoadReport {
	/// Identifiers whose persisted value was applied.
	pub applied: Vec<String>,
	/// Entries that matched a setting but failed to decode.
	pub failures: Vec<SettingFailure>,
	/// Persisted identifiers with no registered setting.
	pub unknown: Vec<String>,
}

/// Summary of a save.
#[derive(Debug, Default)]
pub struct SaveReport {
	/// Identifiers written, in document order.
	pub written: Vec<String>,
	/// Settings left out of the document because they failed to encode.
	pub failures: Vec<SettingFailure>,
	/// Unknown persisted entries written back unchanged.
	pub retained: usize,
}

/// Read-only view of the catalog handed to validators.
#[derive(Debug, Clone, Copy)]
pub struct CatalogSnapshot<'a> {
	settings: &'a [Setting],
}

impl<'a> CatalogSnapshot<'a> {
	/// Current value of `identifier`.
	pub fn get(&self, identifier: &str) -> Option<&'a Value> {
		self.setting(identifier).map(Setting::value)
	}

	/// Current value of `identifier` converted to `T`.
	pub fn get_as<T: SettingValue>(&self, identifier: &str) -> Result<T> {
		let setting = self.setting(identifier).ok_or_else(|| unknown(identifier))?;
		setting.get()
	}

	/// Registered settings in registration order.
	pub fn settings(&self) -> &'a [Setting] {
		self.settings
	}

	fn setting(&self, identifier: &str) -> Option<&'a Setting> {
		self.settings.iter().find(|setting| setting.identifier() == identifier)
	}
}

/// Validation callback attached to one setting.
///
/// Runs while the catalog lock is held and must not call back into the catalog.
pub type Validator = Box<dyn Fn(&Value, &CatalogSnapshot<'_>) -> Validation + Send + Sync>;

/// Codec options used by a catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
	/// Options for save.
	pub encode: EncodeOptions,
	/// Options for load.
	pub decode: DecodeOptions,
	/// Document formatting for save.
	pub write: WriteOptions,
}

struct CatalogState {
	settings: Vec<Setting>,
	validators: HashMap<Box<str>, Validator>,
	store: Box<dyn ByteStore>,
	retained: Vec<SettingRecord>,
}

impl CatalogState {
	fn position(&self, identifier: &str) -> Option<usize> {
		self.settings.iter().position(|setting| setting.identifier() == identifier)
	}
}

/// Owner of all settings: validated updates, load, and save.
pub struct Catalog {
	options: CatalogOptions,
	state: Mutex<CatalogState>,
}

impl Catalog {
	/// Empty catalog over `store`.
	pub fn new(store: impl ByteStore + 'static) -> Self {
		Self::with_options(store, CatalogOptions::default())
	}

	/// Empty catalog over `store` with explicit codec options.
	pub fn with_options(store: impl ByteStore + 'static, options: CatalogOptions) -> Self {
		Self {
			options,
			state: Mutex::new(CatalogState {
				settings: Vec::new(),
				validators: HashMap::new(),
				store: Box::new(store),
				retained: Vec::new(),
			}),
		}
	}

	fn lock(&self) -> MutexGuard<'_, CatalogState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Point the store at `location`. Returns store readiness.
	pub fn configure(&self, location: &str) -> Result<bool> {
		self.lock().store.configure(location)
	}

	/// Store location label.
	pub fn location(&self) -> String {
		self.lock().store.location()
	}

	/// Add a setting.
	///
	/// The declared default must fit the declared type. A retained persisted
	/// entry with the same identifier is applied now.
	pub fn register(&self, mut setting: Setting) -> Result<()> {
		setting.normalize_declared()?;
		let mut state = self.lock();
		if state.position(setting.identifier()).is_some() {
			return Err(SettingsError::DuplicateSetting {
				identifier: setting.identifier().to_owned(),
			});
		}

		if let Some(index) = state.retained.iter().position(|record| record.identifier == setting.identifier()) {
			let record = state.retained.remove(index);
			if let Err(err) = setting.decode_into(&record.value, &self.options.decode) {
				warn!(identifier = %record.identifier, error = %err, "retained entry failed to decode; keeping default");
			}
		}

		state.settings.push(setting);
		Ok(())
	}

	/// Attach the validation callback for `identifier`, replacing any previous one.
	pub fn register_validator<F>(&self, identifier: &str, validator: F) -> Result<()>
	where
		F: Fn(&Value, &CatalogSnapshot<'_>) -> Validation + Send + Sync + 'static,
	{
		let mut state = self.lock();
		if state.position(identifier).is_none() {
			return Err(unknown(identifier));
		}
		state.validators.insert(identifier.into(), Box::new(validator));
		Ok(())
	}

	/// Registered identifiers in registration order.
	pub fn identifiers(&self) -> Vec<String> {
		self.lock().settings.iter().map(|setting| setting.identifier().to_owned()).collect()
	}

	/// Current value of `identifier`.
	pub fn get(&self, identifier: &str) -> Option<Value> {
		let state = self.lock();
		state.position(identifier).map(|index| state.settings[index].value().clone())
	}

	/// Current value of `identifier` converted to `T`.
	pub fn get_as<T: SettingValue>(&self, identifier: &str) -> Result<T> {
		let state = self.lock();
		CatalogSnapshot { settings: &state.settings }.get_as(identifier)
	}

	/// Copy of every setting as it is now.
	pub fn snapshot(&self) -> Vec<Setting> {
		self.lock().settings.clone()
	}

	/// Validate and apply one new value.
	///
	/// Shape errors are returned as `Err` and store nothing. Validation errors
	/// are returned in the report and also store nothing.
	pub fn update(&self, identifier: &str, value: Value) -> Result<ValidationReport> {
		let mut state = self.lock();
		update_locked(&mut state, identifier, value)
	}

	/// [`Catalog::update`] for a typed value.
	pub fn update_typed<T: SettingValue>(&self, identifier: &str, value: &T) -> Result<ValidationReport> {
		self.update(identifier, value.to_value())
	}

	/// Apply several updates in order under one lock.
	///
	/// Each update sees the values stored by the ones before it. Shape errors
	/// become rejected reports.
	pub fn update_many<I, S>(&self, updates: I) -> BatchReport
	where
		I: IntoIterator<Item = (S, Value)>,
		S: AsRef<str>,
	{
		let mut state = self.lock();
		let mut reports = Vec::new();
		for (identifier, value) in updates {
			let identifier = identifier.as_ref();
			let report = update_locked(&mut state, identifier, value).unwrap_or_else(|err| {
				warn!(identifier, error = %err, "update rejected");
				ValidationReport {
					identifier: identifier.to_owned(),
					validation: Validation::Error(err.to_string()),
					applied: false,
				}
			});
			reports.push(report);
		}

		let outcome = reports.iter().map(ValidationReport::outcome).max().unwrap_or(UpdateOutcome::Success);
		BatchReport { reports, outcome }
	}

	/// Read the store and apply every persisted entry.
	///
	/// A store that is not ready yields an empty report. A malformed document
	/// aborts the load; per-entry decode failures do not. A setting whose entry
	/// fails to decode is reset to its compiled-in default.
	pub fn load(&self) -> Result<LoadReport> {
		let mut state = self.lock();
		let mut report = LoadReport::default();
		if !state.store.is_ready() {
			debug!(location = %state.store.location(), "store not ready; nothing loaded");
			return Ok(report);
		}

		let bytes = state.store.read_all()?;
		let records = read_document(&bytes)?;
		for record in records {
			let Some(index) = state.position(&record.identifier) else {
				debug!(identifier = %record.identifier, "retaining entry with no registered setting");
				report.unknown.push(record.identifier.clone());
				state.retained.retain(|item| item.identifier != record.identifier);
				state.retained.push(record);
				continue;
			};

			match state.settings[index].decode_into(&record.value, &self.options.decode) {
				Ok(()) => report.applied.push(record.identifier),
				Err(err) => {
					warn!(identifier = %record.identifier, error = %err, "setting failed to load; using default");
					state.settings[index].reset();
					report.failures.push(SettingFailure {
						identifier: record.identifier,
						error: err,
					});
				}
			}
		}

		debug!(
			applied = report.applied.len(),
			failures = report.failures.len(),
			unknown = report.unknown.len(),
			"load finished"
		);
		Ok(report)
	}

	/// Encode every setting and replace the stored document.
	///
	/// Settings that fail to encode are left out and reported. Retained unknown
	/// entries are written after the registered settings.
	pub fn save(&self) -> Result<SaveReport> {
		let mut state = self.lock();
		if !state.store.is_ready() {
			return Err(SettingsError::StorageUnavailable {
				location: state.store.location(),
			});
		}

		let mut report = SaveReport::default();
		let mut records = Vec::with_capacity(state.settings.len() + state.retained.len());
		for setting in &state.settings {
			match setting.to_record(&self.options.encode) {
				Ok(record) => {
					report.written.push(record.identifier.clone());
					records.push(record);
				}
				Err(err) => {
					warn!(identifier = setting.identifier(), error = %err, "setting failed to encode; left out of document");
					report.failures.push(SettingFailure {
						identifier: setting.identifier().to_owned(),
						error: err,
					});
				}
			}
		}
		report.retained = state.retained.len();
		records.extend(state.retained.iter().cloned());

		let bytes = write_document(&records, &self.options.write)?;
		state.store.write_all(&bytes)?;
		debug!(bytes = bytes.len(), retained = report.retained, "document written");
		info!(
			location = %state.store.location(),
			written = report.written.len(),
			failures = report.failures.len(),
			"settings saved"
		);
		Ok(report)
	}

	/// Restore every setting to its compiled-in default.
	pub fn reset_to_defaults(&self) {
		for setting in &mut self.lock().settings {
			setting.reset();
		}
	}
}

fn update_locked(state: &mut CatalogState, identifier: &str, value: Value) -> Result<ValidationReport> {
	let index = state.position(identifier).ok_or_else(|| unknown(identifier))?;
	let value = state.settings[index].normalize(value)?;

	let validation = match state.validators.get(identifier) {
		Some(validator) => validator(&value, &CatalogSnapshot { settings: &state.settings }),
		None => Validation::Passed,
	};

	let applied = !matches!(validation, Validation::Error(_));
	match &validation {
		Validation::Passed => {}
		Validation::Warning(message) => warn!(identifier, message = %message, "update accepted with warning"),
		Validation::Error(message) => warn!(identifier, message = %message, "update rejected by validator"),
	}
	if applied {
		state.settings[index].assign_normalized(value);
	}

	Ok(ValidationReport {
		identifier: identifier.to_owned(),
		validation,
		applied,
	})
}

fn unknown(identifier: &str) -> SettingsError {
	SettingsError::UnknownSetting {
		identifier: identifier.to_owned(),
	}
}
