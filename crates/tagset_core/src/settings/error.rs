use thiserror::Error;

use crate::settings::TaggedValueKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors produced while encoding, decoding, parsing, and persisting settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Declared type cannot be classified or is not encodable.
	#[error("unsupported type {type_name}: {reason}")]
	UnsupportedType {
		/// Declared type name.
		type_name: String,
		/// Why the type was rejected.
		reason: &'static str,
	},
	/// Node or value shape disagrees with the declared type.
	#[error("type mismatch at {path}: expected {expected}, got {got}")]
	TypeMismatch {
		/// Dotted field path from the root value.
		path: String,
		/// Expected type or shape.
		expected: String,
		/// Shape that was found instead.
		got: String,
	},
	/// Stored enum member name is not declared by the enum.
	#[error("unknown member {member:?} for enum {enum_name}")]
	UnknownEnumMember {
		/// Enum type name.
		enum_name: String,
		/// Member name that failed to resolve.
		member: String,
	},
	/// Node kind has no decode path.
	#[error("unsupported node kind {kind:?}")]
	UnsupportedKind {
		/// Offending wire kind.
		kind: TaggedValueKind,
	},
	/// Number scalar does not fit the target primitive.
	#[error("number {value} does not fit {type_name}")]
	NumberOutOfRange {
		/// Target primitive name.
		type_name: String,
		/// Wire value that failed to narrow.
		value: f64,
	},
	/// Recursion depth exceeded configured limit.
	#[error("depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Text document could not form valid nodes.
	#[error("malformed document: {message}")]
	MalformedDocument {
		/// Parser message, including position when known.
		message: String,
	},
	/// Byte-stream provider is not configured or not ready.
	#[error("storage unavailable: {location}")]
	StorageUnavailable {
		/// Store location label.
		location: String,
	},
	/// Setting identifier registered twice.
	#[error("duplicate setting identifier {identifier}")]
	DuplicateSetting {
		/// Offending identifier.
		identifier: String,
	},
	/// Setting identifier is not registered.
	#[error("unknown setting identifier {identifier}")]
	UnknownSetting {
		/// Requested identifier.
		identifier: String,
	},
	/// Typed accessor received a value of the wrong shape.
	#[error("invalid value for {type_name}: expected {expected}, got {got}")]
	InvalidValue {
		/// Requested Rust type name.
		type_name: String,
		/// Expected value kind.
		expected: &'static str,
		/// Value kind that was found.
		got: &'static str,
	},
}

impl SettingsError {
	pub(crate) fn malformed(message: impl Into<String>) -> Self {
		Self::MalformedDocument { message: message.into() }
	}
}

impl From<serde_json::Error> for SettingsError {
	fn from(err: serde_json::Error) -> Self {
		if err.is_io() {
			return Self::Io(err.into());
		}
		Self::malformed(err.to_string())
	}
}
