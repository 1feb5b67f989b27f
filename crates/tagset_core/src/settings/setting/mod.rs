use crate::settings::{
	DecodeOptions, EncodeOptions, Result, SettingRecord, SettingValue, SettingsError, Storage, TaggedNode, TypeDescriptor, Value, decode_node,
	encode_value,
};

/// Group name used when a setting declares none.
pub const DEFAULT_GROUP: &str = "Un-Grouped";

/// Named, typed configuration value.
#[derive(Debug, Clone)]
pub struct Setting {
	identifier: Box<str>,
	group: Box<str>,
	description: Option<Box<str>>,
	descriptor: TypeDescriptor,
	value: Value,
	default: Value,
}

impl Setting {
	/// Declare a setting from an explicit descriptor and default value.
	pub fn new(identifier: impl Into<Box<str>>, descriptor: TypeDescriptor, default: Value) -> Self {
		Self {
			identifier: identifier.into(),
			group: DEFAULT_GROUP.into(),
			description: None,
			descriptor,
			value: default.clone(),
			default,
		}
	}

	/// Declare a setting whose type is described by `T`.
	pub fn of<T: SettingValue>(identifier: impl Into<Box<str>>, default: T) -> Self {
		Self::new(identifier, T::descriptor(), default.to_value())
	}

	/// Set the display group.
	pub fn with_group(mut self, group: impl Into<Box<str>>) -> Self {
		self.group = group.into();
		self
	}

	/// Attach a human-readable description.
	pub fn with_description(mut self, description: impl Into<Box<str>>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Stable identifier; the join key with persisted records.
	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	/// Display group.
	pub fn group(&self) -> &str {
		&self.group
	}

	/// Optional description.
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Declared type.
	pub fn descriptor(&self) -> &TypeDescriptor {
		&self.descriptor
	}

	/// Current value.
	pub fn value(&self) -> &Value {
		&self.value
	}

	/// Compiled-in default value.
	pub fn default_value(&self) -> &Value {
		&self.default
	}

	/// Current value converted to `T`.
	pub fn get<T: SettingValue>(&self) -> Result<T> {
		T::from_value(self.value.clone())
	}

	/// Replace the current value after checking it fits the declared type.
	///
	/// The stored value is normalized, see [`Setting::normalize`].
	pub fn set_value(&mut self, value: Value) -> Result<()> {
		self.value = self.normalize(value)?;
		Ok(())
	}

	/// Check that `value` fits the declared type without storing it.
	pub fn check(&self, value: &Value) -> Result<()> {
		self.normalize(value.clone()).map(|_| ())
	}

	/// Convert `value` to the exact form a load of the declared type yields.
	///
	/// Numbers take the variant of the declared width and signedness, enum
	/// discriminants follow the declaration, and struct fields missing from
	/// `value` take their declared defaults.
	pub fn normalize(&self, value: Value) -> Result<Value> {
		if matches!(value, Value::Null) && !self.descriptor.nullable {
			return Err(SettingsError::TypeMismatch {
				path: self.identifier.to_string(),
				expected: self.descriptor.name.to_string(),
				got: value.kind_name().to_owned(),
			});
		}
		normalize_value(value, &self.descriptor, &self.identifier)
	}

	pub(crate) fn assign_normalized(&mut self, value: Value) {
		self.value = value;
	}

	/// Normalize the declared default and the current value in place.
	pub(crate) fn normalize_declared(&mut self) -> Result<()> {
		self.default = self.normalize(self.default.clone())?;
		self.value = self.normalize(self.value.clone())?;
		Ok(())
	}

	/// Encode the current value.
	pub fn encode(&self, opt: &EncodeOptions) -> Result<TaggedNode> {
		encode_value(&self.value, &self.descriptor, opt)
	}

	/// Decode `node` against the declared type and assign it.
	///
	/// The current value is untouched when decoding fails.
	pub fn decode_into(&mut self, node: &TaggedNode, opt: &DecodeOptions) -> Result<()> {
		self.value = decode_node(node, &self.descriptor, opt)?;
		Ok(())
	}

	/// Restore the compiled-in default.
	pub fn reset(&mut self) {
		self.value = self.default.clone();
	}

	/// Encode into a persisted record.
	pub fn to_record(&self, opt: &EncodeOptions) -> Result<SettingRecord> {
		Ok(SettingRecord {
			identifier: self.identifier.to_string(),
			group: self.group.to_string(),
			value: self.encode(opt)?,
		})
	}
}

// Sequences have no wire form, so their elements are normalized one by one.
fn normalize_value(value: Value, ty: &TypeDescriptor, path: &str) -> Result<Value> {
	match (&ty.storage, value) {
		(Storage::Sequence(element), Value::Array(items)) => items
			.into_iter()
			.map(|item| normalize_value(item, element, path))
			.collect::<Result<Vec<_>>>()
			.map(Value::Array),
		(Storage::Sequence(_), value) if !matches!(value, Value::Null) => Err(SettingsError::TypeMismatch {
			path: path.to_owned(),
			expected: ty.name.to_string(),
			got: value.kind_name().to_owned(),
		}),
		(_, value) => {
			let node = encode_value(&value, ty, &EncodeOptions::default())?;
			decode_node(&node, ty, &DecodeOptions::default())
		}
	}
}
