/// Runtime value held by a setting and exchanged with the codec.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent value.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Single character.
	Char(char),
	/// Signed integer of any declared width.
	Int(i128),
	/// Unsigned integer of any declared width.
	UInt(u128),
	/// 32-bit float scalar.
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// UTF-8 string.
	String(Box<str>),
	/// Enumeration member.
	Enum(EnumValue),
	/// Homogeneous sequence.
	Array(Vec<Value>),
	/// Struct-shaped value.
	Struct(StructValue),
}

impl Value {
	/// Stable lowercase label for the value shape.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Char(_) => "char",
			Self::Int(_) => "int",
			Self::UInt(_) => "uint",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::String(_) => "string",
			Self::Enum(_) => "enum",
			Self::Array(_) => "array",
			Self::Struct(_) => "struct",
		}
	}

	/// Build a string value.
	pub fn string(value: impl Into<Box<str>>) -> Self {
		Self::String(value.into())
	}

	/// Borrow the struct payload when this is a struct value.
	pub fn as_struct(&self) -> Option<&StructValue> {
		match self {
			Self::Struct(item) => Some(item),
			_ => None,
		}
	}

	/// Numeric payload widened to `f64`, if numeric.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Int(v) => Some(*v as f64),
			Self::UInt(v) => Some(*v as f64),
			Self::F32(v) => Some(f64::from(*v)),
			Self::F64(v) => Some(*v),
			_ => None,
		}
	}
}

/// Enumeration member identified by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
	/// Member name; the durable identity of the member.
	pub member: Box<str>,
	/// Underlying numeric value at declaration time.
	pub discriminant: i64,
}

impl EnumValue {
	/// Create an enum value.
	pub fn new(member: impl Into<Box<str>>, discriminant: i64) -> Self {
		Self {
			member: member.into(),
			discriminant,
		}
	}
}

/// Struct value with field names preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	/// Declared struct type name.
	pub type_name: Box<str>,
	/// Field values in declaration order.
	pub fields: Vec<FieldValue>,
}

impl StructValue {
	/// Create an empty struct value.
	pub fn new(type_name: impl Into<Box<str>>) -> Self {
		Self {
			type_name: type_name.into(),
			fields: Vec::new(),
		}
	}

	/// Append a field, builder style.
	pub fn with_field(mut self, name: impl Into<Box<str>>, value: Value) -> Self {
		self.set(name, value);
		self
	}

	/// Look up a field by exact name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}

	/// Replace a field value, or append it when missing.
	pub fn set(&mut self, name: impl Into<Box<str>>, value: Value) {
		let name = name.into();
		match self.fields.iter_mut().find(|field| field.name == name) {
			Some(field) => field.value = value,
			None => self.fields.push(FieldValue { name, value }),
		}
	}

	/// Remove a field and return its value.
	pub fn take_field(&mut self, name: &str) -> Option<Value> {
		let index = self.fields.iter().position(|field| field.name.as_ref() == name)?;
		Some(self.fields.remove(index).value)
	}
}

/// Named struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Field payload.
	pub value: Value,
}
