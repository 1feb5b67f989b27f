use crate::settings::{EnumValue, StructValue, Value};

/// Storage representation of a described type.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
	/// `bool`.
	Bool,
	/// Unicode scalar value.
	Char,
	/// Fixed-width integer.
	Int {
		/// Width in bits.
		bits: u8,
		/// Two's complement when true.
		signed: bool,
	},
	/// IEEE-754 float.
	Float {
		/// Width in bits.
		bits: u8,
	},
	/// UTF-8 string.
	Str,
	/// Named fields in declaration order.
	Fields(Vec<FieldDescriptor>),
	/// Homogeneous sequence of one element type.
	Sequence(Box<TypeDescriptor>),
}

/// One declared enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
	/// Member name.
	pub name: Box<str>,
	/// Underlying numeric value.
	pub discriminant: i64,
}

impl EnumMember {
	/// Create a member declaration.
	pub fn new(name: impl Into<Box<str>>, discriminant: i64) -> Self {
		Self {
			name: name.into(),
			discriminant,
		}
	}
}

/// One declared struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
	/// Field name as written to documents.
	pub name: Box<str>,
	/// Field type.
	pub ty: TypeDescriptor,
}

impl FieldDescriptor {
	/// Create a field declaration.
	pub fn new(name: impl Into<Box<str>>, ty: TypeDescriptor) -> Self {
		Self { name: name.into(), ty }
	}
}

/// Type handle used to classify a type and walk its structure.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
	/// Type name used in diagnostics.
	pub name: Box<str>,
	/// Storage representation.
	pub storage: Storage,
	/// Declared members when the type is an enumeration.
	pub members: Option<Vec<EnumMember>>,
	/// Whether the absent value is a legal value of the type.
	pub nullable: bool,
	/// Default instance for structured types.
	pub default: Option<Box<Value>>,
}

impl TypeDescriptor {
	fn plain(name: impl Into<Box<str>>, storage: Storage) -> Self {
		Self {
			name: name.into(),
			storage,
			members: None,
			nullable: false,
			default: None,
		}
	}

	/// `bool` descriptor.
	pub fn bool() -> Self {
		Self::plain("bool", Storage::Bool)
	}

	/// `char` descriptor.
	pub fn char() -> Self {
		Self::plain("char", Storage::Char)
	}

	/// `String` descriptor.
	pub fn string() -> Self {
		Self::plain("String", Storage::Str)
	}

	/// Integer descriptor of the given width.
	pub fn int(name: impl Into<Box<str>>, bits: u8, signed: bool) -> Self {
		Self::plain(name, Storage::Int { bits, signed })
	}

	/// Float descriptor of the given width.
	pub fn float(name: impl Into<Box<str>>, bits: u8) -> Self {
		Self::plain(name, Storage::Float { bits })
	}

	/// Enumeration stored as a 32-bit signed integer.
	pub fn enumeration(name: impl Into<Box<str>>, members: Vec<EnumMember>) -> Self {
		Self {
			members: Some(members),
			..Self::plain(name, Storage::Int { bits: 32, signed: true })
		}
	}

	/// Struct with named fields and a default instance.
	pub fn structure(name: impl Into<Box<str>>, fields: Vec<FieldDescriptor>, default: Value) -> Self {
		Self {
			default: Some(Box::new(default)),
			..Self::plain(name, Storage::Fields(fields))
		}
	}

	/// Homogeneous sequence of `element`.
	pub fn sequence(name: impl Into<Box<str>>, element: TypeDescriptor) -> Self {
		Self::plain(name, Storage::Sequence(Box::new(element)))
	}

	/// Same type, with the absent value allowed.
	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self
	}

	/// Declared fields; empty for non-struct storage.
	pub fn fields(&self) -> &[FieldDescriptor] {
		match &self.storage {
			Storage::Fields(fields) => fields,
			_ => &[],
		}
	}

	/// Look up a declared field by name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields().iter().find(|field| field.name.as_ref() == name)
	}

	/// Look up an enum member by exact name.
	pub fn member(&self, name: &str) -> Option<&EnumMember> {
		self.members.as_deref()?.iter().find(|member| member.name.as_ref() == name)
	}

	/// Default value for a decode of an absent node.
	///
	/// Nullable types default to [`Value::Null`]; everything else defaults to
	/// [`TypeDescriptor::default_instance`].
	pub fn default_value(&self) -> Value {
		if self.nullable {
			return Value::Null;
		}
		self.default_instance()
	}

	/// Zero or declared default instance, never null.
	pub fn default_instance(&self) -> Value {
		if let Some(default) = &self.default {
			return (**default).clone();
		}

		if let Some(members) = &self.members {
			let member = members.iter().find(|member| member.discriminant == 0).or_else(|| members.first());
			return match member {
				Some(member) => Value::Enum(EnumValue::new(member.name.clone(), member.discriminant)),
				None => Value::Null,
			};
		}

		match &self.storage {
			Storage::Bool => Value::Bool(false),
			Storage::Char => Value::Char('\0'),
			Storage::Int { signed: true, .. } => Value::Int(0),
			Storage::Int { signed: false, .. } => Value::UInt(0),
			Storage::Float { bits: 32 } => Value::F32(0.0),
			Storage::Float { .. } => Value::F64(0.0),
			Storage::Str => Value::string(""),
			Storage::Fields(fields) => {
				let mut out = StructValue::new(self.name.clone());
				for field in fields {
					out.set(field.name.clone(), field.ty.default_value());
				}
				Value::Struct(out)
			}
			Storage::Sequence(_) => Value::Array(Vec::new()),
		}
	}
}
