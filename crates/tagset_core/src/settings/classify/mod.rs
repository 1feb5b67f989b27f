use crate::settings::{Result, SettingsError, Storage, TypeDescriptor};

/// Integer widths accepted as primitives.
const PRIMITIVE_INT_BITS: [u8; 5] = [8, 16, 32, 64, 128];
/// Float widths accepted as primitives.
const PRIMITIVE_FLOAT_BITS: [u8; 2] = [32, 64];

/// Encoding category of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
	/// Allow-listed scalar: bool, char, integers, floats, strings.
	Primitive,
	/// Named-member enumeration.
	Enum,
	/// Record with named fields.
	Structured,
	/// Homogeneous ordered collection.
	Array,
}

impl TypeKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Primitive => "primitive",
			Self::Enum => "enum",
			Self::Structured => "structured",
			Self::Array => "array",
		}
	}
}

/// Classify a declared type.
///
/// The enum mark is tested before the primitive allow-list: enums are stored as
/// integers and would otherwise classify as primitives.
pub fn classify(ty: &TypeDescriptor) -> Result<TypeKind> {
	if let Some(members) = &ty.members {
		if !matches!(ty.storage, Storage::Int { .. }) {
			return Err(unsupported(ty, "enum storage must be an integer"));
		}
		if has_duplicates(members.iter().map(|member| member.name.as_ref())) {
			return Err(unsupported(ty, "duplicate enum member name"));
		}
		return Ok(TypeKind::Enum);
	}

	match &ty.storage {
		Storage::Bool | Storage::Char | Storage::Str => Ok(TypeKind::Primitive),
		Storage::Int { bits, .. } if PRIMITIVE_INT_BITS.contains(bits) => Ok(TypeKind::Primitive),
		Storage::Float { bits } if PRIMITIVE_FLOAT_BITS.contains(bits) => Ok(TypeKind::Primitive),
		Storage::Int { .. } | Storage::Float { .. } => Err(unsupported(ty, "numeric width not in primitive allow-list")),
		Storage::Sequence(_) => Ok(TypeKind::Array),
		Storage::Fields(fields) => {
			if has_duplicates(fields.iter().map(|field| field.name.as_ref())) {
				return Err(unsupported(ty, "duplicate field name"));
			}
			Ok(TypeKind::Structured)
		}
	}
}

fn has_duplicates<'a>(names: impl Iterator<Item = &'a str>) -> bool {
	let mut seen: Vec<&str> = Vec::new();
	for name in names {
		if seen.contains(&name) {
			return true;
		}
		seen.push(name);
	}
	false
}

fn unsupported(ty: &TypeDescriptor, reason: &'static str) -> SettingsError {
	SettingsError::UnsupportedType {
		type_name: ty.name.to_string(),
		reason,
	}
}
