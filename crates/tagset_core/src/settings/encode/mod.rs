use crate::settings::{NodeField, Result, SettingsError, Storage, TaggedNode, TypeDescriptor, TypeKind, Value, classify};

/// Runtime limits for value encoding.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
	/// Maximum recursive struct nesting depth.
	pub max_depth: u32,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self { max_depth: 32 }
	}
}

/// Encode a value against its declared type into a tagged node tree.
pub fn encode_value(value: &Value, ty: &TypeDescriptor, opt: &EncodeOptions) -> Result<TaggedNode> {
	encode_impl(value, ty, opt, &ty.name, 0)
}

fn encode_impl(value: &Value, ty: &TypeDescriptor, opt: &EncodeOptions, path: &str, depth: u32) -> Result<TaggedNode> {
	if depth >= opt.max_depth {
		return Err(SettingsError::DepthExceeded { max_depth: opt.max_depth });
	}

	// The declared type travels with the setting, so null carries no type here.
	if matches!(value, Value::Null) {
		return Ok(TaggedNode::Undefined);
	}

	match classify(ty)? {
		TypeKind::Primitive => encode_primitive(value, ty, path),
		TypeKind::Enum => encode_enum(value, ty, path),
		TypeKind::Structured => encode_struct(value, ty, opt, path, depth),
		TypeKind::Array => Err(SettingsError::UnsupportedType {
			type_name: ty.name.to_string(),
			reason: "array values have no encoding",
		}),
	}
}

fn encode_primitive(value: &Value, ty: &TypeDescriptor, path: &str) -> Result<TaggedNode> {
	match (&ty.storage, value) {
		(Storage::Bool, Value::Bool(v)) => Ok(TaggedNode::boolean(*v)),
		(Storage::Str, Value::String(v)) => Ok(TaggedNode::string(v.clone())),
		(Storage::Char, Value::Char(v)) => Ok(TaggedNode::string(v.to_string())),
		(Storage::Int { bits, signed }, Value::Int(_) | Value::UInt(_)) => {
			if !integer_fits(*bits, *signed, value) || !exact_in_f64(value) {
				return Err(SettingsError::NumberOutOfRange {
					type_name: ty.name.to_string(),
					value: value.as_f64().unwrap_or(f64::NAN),
				});
			}
			Ok(TaggedNode::number(value.as_f64().unwrap_or_default()))
		}
		(Storage::Float { .. }, Value::F32(_) | Value::F64(_) | Value::Int(_) | Value::UInt(_)) => {
			let number = value.as_f64().unwrap_or(f64::NAN);
			if !number.is_finite() || !exact_in_f64(value) {
				return Err(SettingsError::NumberOutOfRange {
					type_name: ty.name.to_string(),
					value: number,
				});
			}
			Ok(TaggedNode::number(number))
		}
		_ => Err(mismatch(path, ty, value)),
	}
}

fn encode_enum(value: &Value, ty: &TypeDescriptor, path: &str) -> Result<TaggedNode> {
	let Value::Enum(item) = value else {
		return Err(mismatch(path, ty, value));
	};
	let member = ty.member(&item.member).ok_or_else(|| SettingsError::UnknownEnumMember {
		enum_name: ty.name.to_string(),
		member: item.member.to_string(),
	})?;
	Ok(TaggedNode::string(member.name.clone()))
}

fn encode_struct(value: &Value, ty: &TypeDescriptor, opt: &EncodeOptions, path: &str, depth: u32) -> Result<TaggedNode> {
	let Value::Struct(item) = value else {
		return Err(mismatch(path, ty, value));
	};

	let fields = ty.fields();
	let mut out = Vec::with_capacity(fields.len());
	for field in fields {
		let child_path = format!("{path}.{}", field.name);
		let child = match item.field(&field.name) {
			Some(child) => encode_impl(child, &field.ty, opt, &child_path, depth + 1)?,
			None => TaggedNode::Undefined,
		};
		out.push(NodeField::new(field.name.clone(), child));
	}

	Ok(TaggedNode::Object(out))
}

fn integer_fits(bits: u8, signed: bool, value: &Value) -> bool {
	match (value, signed) {
		(&Value::Int(_), true) if bits >= 128 => true,
		(&Value::Int(v), true) => v >= -(1_i128 << (bits - 1)) && v < (1_i128 << (bits - 1)),
		(&Value::Int(v), false) => v >= 0 && (bits >= 128 || (v as u128) < (1_u128 << bits)),
		(&Value::UInt(v), true) if bits >= 128 => v <= i128::MAX as u128,
		(&Value::UInt(v), true) => v < (1_u128 << (bits - 1)),
		(&Value::UInt(v), false) => bits >= 128 || v < (1_u128 << bits),
		_ => false,
	}
}

/// Integers must survive the trip through the `f64` wire number unchanged.
fn exact_in_f64(value: &Value) -> bool {
	let magnitude = match value {
		Value::Int(v) => v.unsigned_abs(),
		Value::UInt(v) => *v,
		_ => return true,
	};
	magnitude == 0 || (magnitude >> magnitude.trailing_zeros()) < (1_u128 << f64::MANTISSA_DIGITS)
}

fn mismatch(path: &str, ty: &TypeDescriptor, value: &Value) -> SettingsError {
	SettingsError::TypeMismatch {
		path: path.to_owned(),
		expected: ty.name.to_string(),
		got: value.kind_name().to_owned(),
	}
}
