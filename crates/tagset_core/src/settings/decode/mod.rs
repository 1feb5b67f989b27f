use crate::settings::{
	EnumValue, Result, Scalar, SettingsError, Storage, StructValue, TaggedNode, TaggedValueKind, TypeDescriptor, TypeKind, Value, classify,
};

/// Runtime limits and behavior switches for node decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum recursive struct nesting depth.
	pub max_depth: u32,
	/// Reject object children that name no declared field.
	pub strict_fields: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 32,
			strict_fields: false,
		}
	}
}

impl DecodeOptions {
	/// Preset that rejects unknown object children.
	pub fn strict() -> Self {
		Self {
			strict_fields: true,
			..Self::default()
		}
	}
}

/// Decode a tagged node tree against the requested type.
pub fn decode_node(node: &TaggedNode, ty: &TypeDescriptor, opt: &DecodeOptions) -> Result<Value> {
	decode_impl(node, ty, opt, &ty.name, 0)
}

fn decode_impl(node: &TaggedNode, ty: &TypeDescriptor, opt: &DecodeOptions, path: &str, depth: u32) -> Result<Value> {
	if depth >= opt.max_depth {
		return Err(SettingsError::DepthExceeded { max_depth: opt.max_depth });
	}

	if matches!(node, TaggedNode::Undefined) {
		return Ok(ty.default_value());
	}

	match classify(ty)? {
		TypeKind::Primitive => decode_primitive(node, ty, path),
		TypeKind::Enum => decode_enum(node, ty, path),
		TypeKind::Structured => decode_struct(node, ty, opt, path, depth),
		TypeKind::Array => Err(SettingsError::UnsupportedKind {
			kind: TaggedValueKind::Array,
		}),
	}
}

fn decode_primitive(node: &TaggedNode, ty: &TypeDescriptor, path: &str) -> Result<Value> {
	let TaggedNode::Scalar(scalar) = node else {
		return Err(mismatch(path, ty, node));
	};

	match (&ty.storage, scalar) {
		(Storage::Bool, Scalar::Boolean(v)) => Ok(Value::Bool(*v)),
		(Storage::Str, Scalar::String(v)) => Ok(Value::String(v.clone())),
		(Storage::Char, Scalar::String(v)) => {
			let mut chars = v.chars();
			match (chars.next(), chars.next()) {
				(Some(ch), None) => Ok(Value::Char(ch)),
				_ => Err(mismatch(path, ty, node)),
			}
		}
		(Storage::Char, Scalar::Number(v)) => {
			let code = narrow_integer(*v, 32, false).and_then(|code| u32::try_from(code).ok());
			code.and_then(char::from_u32).map(Value::Char).ok_or_else(|| out_of_range(ty, *v))
		}
		(Storage::Int { bits, signed: true }, Scalar::Number(v)) => narrow_integer(*v, *bits, true)
			.map(|raw| Value::Int(raw as i128))
			.ok_or_else(|| out_of_range(ty, *v)),
		(Storage::Int { bits, signed: false }, Scalar::Number(v)) => narrow_integer(*v, *bits, false)
			.map(Value::UInt)
			.ok_or_else(|| out_of_range(ty, *v)),
		(Storage::Float { bits: 32 }, Scalar::Number(v)) => {
			let narrowed = *v as f32;
			if v.is_finite() && !narrowed.is_finite() {
				return Err(out_of_range(ty, *v));
			}
			Ok(Value::F32(narrowed))
		}
		(Storage::Float { .. }, Scalar::Number(v)) => Ok(Value::F64(*v)),
		_ => Err(mismatch(path, ty, node)),
	}
}

/// Narrow a wire number to an integer of the given width.
///
/// Signed results are returned in two's complement through the `u128` carrier.
fn narrow_integer(value: f64, bits: u8, signed: bool) -> Option<u128> {
	if !value.is_finite() || value.fract() != 0.0 {
		return None;
	}

	let bits = i32::from(bits);
	let (min, end) = if signed {
		(-(2_f64.powi(bits - 1)), 2_f64.powi(bits - 1))
	} else {
		(0.0, 2_f64.powi(bits))
	};
	if value < min || value >= end {
		return None;
	}

	if signed { Some(value as i128 as u128) } else { Some(value as u128) }
}

fn decode_enum(node: &TaggedNode, ty: &TypeDescriptor, path: &str) -> Result<Value> {
	let TaggedNode::Scalar(Scalar::String(name)) = node else {
		return Err(mismatch(path, ty, node));
	};

	let member = ty.member(name).ok_or_else(|| SettingsError::UnknownEnumMember {
		enum_name: ty.name.to_string(),
		member: name.to_string(),
	})?;
	Ok(Value::Enum(EnumValue::new(member.name.clone(), member.discriminant)))
}

fn decode_struct(node: &TaggedNode, ty: &TypeDescriptor, opt: &DecodeOptions, path: &str, depth: u32) -> Result<Value> {
	let TaggedNode::Object(children) = node else {
		return Err(mismatch(path, ty, node));
	};

	if opt.strict_fields
		&& let Some(extra) = children.iter().find(|child| ty.field(&child.name).is_none())
	{
		return Err(SettingsError::TypeMismatch {
			path: format!("{path}.{}", extra.name),
			expected: format!("a declared field of {}", ty.name),
			got: "undeclared field".to_owned(),
		});
	}

	let mut out = match ty.default_instance() {
		Value::Struct(item) => item,
		_ => StructValue::new(ty.name.clone()),
	};

	for field in ty.fields() {
		// Missing children keep the default instance's value.
		let Some(child) = node.child(&field.name) else {
			continue;
		};
		let child_path = format!("{path}.{}", field.name);
		let value = decode_impl(child, &field.ty, opt, &child_path, depth + 1)?;
		out.set(field.name.clone(), value);
	}

	Ok(Value::Struct(out))
}

fn mismatch(path: &str, ty: &TypeDescriptor, node: &TaggedNode) -> SettingsError {
	SettingsError::TypeMismatch {
		path: path.to_owned(),
		expected: ty.name.to_string(),
		got: format!("{:?}", node.kind()),
	}
}

fn out_of_range(ty: &TypeDescriptor, value: f64) -> SettingsError {
	SettingsError::NumberOutOfRange {
		type_name: ty.name.to_string(),
		value,
	}
}
