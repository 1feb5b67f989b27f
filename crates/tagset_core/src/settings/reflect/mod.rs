use crate::settings::{Result, SettingsError, TypeDescriptor, Value};

/// Rust type that describes itself and converts to and from [`Value`].
///
/// Implement by hand, or generate with [`setting_enum!`](crate::setting_enum) and
/// [`setting_struct!`](crate::setting_struct).
pub trait SettingValue: Sized {
	/// Declared type of this Rust type.
	fn descriptor() -> TypeDescriptor;
	/// Convert to a dynamic value.
	fn to_value(&self) -> Value;
	/// Convert back from a dynamic value.
	fn from_value(value: Value) -> Result<Self>;
}

/// Build the error for a dynamic value that does not belong to `T`.
#[doc(hidden)]
pub fn invalid_value<T>(expected: &'static str, got: &Value) -> SettingsError {
	SettingsError::InvalidValue {
		type_name: std::any::type_name::<T>().to_owned(),
		expected,
		got: got.kind_name(),
	}
}

macro_rules! int_setting_value {
	($signed:literal, $variant:ident: $($ty:ty),+) => {$(
		impl SettingValue for $ty {
			fn descriptor() -> TypeDescriptor {
				TypeDescriptor::int(stringify!($ty), <$ty>::BITS as u8, $signed)
			}

			fn to_value(&self) -> Value {
				Value::$variant((*self).into())
			}

			fn from_value(value: Value) -> Result<Self> {
				let narrowed = match &value {
					Value::Int(v) => <$ty>::try_from(*v).ok(),
					Value::UInt(v) => <$ty>::try_from(*v).ok(),
					_ => return Err(invalid_value::<Self>("integer", &value)),
				};
				narrowed.ok_or_else(|| invalid_value::<Self>(concat!("integer in ", stringify!($ty), " range"), &value))
			}
		}
	)+};
}

int_setting_value!(true, Int: i8, i16, i32, i64, i128);
int_setting_value!(false, UInt: u8, u16, u32, u64, u128);

macro_rules! size_setting_value {
	($signed:literal, $variant:ident, $wide:ty: $ty:ty) => {
		impl SettingValue for $ty {
			fn descriptor() -> TypeDescriptor {
				TypeDescriptor::int(stringify!($ty), <$ty>::BITS as u8, $signed)
			}

			fn to_value(&self) -> Value {
				Value::$variant(*self as $wide)
			}

			fn from_value(value: Value) -> Result<Self> {
				let narrowed = match &value {
					Value::Int(v) => <$ty>::try_from(*v).ok(),
					Value::UInt(v) => <$ty>::try_from(*v).ok(),
					_ => return Err(invalid_value::<Self>("integer", &value)),
				};
				narrowed.ok_or_else(|| invalid_value::<Self>(concat!("integer in ", stringify!($ty), " range"), &value))
			}
		}
	};
}

size_setting_value!(true, Int, i128: isize);
size_setting_value!(false, UInt, u128: usize);

impl SettingValue for f32 {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::float("f32", 32)
	}

	fn to_value(&self) -> Value {
		Value::F32(*self)
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::F32(v) => Ok(v),
			other => Err(invalid_value::<Self>("f32", &other)),
		}
	}
}

impl SettingValue for f64 {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::float("f64", 64)
	}

	fn to_value(&self) -> Value {
		Value::F64(*self)
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::F64(v) => Ok(v),
			Value::F32(v) => Ok(f64::from(v)),
			other => Err(invalid_value::<Self>("f64", &other)),
		}
	}
}

impl SettingValue for bool {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::bool()
	}

	fn to_value(&self) -> Value {
		Value::Bool(*self)
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Bool(v) => Ok(v),
			other => Err(invalid_value::<Self>("bool", &other)),
		}
	}
}

impl SettingValue for char {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::char()
	}

	fn to_value(&self) -> Value {
		Value::Char(*self)
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Char(v) => Ok(v),
			other => Err(invalid_value::<Self>("char", &other)),
		}
	}
}

impl SettingValue for String {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::string()
	}

	fn to_value(&self) -> Value {
		Value::string(self.as_str())
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::String(v) => Ok(v.into_string()),
			other => Err(invalid_value::<Self>("string", &other)),
		}
	}
}

/// `None` is the absent value; the declared type stays `T`.
impl<T: SettingValue> SettingValue for Option<T> {
	fn descriptor() -> TypeDescriptor {
		T::descriptor().nullable()
	}

	fn to_value(&self) -> Value {
		match self {
			Some(item) => item.to_value(),
			None => Value::Null,
		}
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Null => Ok(None),
			other => T::from_value(other).map(Some),
		}
	}
}

impl<T: SettingValue> SettingValue for Vec<T> {
	fn descriptor() -> TypeDescriptor {
		let element = T::descriptor();
		TypeDescriptor::sequence(format!("Vec<{}>", element.name), element)
	}

	fn to_value(&self) -> Value {
		Value::Array(self.iter().map(SettingValue::to_value).collect())
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Array(items) => items.into_iter().map(T::from_value).collect(),
			other => Err(invalid_value::<Self>("array", &other)),
		}
	}
}

/// Implement [`SettingValue`](crate::settings::SettingValue) for a fieldless enum.
///
/// Members are persisted by name. The default is the member whose discriminant
/// is zero, else the first listed member.
///
/// ```
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Quality {
/// 	Low,
/// 	High,
/// }
///
/// tagset::setting_enum!(Quality { Low, High });
/// ```
#[macro_export]
macro_rules! setting_enum {
	($name:ident { $($member:ident),+ $(,)? }) => {
		impl $crate::settings::SettingValue for $name {
			fn descriptor() -> $crate::settings::TypeDescriptor {
				$crate::settings::TypeDescriptor::enumeration(
					stringify!($name),
					vec![$($crate::settings::EnumMember::new(stringify!($member), $name::$member as i64)),+],
				)
			}

			fn to_value(&self) -> $crate::settings::Value {
				let member = match self {
					$($name::$member => $crate::settings::EnumValue::new(stringify!($member), $name::$member as i64)),+
				};
				$crate::settings::Value::Enum(member)
			}

			fn from_value(value: $crate::settings::Value) -> $crate::settings::Result<Self> {
				let item = match value {
					$crate::settings::Value::Enum(item) => item,
					other => return Err($crate::settings::invalid_value::<Self>("enum", &other)),
				};
				$(
					if item.member.as_ref() == stringify!($member) {
						return Ok($name::$member);
					}
				)+
				Err($crate::settings::SettingsError::UnknownEnumMember {
					enum_name: stringify!($name).to_owned(),
					member: item.member.to_string(),
				})
			}
		}
	};
}

/// Implement [`SettingValue`](crate::settings::SettingValue) for a struct with named fields.
///
/// Each field may give its persisted name after `=>`; the Rust field name is
/// used otherwise. The default instance comes from the type's `Default` impl.
///
/// ```
/// #[derive(Debug, Clone, PartialEq, Default)]
/// struct Window {
/// 	width: u32,
/// 	title: String,
/// }
///
/// tagset::setting_struct!(Window { width: u32 => "Width", title: String });
/// ```
#[macro_export]
macro_rules! setting_struct {
	($name:ident { $($field:ident : $ty:ty $(=> $wire:literal)?),+ $(,)? }) => {
		impl $crate::settings::SettingValue for $name {
			fn descriptor() -> $crate::settings::TypeDescriptor {
				let default = <$name as ::core::default::Default>::default();
				$crate::settings::TypeDescriptor::structure(
					stringify!($name),
					vec![$($crate::settings::FieldDescriptor::new(
						$crate::__setting_field_name!($field $(, $wire)?),
						<$ty as $crate::settings::SettingValue>::descriptor(),
					)),+],
					$crate::settings::SettingValue::to_value(&default),
				)
			}

			fn to_value(&self) -> $crate::settings::Value {
				let item = $crate::settings::StructValue::new(stringify!($name))
					$(.with_field(
						$crate::__setting_field_name!($field $(, $wire)?),
						$crate::settings::SettingValue::to_value(&self.$field),
					))+;
				$crate::settings::Value::Struct(item)
			}

			fn from_value(value: $crate::settings::Value) -> $crate::settings::Result<Self> {
				let mut item = match value {
					$crate::settings::Value::Struct(item) => item,
					$crate::settings::Value::Null => return Ok(<$name as ::core::default::Default>::default()),
					other => return Err($crate::settings::invalid_value::<Self>("struct", &other)),
				};
				let mut out = <$name as ::core::default::Default>::default();
				$(
					if let Some(field) = item.take_field($crate::__setting_field_name!($field $(, $wire)?)) {
						out.$field = <$ty as $crate::settings::SettingValue>::from_value(field)?;
					}
				)+
				Ok(out)
			}
		}
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __setting_field_name {
	($field:ident) => {
		stringify!($field)
	};
	($field:ident, $wire:literal) => {
		$wire
	};
}

#[cfg(test)]
mod tests;
