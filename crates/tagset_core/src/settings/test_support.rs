use crate::settings::{EnumMember, EnumValue, FieldDescriptor, StructValue, TypeDescriptor, Value};

pub(crate) fn i32_ty() -> TypeDescriptor {
	TypeDescriptor::int("i32", 32, true)
}

pub(crate) fn sample_enum() -> TypeDescriptor {
	TypeDescriptor::enumeration(
		"SampleEnum",
		vec![EnumMember::new("Value1", 0), EnumMember::new("Value2", 1), EnumMember::new("Value3", 2)],
	)
}

pub(crate) fn enum_value(member: &str, discriminant: i64) -> Value {
	Value::Enum(EnumValue::new(member, discriminant))
}

pub(crate) fn color_value(red: i128, green: i128, blue: i128) -> Value {
	Value::Struct(
		StructValue::new("ColorRGB")
			.with_field("Red", Value::Int(red))
			.with_field("Green", Value::Int(green))
			.with_field("Blue", Value::Int(blue)),
	)
}

pub(crate) fn color_rgb() -> TypeDescriptor {
	TypeDescriptor::structure(
		"ColorRGB",
		vec![
			FieldDescriptor::new("Red", i32_ty()),
			FieldDescriptor::new("Green", i32_ty()),
			FieldDescriptor::new("Blue", i32_ty()),
		],
		color_value(0, 0, 0),
	)
}

pub(crate) fn sample_complex_value(int_field: i128, string_prop: &str, color: Value) -> Value {
	Value::Struct(
		StructValue::new("SampleComplexClass")
			.with_field("IntField", Value::Int(int_field))
			.with_field("StringProp", Value::string(string_prop))
			.with_field("SampleNestedStruct", color),
	)
}

pub(crate) fn sample_complex() -> TypeDescriptor {
	TypeDescriptor::structure(
		"SampleComplexClass",
		vec![
			FieldDescriptor::new("IntField", i32_ty()),
			FieldDescriptor::new("StringProp", TypeDescriptor::string()),
			FieldDescriptor::new("SampleNestedStruct", color_rgb()),
		],
		sample_complex_value(10, "Default Value", color_value(125, 125, 125)),
	)
}
