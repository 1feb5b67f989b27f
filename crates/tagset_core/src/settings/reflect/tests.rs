use crate::settings::{
	DecodeOptions, EncodeOptions, SettingValue, SettingsError, Storage, TaggedNode, TypeKind, Value, classify, decode_node, encode_value,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum SampleEnum {
	Value1,
	Value2,
	Value3,
}

crate::setting_enum!(SampleEnum { Value1, Value2, Value3 });

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct ColorRgb {
	red: i32,
	green: i32,
	blue: i32,
}

crate::setting_struct!(ColorRgb { red: i32 => "Red", green: i32 => "Green", blue: i32 => "Blue" });

#[derive(Debug, Clone, PartialEq)]
struct SampleComplex {
	int_field: i32,
	string_prop: String,
	nested: ColorRgb,
	note: Option<String>,
}

impl Default for SampleComplex {
	fn default() -> Self {
		Self {
			int_field: 10,
			string_prop: "Default Value".to_owned(),
			nested: ColorRgb {
				red: 125,
				green: 125,
				blue: 125,
			},
			note: None,
		}
	}
}

crate::setting_struct!(SampleComplex {
	int_field: i32 => "IntField",
	string_prop: String => "StringProp",
	nested: ColorRgb => "SampleNestedStruct",
	note: Option<String>,
});

fn round_trip<T: SettingValue>(value: &T) -> T {
	let ty = T::descriptor();
	let node = encode_value(&value.to_value(), &ty, &EncodeOptions::default()).expect("encodes");
	let decoded = decode_node(&node, &ty, &DecodeOptions::default()).expect("decodes");
	T::from_value(decoded).expect("converts back")
}

#[test]
fn primitive_descriptors_carry_widths() {
	assert_eq!(u8::descriptor().storage, Storage::Int { bits: 8, signed: false });
	assert_eq!(i64::descriptor().storage, Storage::Int { bits: 64, signed: true });
	assert_eq!(i128::descriptor().storage, Storage::Int { bits: 128, signed: true });
	assert_eq!(f32::descriptor().storage, Storage::Float { bits: 32 });
	assert_eq!(classify(&usize::descriptor()).expect("usize classifies"), TypeKind::Primitive);
}

#[test]
fn primitives_round_trip() {
	assert_eq!(round_trip(&-12_i8), -12);
	assert_eq!(round_trip(&65_535_u16), 65_535);
	assert_eq!(round_trip(&(1_i64 << 53)), 1_i64 << 53);
	assert_eq!(round_trip(&0.1_f32), 0.1);
	assert_eq!(round_trip(&0.1_f64), 0.1);
	assert!(round_trip(&true));
	assert_eq!(round_trip(&'x'), 'x');
	assert_eq!(round_trip(&"hello".to_owned()), "hello");
}

#[test]
fn enum_round_trips_by_member_name() {
	let node = encode_value(&SampleEnum::Value2.to_value(), &SampleEnum::descriptor(), &EncodeOptions::default()).expect("encodes");
	assert_eq!(node, TaggedNode::string("Value2"));
	assert_eq!(round_trip(&SampleEnum::Value3), SampleEnum::Value3);
	assert_eq!(classify(&SampleEnum::descriptor()).expect("classifies"), TypeKind::Enum);
}

#[test]
fn enum_default_is_zero_member() {
	let default = SampleEnum::descriptor().default_instance();
	assert_eq!(SampleEnum::from_value(default).expect("converts"), SampleEnum::Value1);
}

#[test]
fn unknown_enum_member_fails_conversion() {
	let value = Value::Enum(crate::settings::EnumValue::new("Value9", 8));
	let err = SampleEnum::from_value(value).expect_err("Value9 is not declared");
	assert!(matches!(err, SettingsError::UnknownEnumMember { .. }));
}

#[test]
fn struct_descriptor_uses_wire_names_and_default() {
	let ty = SampleComplex::descriptor();
	let names: Vec<&str> = ty.fields().iter().map(|field| field.name.as_ref()).collect();
	assert_eq!(names, vec!["IntField", "StringProp", "SampleNestedStruct", "note"]);
	assert_eq!(SampleComplex::from_value(ty.default_instance()).expect("default converts"), SampleComplex::default());
}

#[test]
fn struct_round_trips() {
	let value = SampleComplex {
		int_field: -4,
		string_prop: "changed".to_owned(),
		nested: ColorRgb { red: 1, green: 2, blue: 3 },
		note: Some("hi".to_owned()),
	};
	assert_eq!(round_trip(&value), value);
	assert_eq!(round_trip(&SampleComplex::default()), SampleComplex::default());
}

#[test]
fn option_none_encodes_as_undefined() {
	let ty = Option::<u8>::descriptor();
	assert!(ty.nullable);
	assert_eq!(ty.name.as_ref(), "u8");
	let node = encode_value(&None::<u8>.to_value(), &ty, &EncodeOptions::default()).expect("encodes");
	assert_eq!(node, TaggedNode::Undefined);
	assert_eq!(round_trip(&None::<u8>), None);
	assert_eq!(round_trip(&Some(7_u8)), Some(7));
}

#[test]
fn vec_values_have_no_encoding() {
	let ty = Vec::<i32>::descriptor();
	assert_eq!(ty.name.as_ref(), "Vec<i32>");
	assert_eq!(classify(&ty).expect("classifies"), TypeKind::Array);
	let err = encode_value(&vec![1_i32, 2].to_value(), &ty, &EncodeOptions::default()).expect_err("arrays are unsupported");
	assert!(matches!(err, SettingsError::UnsupportedType { .. }));
	assert_eq!(Vec::<i32>::from_value(Value::Array(vec![Value::Int(1)])).expect("converts"), vec![1]);
}

#[test]
fn out_of_range_integer_is_an_invalid_value() {
	let err = u8::from_value(Value::Int(300)).expect_err("300 does not fit u8");
	assert!(matches!(err, SettingsError::InvalidValue { got: "int", .. }));
	let err = i32::from_value(Value::string("1")).expect_err("strings are not integers");
	assert!(matches!(err, SettingsError::InvalidValue { expected: "integer", got: "string", .. }));
}
