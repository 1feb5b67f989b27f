use crate::settings::test_support::{color_value, sample_complex, sample_complex_value};
use crate::settings::{
	DecodeOptions, EncodeOptions, NodeField, SettingRecord, SettingsError, TaggedNode, WriteOptions, decode_node, encode_value, read_document,
	read_node, write_document, write_node,
};

fn sample_node() -> TaggedNode {
	let value = sample_complex_value(10, "Default Value", color_value(125, 125, 125));
	encode_value(&value, &sample_complex(), &EncodeOptions::default()).expect("sample encodes")
}

#[test]
fn writes_are_byte_identical() {
	let node = sample_node();
	let first = write_node(&node, &WriteOptions::default()).expect("first write");
	let second = write_node(&node, &WriteOptions::default()).expect("second write");
	assert_eq!(first, second);
}

#[test]
fn children_are_written_in_stored_order() {
	let text = String::from_utf8(write_node(&sample_node(), &WriteOptions::compact()).expect("write")).expect("utf8");
	assert_eq!(
		text,
		"{\"IntField\":10.0,\"StringProp\":\"Default Value\",\"SampleNestedStruct\":{\"Red\":125.0,\"Green\":125.0,\"Blue\":125.0}}\n"
	);
}

#[test]
fn parse_preserves_child_order_and_values() {
	let node = sample_node();
	let parsed = read_node(&write_node(&node, &WriteOptions::default()).expect("write")).expect("parse");
	assert_eq!(parsed, node);
	assert_eq!(parsed.child_names(), vec!["IntField", "StringProp", "SampleNestedStruct"]);
	let nested = parsed.child("SampleNestedStruct").expect("nested child");
	assert_eq!(nested.child_names(), vec!["Red", "Green", "Blue"]);
}

#[test]
fn example_scenario_survives_text_round_trip() {
	let value = sample_complex_value(10, "Default Value", color_value(125, 125, 125));
	let bytes = write_node(&sample_node(), &WriteOptions::default()).expect("write");
	let parsed = read_node(&bytes).expect("parse");
	let decoded = decode_node(&parsed, &sample_complex(), &DecodeOptions::default()).expect("decode");
	assert_eq!(decoded, value);
}

#[test]
fn numbers_keep_full_precision() {
	for value in [0.1, 1.0 / 3.0, 2_f64.powi(53), -1e-300, f64::MAX] {
		let bytes = write_node(&TaggedNode::number(value), &WriteOptions::compact()).expect("write");
		assert_eq!(read_node(&bytes).expect("parse"), TaggedNode::number(value));
	}
}

#[test]
fn non_finite_numbers_cannot_be_written() {
	let err = write_node(&TaggedNode::number(f64::NAN), &WriteOptions::default()).expect_err("NaN has no text form");
	assert!(matches!(err, SettingsError::MalformedDocument { .. }));
}

#[test]
fn scalars_parse_by_lexical_form() {
	assert_eq!(read_node(b"\"7\"").expect("string"), TaggedNode::string("7"));
	assert_eq!(read_node(b"7").expect("integer literal"), TaggedNode::number(7.0));
	assert_eq!(read_node(b"-7").expect("negative literal"), TaggedNode::number(-7.0));
	assert_eq!(read_node(b"7.5").expect("float literal"), TaggedNode::number(7.5));
	assert_eq!(read_node(b"false").expect("boolean"), TaggedNode::boolean(false));
	assert_eq!(read_node(b"null").expect("null"), TaggedNode::Undefined);
}

#[test]
fn undefined_is_written_as_null() {
	let node = TaggedNode::Object(vec![NodeField::new("Missing", TaggedNode::Undefined)]);
	let bytes = write_node(&node, &WriteOptions::compact()).expect("write");
	assert_eq!(bytes, b"{\"Missing\":null}\n");
	assert_eq!(read_node(&bytes).expect("parse"), node);
}

#[test]
fn malformed_text_is_rejected() {
	for text in [&b"{\"a\": 1"[..], b"{\"a\" 1}", b"tru", b"{\"a\": 1} trailing"] {
		let err = read_node(text).expect_err("malformed");
		assert!(matches!(err, SettingsError::MalformedDocument { .. }), "{err}");
	}
}

#[test]
fn arrays_and_duplicate_keys_are_rejected() {
	let err = read_node(b"[1, 2]").expect_err("arrays");
	assert!(matches!(err, SettingsError::MalformedDocument { ref message } if message.contains("array")));

	let err = read_node(b"{\"a\": 1, \"a\": 2}").expect_err("duplicate key");
	assert!(matches!(err, SettingsError::MalformedDocument { ref message } if message.contains("duplicate")));
}

#[test]
fn document_round_trips_in_entry_order() {
	let records = vec![
		SettingRecord {
			identifier: "SampleIntSetting".to_owned(),
			group: "Integer Settings".to_owned(),
			value: TaggedNode::number(25.0),
		},
		SettingRecord {
			identifier: "SampleComplexSetting".to_owned(),
			group: "Un-Grouped".to_owned(),
			value: sample_node(),
		},
	];
	let bytes = write_document(&records, &WriteOptions::default()).expect("write");
	assert_eq!(read_document(&bytes).expect("parse"), records);
}

#[test]
fn record_keys_are_written_identifier_first() {
	let records = vec![SettingRecord {
		identifier: "A".to_owned(),
		group: "G".to_owned(),
		value: TaggedNode::boolean(true),
	}];
	let bytes = write_document(&records, &WriteOptions::compact()).expect("write");
	assert_eq!(bytes, b"[{\"identifier\":\"A\",\"group\":\"G\",\"value\":true}]\n");
}

#[test]
fn empty_document_has_no_entries() {
	assert!(read_document(b"").expect("empty").is_empty());
	assert!(read_document(b" \n\t").expect("whitespace").is_empty());
	assert!(read_document(b"[]").expect("empty list").is_empty());
}

#[test]
fn absent_value_reads_as_undefined() {
	let records = read_document(br#"[{"identifier": "A", "group": "G"}]"#).expect("parse");
	assert_eq!(records[0].value, TaggedNode::Undefined);
}

#[test]
fn duplicate_identifiers_are_rejected() {
	let text = br#"[{"identifier": "A", "group": "G", "value": 1}, {"identifier": "A", "group": "G", "value": 2}]"#;
	let err = read_document(text).expect_err("duplicate identifier");
	assert!(matches!(err, SettingsError::MalformedDocument { .. }));
}
