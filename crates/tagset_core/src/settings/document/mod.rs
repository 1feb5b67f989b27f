use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::settings::{NodeField, Result, Scalar, SettingsError, TaggedNode};

/// Output formatting for persisted documents.
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
	/// Indent nested objects.
	pub pretty: bool,
}

impl Default for WriteOptions {
	fn default() -> Self {
		Self { pretty: true }
	}
}

impl WriteOptions {
	/// Single-line output.
	pub fn compact() -> Self {
		Self { pretty: false }
	}
}

/// One persisted setting: identifier, group, and encoded value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingRecord {
	/// Unique setting identifier.
	pub identifier: String,
	/// Display group name.
	pub group: String,
	/// Encoded value; absent reads as undefined.
	#[serde(default)]
	pub value: TaggedNode,
}

impl Serialize for TaggedNode {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Undefined => serializer.serialize_none(),
			Self::Scalar(Scalar::String(value)) => serializer.serialize_str(value),
			Self::Scalar(Scalar::Boolean(value)) => serializer.serialize_bool(*value),
			Self::Scalar(Scalar::Number(value)) => {
				if !value.is_finite() {
					return Err(ser::Error::custom(format!("number {value} has no text form")));
				}
				serializer.serialize_f64(*value)
			}
			Self::Object(fields) => {
				let mut map = serializer.serialize_map(Some(fields.len()))?;
				for field in fields {
					map.serialize_entry(field.name.as_ref(), &field.node)?;
				}
				map.end()
			}
		}
	}
}

impl<'de> Deserialize<'de> for TaggedNode {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		deserializer.deserialize_any(NodeVisitor)
	}
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
	type Value = TaggedNode;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a string, number, boolean, null, or object")
	}

	fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<TaggedNode, E> {
		Ok(TaggedNode::boolean(value))
	}

	fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<TaggedNode, E> {
		Ok(TaggedNode::number(value as f64))
	}

	fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<TaggedNode, E> {
		Ok(TaggedNode::number(value as f64))
	}

	fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<TaggedNode, E> {
		Ok(TaggedNode::number(value))
	}

	fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<TaggedNode, E> {
		Ok(TaggedNode::string(value))
	}

	fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<TaggedNode, E> {
		Ok(TaggedNode::string(value))
	}

	fn visit_unit<E: de::Error>(self) -> std::result::Result<TaggedNode, E> {
		Ok(TaggedNode::Undefined)
	}

	fn visit_none<E: de::Error>(self) -> std::result::Result<TaggedNode, E> {
		Ok(TaggedNode::Undefined)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<TaggedNode, D::Error> {
		TaggedNode::deserialize(deserializer)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, _seq: A) -> std::result::Result<TaggedNode, A::Error> {
		Err(de::Error::custom("array payloads are not supported"))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<TaggedNode, A::Error> {
		let mut fields: Vec<NodeField> = Vec::new();
		while let Some(name) = map.next_key::<String>()? {
			if fields.iter().any(|field| field.name.as_ref() == name) {
				return Err(de::Error::custom(format!("duplicate key {name:?}")));
			}
			let node = map.next_value::<TaggedNode>()?;
			fields.push(NodeField::new(name, node));
		}
		Ok(TaggedNode::Object(fields))
	}
}

fn to_bytes<T: Serialize + ?Sized>(value: &T, opt: &WriteOptions) -> Result<Vec<u8>> {
	let mut out = if opt.pretty {
		serde_json::to_vec_pretty(value)?
	} else {
		serde_json::to_vec(value)?
	};
	out.push(b'\n');
	Ok(out)
}

/// Serialize one node tree to text.
pub fn write_node(node: &TaggedNode, opt: &WriteOptions) -> Result<Vec<u8>> {
	to_bytes(node, opt)
}

/// Parse one node tree from text.
pub fn read_node(bytes: &[u8]) -> Result<TaggedNode> {
	Ok(serde_json::from_slice(bytes)?)
}

/// Serialize a full settings document.
pub fn write_document(records: &[SettingRecord], opt: &WriteOptions) -> Result<Vec<u8>> {
	to_bytes(records, opt)
}

/// Parse a full settings document.
///
/// Empty or whitespace-only input is an empty document.
pub fn read_document(bytes: &[u8]) -> Result<Vec<SettingRecord>> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(Vec::new());
	}

	let records: Vec<SettingRecord> = serde_json::from_slice(bytes)?;
	let mut seen = HashSet::new();
	for record in &records {
		if !seen.insert(record.identifier.as_str()) {
			return Err(SettingsError::malformed(format!("duplicate setting identifier {:?}", record.identifier)));
		}
	}
	Ok(records)
}

#[cfg(test)]
mod tests;
