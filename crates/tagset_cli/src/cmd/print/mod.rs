use std::fmt::Write;

use tagset::settings::{Scalar, TaggedNode};

/// Output truncation limits for tagged trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of children printed for a single object.
	pub max_fields_per_object: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum recursive print depth for nested objects.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_object: 80,
			max_string_len: 200,
			max_print_depth: 6,
		}
	}
}

/// Render one tagged tree as indented text.
pub fn render_node(node: &TaggedNode, indent: usize, options: PrintOptions) -> String {
	let mut out = String::new();
	write_node(&mut out, node, indent, 0, options);
	out
}

fn write_node(out: &mut String, node: &TaggedNode, indent: usize, depth: u32, options: PrintOptions) {
	match node {
		TaggedNode::Undefined => out.push_str("null"),
		TaggedNode::Scalar(Scalar::String(v)) => {
			let _ = write!(out, "{:?}", truncate(v, options.max_string_len));
		}
		TaggedNode::Scalar(Scalar::Number(v)) => {
			let _ = write!(out, "{v}");
		}
		TaggedNode::Scalar(Scalar::Boolean(v)) => {
			let _ = write!(out, "{v}");
		}
		TaggedNode::Object(fields) => {
			if depth >= options.max_print_depth {
				let _ = write!(out, "{{ ... {} fields }}", fields.len());
				return;
			}
			if fields.is_empty() {
				out.push_str("{}");
				return;
			}

			let pad = " ".repeat(indent);
			out.push_str("{\n");
			for field in fields.iter().take(options.max_fields_per_object) {
				let _ = write!(out, "{pad}  {} = ", field.name);
				write_node(out, &field.node, indent + 2, depth + 1, options);
				out.push('\n');
			}
			if fields.len() > options.max_fields_per_object {
				let _ = writeln!(out, "{pad}  ... {} more fields", fields.len() - options.max_fields_per_object);
			}
			let _ = write!(out, "{pad}}}");
		}
	}
}

fn truncate(value: &str, max_len: usize) -> String {
	if value.chars().count() <= max_len {
		return value.to_owned();
	}
	let mut out: String = value.chars().take(max_len).collect();
	out.push_str("...");
	out
}
