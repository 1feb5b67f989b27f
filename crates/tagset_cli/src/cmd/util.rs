use serde::Serialize;
use tagset::settings::{Result, SettingFailure, SettingsError, TaggedNode, read_node};

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload)?;
	println!("{text}");
	Ok(())
}

/// Parse a command-line JSON literal into a tagged node.
pub(crate) fn parse_node_arg(text: &str) -> Result<TaggedNode> {
	read_node(text.as_bytes()).map_err(|err| match err {
		SettingsError::MalformedDocument { message } => SettingsError::MalformedDocument {
			message: format!("value argument {text:?}: {message}"),
		},
		other => other,
	})
}

/// Convert a node into a JSON value for structured output.
pub(crate) fn node_json(node: &TaggedNode) -> Result<serde_json::Value> {
	Ok(serde_json::to_value(node)?)
}

/// Per-setting failure in structured output.
#[derive(Serialize)]
pub(crate) struct FailureJson {
	pub identifier: String,
	pub error: String,
}

impl From<&SettingFailure> for FailureJson {
	fn from(failure: &SettingFailure) -> Self {
		Self {
			identifier: failure.identifier.clone(),
			error: failure.error.to_string(),
		}
	}
}
