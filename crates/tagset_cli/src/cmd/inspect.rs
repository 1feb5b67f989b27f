use std::path::PathBuf;

use serde::Serialize;
use tagset::settings::read_document;

use crate::cmd::print::{PrintOptions, render_node};
use crate::cmd::util::{emit_json, node_json};

#[derive(clap::Args)]
pub struct Args {
	#[arg(env = "TAGSET_STORE")]
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct InspectJson {
	path: String,
	entries: Vec<EntryJson>,
}

#[derive(Serialize)]
struct EntryJson {
	identifier: String,
	group: String,
	kind: String,
	depth: usize,
	value: serde_json::Value,
}

/// Parse a settings document and print each entry.
pub fn run(args: Args) -> tagset::settings::Result<()> {
	let Args { path, json } = args;

	let bytes = std::fs::read(&path)?;
	let records = read_document(&bytes)?;

	if json {
		let payload = InspectJson {
			path: path.display().to_string(),
			entries: records
				.iter()
				.map(|record| {
					Ok(EntryJson {
						identifier: record.identifier.clone(),
						group: record.group.clone(),
						kind: format!("{:?}", record.value.kind()),
						depth: record.value.depth(),
						value: node_json(&record.value)?,
					})
				})
				.collect::<tagset::settings::Result<_>>()?,
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("entries: {}", records.len());
	for record in &records {
		println!();
		println!("{} [{}]", record.identifier, record.group);
		println!("  value = {}", render_node(&record.value, 2, PrintOptions::default()));
	}

	Ok(())
}
