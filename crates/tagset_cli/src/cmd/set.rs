use std::path::PathBuf;

use serde::Serialize;
use tagset::settings::{DecodeOptions, EncodeOptions, SettingsError, decode_node};

use crate::cmd::print::{PrintOptions, render_node};
use crate::cmd::sample::sample_catalog;
use crate::cmd::util::{emit_json, node_json, parse_node_arg};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	pub identifier: String,
	/// New value as a JSON literal, e.g. `42`, `"text"`, or `{"Red": 1}`.
	pub value: String,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct SetJson {
	identifier: String,
	outcome: &'static str,
	message: Option<String>,
	applied: bool,
	saved: bool,
	value: serde_json::Value,
}

/// Decode, validate, and store one value of the sample catalog.
pub fn run(args: Args) -> tagset::settings::Result<()> {
	let Args {
		path,
		identifier,
		value,
		json,
	} = args;

	let catalog = sample_catalog(&path)?;
	catalog.load()?;

	let setting = catalog
		.snapshot()
		.into_iter()
		.find(|setting| setting.identifier() == identifier)
		.ok_or_else(|| SettingsError::UnknownSetting {
			identifier: identifier.clone(),
		})?;
	let node = parse_node_arg(&value)?;
	let decoded = decode_node(&node, setting.descriptor(), &DecodeOptions::strict())?;

	let report = catalog.update(&identifier, decoded)?;
	let saved = report.applied;
	if saved {
		catalog.save()?;
	}

	let current = catalog
		.snapshot()
		.into_iter()
		.find(|setting| setting.identifier() == identifier)
		.map(|setting| setting.encode(&EncodeOptions::default()))
		.transpose()?
		.unwrap_or_default();

	if json {
		let payload = SetJson {
			identifier,
			outcome: report.outcome().as_str(),
			message: report.validation.message().map(str::to_owned),
			applied: report.applied,
			saved,
			value: node_json(&current)?,
		};
		return emit_json(&payload);
	}

	match report.validation.message() {
		Some(message) => println!("{identifier}: {} ({message})", report.outcome().as_str()),
		None => println!("{identifier}: {}", report.outcome().as_str()),
	}
	println!("value = {}", render_node(&current, 0, PrintOptions::default()));
	println!("saved: {saved}");

	Ok(())
}
