use std::path::PathBuf;

use serde::Serialize;
use tagset::settings::{EncodeOptions, LoadReport, SaveReport};

use crate::cmd::print::{PrintOptions, render_node};
use crate::cmd::sample::sample_catalog;
use crate::cmd::util::{FailureJson, emit_json, node_json};

#[derive(clap::Args)]
pub struct Args {
	#[arg(env = "TAGSET_STORE")]
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct DemoJson {
	path: String,
	load: LoadJson,
	settings: Vec<SettingJson>,
	save: SaveJson,
}

#[derive(Serialize)]
struct LoadJson {
	applied: Vec<String>,
	failures: Vec<FailureJson>,
	unknown: Vec<String>,
}

#[derive(Serialize)]
struct SettingJson {
	identifier: String,
	group: String,
	description: Option<String>,
	value: serde_json::Value,
}

#[derive(Serialize)]
struct SaveJson {
	written: Vec<String>,
	failures: Vec<FailureJson>,
	retained: usize,
}

/// Load the sample catalog from `path`, report, and save it back.
pub fn run(args: Args) -> tagset::settings::Result<()> {
	let Args { path, json } = args;

	let catalog = sample_catalog(&path)?;
	let load = catalog.load()?;
	let save = catalog.save()?;

	let mut settings = Vec::new();
	for setting in catalog.snapshot() {
		let node = setting.encode(&EncodeOptions::default())?;
		settings.push((setting, node));
	}

	if json {
		let payload = DemoJson {
			path: path.display().to_string(),
			load: load_json(&load),
			settings: settings
				.iter()
				.map(|(setting, node)| {
					Ok(SettingJson {
						identifier: setting.identifier().to_owned(),
						group: setting.group().to_owned(),
						description: setting.description().map(str::to_owned),
						value: node_json(node)?,
					})
				})
				.collect::<tagset::settings::Result<_>>()?,
			save: save_json(&save),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!(
		"load: applied={} failures={} unknown={}",
		load.applied.len(),
		load.failures.len(),
		load.unknown.len()
	);
	for failure in &load.failures {
		println!("  failed {}: {}", failure.identifier, failure.error);
	}
	for identifier in &load.unknown {
		println!("  retained {identifier}");
	}
	println!();
	println!("settings:");
	for (setting, node) in &settings {
		println!("{} [{}] = {}", setting.identifier(), setting.group(), render_node(node, 0, PrintOptions::default()));
	}
	println!();
	println!(
		"save: written={} failures={} retained={}",
		save.written.len(),
		save.failures.len(),
		save.retained
	);

	Ok(())
}

fn load_json(report: &LoadReport) -> LoadJson {
	LoadJson {
		applied: report.applied.clone(),
		failures: report.failures.iter().map(FailureJson::from).collect(),
		unknown: report.unknown.clone(),
	}
}

fn save_json(report: &SaveReport) -> SaveJson {
	SaveJson {
		written: report.written.clone(),
		failures: report.failures.iter().map(FailureJson::from).collect(),
		retained: report.retained,
	}
}
