use std::path::Path;
use std::process::{Command, Output};

use tagset_testkit::{copy_fixture, fixture_path, parse_json, scratch_dir};

fn run_tagset(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_tagset"))
		.args(args)
		.env_remove("TAGSET_STORE")
		.env_remove("RUST_LOG")
		.output()
		.expect("tagset command executes")
}

fn run_tagset_json(args: &[&str]) -> serde_json::Value {
	let output = run_tagset(args);
	assert!(
		output.status.success(),
		"tagset command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	parse_json(&output.stdout)
}

fn path_arg(path: &Path) -> String {
	path.to_string_lossy().into_owned()
}

#[test]
fn inspect_json_lists_entries_in_order() {
	let fixture = path_arg(&fixture_path("sample_settings.json"));
	let json = run_tagset_json(&["inspect", &fixture, "--json"]);

	let entries = json["entries"].as_array().expect("entries array");
	assert_eq!(entries.len(), 5);
	assert_eq!(entries[0]["identifier"], "SampleIntSetting");
	assert_eq!(entries[0]["group"], "Integer Settings");
	assert_eq!(entries[0]["kind"], "Number");
	assert_eq!(entries[3]["kind"], "Object");
	assert_eq!(entries[3]["depth"], 3);
	assert_eq!(entries[3]["value"]["SampleNestedStruct"]["Green"], 20.0);
}

#[test]
fn inspect_text_renders_tree() {
	let fixture = path_arg(&fixture_path("sample_settings.json"));
	let output = run_tagset(&["inspect", &fixture]);
	assert!(output.status.success());
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("entries: 5"), "{stdout}");
	assert!(stdout.contains("SampleComplexSetting [Un-Grouped]"), "{stdout}");
	assert!(stdout.contains("Blue = 30"), "{stdout}");
}

#[test]
fn inspect_reads_store_from_env() {
	let fixture = path_arg(&fixture_path("sample_settings.json"));
	let output = Command::new(env!("CARGO_BIN_EXE_tagset"))
		.args(["inspect", "--json"])
		.env("TAGSET_STORE", &fixture)
		.output()
		.expect("tagset command executes");
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
	assert_eq!(parse_json(&output.stdout)["entries"].as_array().map(Vec::len), Some(5));
}

#[test]
fn demo_creates_and_saves_defaults() {
	let dir = scratch_dir();
	let path = dir.path().join("nested").join("Test.json");
	let json = run_tagset_json(&["demo", &path_arg(&path), "--json"]);

	assert_eq!(json["load"]["applied"].as_array().map(Vec::len), Some(0));
	assert_eq!(json["save"]["written"].as_array().map(Vec::len), Some(4));
	assert_eq!(json["settings"][0]["value"], 25.0);
	assert_eq!(json["settings"][2]["value"], "Value1");
	assert_eq!(json["settings"][3]["value"]["SampleNestedStruct"]["Red"], 125.0);

	let saved = parse_json(&std::fs::read(&path).expect("document written"));
	assert_eq!(saved[1]["identifier"], "SampleStringSetting");
	assert_eq!(saved[1]["value"], "Default Value");
}

#[test]
fn demo_reports_drift_and_keeps_retained_entries() {
	let dir = scratch_dir();
	let path = copy_fixture("sample_settings.json", dir.path());
	let json = run_tagset_json(&["demo", &path_arg(&path), "--json"]);
	assert_eq!(json["load"]["unknown"][0], "RetiredSetting");
	assert_eq!(json["save"]["retained"], 1);
	assert_eq!(json["settings"][2]["value"], "Value2");

	let path = copy_fixture("drifted_settings.json", dir.path());
	let json = run_tagset_json(&["demo", &path_arg(&path), "--json"]);
	assert_eq!(json["load"]["failures"][0]["identifier"], "SampleEnumSetting");
	let error = json["load"]["failures"][0]["error"].as_str().expect("error text");
	assert!(error.contains("Value9"), "{error}");
	assert_eq!(json["settings"][2]["value"], "Value1");
}

#[test]
fn set_applies_valid_values() {
	let dir = scratch_dir();
	let path = path_arg(&dir.path().join("settings.json"));

	let json = run_tagset_json(&["set", &path, "SampleEnumSetting", "\"Value3\"", "--json"]);
	assert_eq!(json["outcome"], "success");
	assert_eq!(json["saved"], true);

	let json = run_tagset_json(&["set", &path, "SampleComplexSetting", r#"{"SampleNestedStruct": {"Blue": 7}}"#, "--json"]);
	assert_eq!(json["value"]["SampleNestedStruct"]["Blue"], 7.0);
	assert_eq!(json["value"]["IntField"], 10.0);

	let json = run_tagset_json(&["inspect", &path, "--json"]);
	assert_eq!(json["entries"][2]["value"], "Value3");
}

#[test]
fn set_reports_validation_outcomes() {
	let dir = scratch_dir();
	let path = path_arg(&dir.path().join("settings.json"));

	let json = run_tagset_json(&["set", &path, "SampleIntSetting", "500", "--json"]);
	assert_eq!(json["outcome"], "failure");
	assert_eq!(json["applied"], false);
	assert_eq!(json["saved"], false);
	assert_eq!(json["value"], 25.0);

	let json = run_tagset_json(&["set", &path, "SampleStringSetting", "\"\"", "--json"]);
	assert_eq!(json["outcome"], "warning");
	assert_eq!(json["message"], "value is empty");
	assert_eq!(json["saved"], true);
}

#[test]
fn set_errors_exit_nonzero() {
	let dir = scratch_dir();
	let path = path_arg(&dir.path().join("settings.json"));

	for (identifier, value, needle) in [
		("Missing", "1", "unknown setting"),
		("SampleEnumSetting", "\"Value9\"", "unknown member"),
		("SampleIntSetting", "\"x\"", "type mismatch"),
		("SampleIntSetting", "1.5", "does not fit"),
		("SampleIntSetting", "[1]", "malformed document"),
		("SampleComplexSetting", r#"{"Alpha": 1}"#, "undeclared field"),
	] {
		let output = run_tagset(&["set", &path, identifier, value]);
		assert_eq!(output.status.code(), Some(1), "{identifier} {value}");
		let stderr = String::from_utf8_lossy(&output.stderr);
		assert!(stderr.contains("error:") && stderr.contains(needle), "{identifier} {value}: {stderr}");
	}
}

#[test]
fn inspect_rejects_malformed_document() {
	let dir = scratch_dir();
	let path = dir.path().join("broken.json");
	std::fs::write(&path, b"[{\"identifier\": \"A\"").expect("write broken document");
	let output = run_tagset(&["inspect", &path_arg(&path)]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("malformed document"));
}
