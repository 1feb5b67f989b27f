use std::path::Path;

use tagset::settings::{Catalog, FileStore, Result, Setting, SettingValue, Validation, Value};

pub(crate) const INT_SETTING: &str = "SampleIntSetting";
pub(crate) const STRING_SETTING: &str = "SampleStringSetting";
pub(crate) const ENUM_SETTING: &str = "SampleEnumSetting";
pub(crate) const COMPLEX_SETTING: &str = "SampleComplexSetting";

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SampleEnum {
	Value1,
	Value2,
	Value3,
}

tagset::setting_enum!(SampleEnum { Value1, Value2, Value3 });

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct ColorRgb {
	pub red: i32,
	pub green: i32,
	pub blue: i32,
}

tagset::setting_struct!(ColorRgb { red: i32 => "Red", green: i32 => "Green", blue: i32 => "Blue" });

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SampleComplex {
	pub int_field: i32,
	pub string_prop: String,
	pub nested: ColorRgb,
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
		}
	}
}

tagset::setting_struct!(SampleComplex {
	int_field: i32 => "IntField",
	string_prop: String => "StringProp",
	nested: ColorRgb => "SampleNestedStruct",
});

/// Declare the sample catalog over a file store at `path`.
pub(crate) fn sample_catalog(path: &Path) -> Result<Catalog> {
	let catalog = Catalog::new(FileStore::open(path)?);

	catalog.register(
		Setting::of(INT_SETTING, 25_i32)
			.with_group("Integer Settings")
			.with_description("This is sample integer setting"),
	)?;
	catalog.register(Setting::of(STRING_SETTING, "Default Value".to_owned()).with_description("This is sample string setting"))?;
	catalog.register(Setting::of(ENUM_SETTING, SampleEnum::Value1).with_description("This is sample enum setting"))?;
	catalog.register(Setting::of(COMPLEX_SETTING, SampleComplex::default()).with_description("This is sample complex setting"))?;

	catalog.register_validator(INT_SETTING, |value, _| match i32::from_value(value.clone()) {
		Ok(v) if (0..=100).contains(&v) => Validation::Passed,
		_ => Validation::Error("value must be between 0 and 100".to_owned()),
	})?;
	catalog.register_validator(STRING_SETTING, |value, _| match value {
		Value::String(v) if v.trim().is_empty() => Validation::Warning("value is empty".to_owned()),
		_ => Validation::Passed,
	})?;
	catalog.register_validator(COMPLEX_SETTING, |value, _| match SampleComplex::from_value(value.clone()) {
		Ok(item) if [item.nested.red, item.nested.green, item.nested.blue].iter().all(|channel| (0..=255).contains(channel)) => {
			Validation::Passed
		}
		Ok(_) => Validation::Error("colour channels must be between 0 and 255".to_owned()),
		Err(err) => Validation::Error(err.to_string()),
	})?;

	Ok(catalog)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_catalog_declares_four_settings() {
		let dir = tagset_testkit::scratch_dir();
		let catalog = sample_catalog(&dir.path().join("settings.json")).expect("catalog builds");
		assert_eq!(catalog.identifiers(), vec![INT_SETTING, STRING_SETTING, ENUM_SETTING, COMPLEX_SETTING]);
		assert_eq!(catalog.get_as::<SampleComplex>(COMPLEX_SETTING).expect("complex"), SampleComplex::default());
	}

	#[test]
	fn validators_classify_updates() {
		let dir = tagset_testkit::scratch_dir();
		let catalog = sample_catalog(&dir.path().join("settings.json")).expect("catalog builds");

		let report = catalog.update(INT_SETTING, Value::Int(101)).expect("update runs");
		assert!(!report.applied);

		let report = catalog.update(STRING_SETTING, Value::string(" ")).expect("update runs");
		assert!(report.applied);
		assert_eq!(report.validation, Validation::Warning("value is empty".to_owned()));

		let mut complex = SampleComplex::default();
		complex.nested.blue = 300;
		let report = catalog.update_typed(COMPLEX_SETTING, &complex).expect("update runs");
		assert!(!report.applied);
	}
}
