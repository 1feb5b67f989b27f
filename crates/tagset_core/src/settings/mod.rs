mod catalog;
mod classify;
mod decode;
mod descriptor;
mod document;
mod encode;
mod error;
mod node;
mod reflect;
mod setting;
mod storage;
mod value;

#[cfg(test)]
mod test_support;

/// Settings catalog, validation outcomes, and load/save reports.
pub use catalog::{
	BatchReport, Catalog, CatalogOptions, CatalogSnapshot, LoadReport, SaveReport, SettingFailure, UpdateOutcome, Validation, ValidationReport,
	Validator,
};
/// Type classification entry point.
pub use classify::{TypeKind, classify};
/// Node decoding entry point and options.
pub use decode::{DecodeOptions, decode_node};
/// Declared type descriptors.
pub use descriptor::{EnumMember, FieldDescriptor, Storage, TypeDescriptor};
/// Tagged-document text codec.
pub use document::{SettingRecord, WriteOptions, read_document, read_node, write_document, write_node};
/// Value encoding entry point and options.
pub use encode::{EncodeOptions, encode_value};
/// Error and result aliases.
pub use error::{Result, SettingsError};
/// Tagged node tree types.
pub use node::{NodeField, Scalar, TaggedNode, TaggedValueKind};
#[doc(hidden)]
pub use reflect::invalid_value;
/// Typed conversion trait.
pub use reflect::SettingValue;
/// Setting container.
pub use setting::{DEFAULT_GROUP, Setting};
/// Byte-stream providers.
pub use storage::{ByteStore, FileStore, MemoryStore};
/// Dynamic runtime value types.
pub use value::{EnumValue, FieldValue, StructValue, Value};
