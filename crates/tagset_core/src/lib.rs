//! Typed settings persisted through a self-describing tagged document.

/// Type classification, value codec, text codec, settings catalog, and stores.
pub mod settings;
