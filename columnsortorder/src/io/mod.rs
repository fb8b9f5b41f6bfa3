//! I/O adapters for the column manager.

pub mod catalog;
pub mod store;
pub mod toml_store;
