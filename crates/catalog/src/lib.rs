//! Catalogue loading for cogs
//!
//! A catalogue is a TOML file declaring command-backed jobs, job groups
//! with dependency constraints, and recurring triggers. Loading happens
//! in two stages: `parser` turns text into the raw document, `loader`
//! validates references and produces the jobs, definitions, and triggers
//! the core registry and scheduler consume.

mod command;
mod loader;
mod parser;
mod types;

pub use command::CommandJob;
pub use loader::{load_catalog, load_path, Catalog, LoadError};
pub use parser::{parse_document, read_document, ParseError};
pub use types::{CatalogDoc, GroupEntry, JobEntry, MemberEntry, TriggerEntry};
