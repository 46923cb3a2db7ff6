// SPDX-License-Identifier: MIT

//! Catalogue TOML parsing

use crate::types::CatalogDoc;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a catalogue file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to read catalogue: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a catalogue from TOML content
pub fn parse_document(content: &str) -> Result<CatalogDoc, ParseError> {
    Ok(toml::from_str(content)?)
}

/// Read and parse a catalogue file
pub fn read_document(path: &Path) -> Result<CatalogDoc, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
