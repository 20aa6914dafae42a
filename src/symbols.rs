//! Currency-code lookup table
//!
//! The API addresses currencies by numeric id. The mapping from ticker
//! symbols to ids is an external collaborator: callers load it (for example
//! from a JSON file shipped with their application) and pass the ids into
//! the client.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors loading a symbol table
#[derive(Debug, Error)]
pub enum SymbolTableError {
    /// Could not read the underlying file or stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The table is not a JSON object of symbol-to-id entries
    #[error("Malformed symbol table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Mapping from ticker symbol to the API's numeric currency id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    ids: HashMap<String, u64>,
}

impl SymbolTable {
    /// Reads a JSON object of `{"USD": 2781, "BTC": 1}` entries
    ///
    /// Symbols are normalized to upper case.
    pub fn from_reader(reader: impl Read) -> Result<Self, SymbolTableError> {
        let ids: HashMap<String, u64> = serde_json::from_reader(reader)?;
        Ok(Self {
            ids: ids
                .into_iter()
                .map(|(code, id)| (code.to_uppercase(), id))
                .collect(),
        })
    }

    /// Loads a symbol table from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SymbolTableError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Looks a currency id up by its ticker symbol, case-insensitively
    pub fn get(&self, code: &str) -> Option<u64> {
        self.ids.get(&code.to_uppercase()).copied()
    }

    /// Number of known symbols
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when the table holds no symbols
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All known ticker symbols, unordered
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }
}
