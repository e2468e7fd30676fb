//! Persisted document: the entire table collection as one unit.
//!
//! # Responsibility
//! - Load and save the whole document; no partial reads, no partial writes.
//! - Own the record and table shapes shared by every store implementation.
//!
//! # Invariants
//! - A document is one JSON object: table name -> array of record objects.
//! - A `Document` in memory is always well-formed; malformed files fail at
//!   load time with [`StoreError::Malformed`].

use crate::store::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// One persisted record: field name -> scalar or nested value.
pub type Record = Map<String, Value>;

/// Ordered record sequence of one logical entity type.
pub type Table = Vec<Record>;

/// The entire persisted state: table name -> table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    tables: BTreeMap<String, Table>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the named table with the given rows.
    pub fn insert_table(&mut self, name: impl Into<String>, rows: Table) {
        self.tables.insert(name.into(), rows);
    }

    /// Returns the named table's rows, or `None` when the table is absent.
    pub fn table(&self, name: &str) -> Option<&[Record]> {
        self.tables.get(name).map(Vec::as_slice)
    }

    /// Iterates table names in deterministic order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Total record count across all tables.
    pub fn record_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// Reads one whole document from a JSON file.
    ///
    /// # Errors
    /// - [`StoreError::Io`] when the file cannot be opened or read.
    /// - [`StoreError::Malformed`] when the bytes are not a JSON object of
    ///   record arrays; nothing is kept from a failed parse.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file)).map_err(|err| json_error(path, err))
    }

    /// Writes this whole document to a JSON file, replacing any previous
    /// content.
    pub fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|err| json_error(path, err))?;
        writer.flush()?;
        Ok(())
    }
}

fn json_error(path: &Path, err: serde_json::Error) -> StoreError {
    if err.classify() == serde_json::error::Category::Io {
        StoreError::Io(err.into())
    } else {
        StoreError::Malformed {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
