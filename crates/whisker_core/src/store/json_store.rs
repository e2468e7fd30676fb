//! JSON-file store implementation.
//!
//! # Responsibility
//! - Open one wholesale-loaded JSON document and answer batched queries.
//! - Emit `document_load` logging events with duration and status.
//!
//! # Invariants
//! - The document is loaded once at `open` and cached for the store's
//!   lifetime; staleness against the backing file is accepted until
//!   `reload`.
//! - Every query answers from the cached document with one table scan.

use crate::store::{Criteria, Document, Record, RecordStore, StoreError, StoreResult};
use log::{error, info};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Record store backed by one JSON document file.
#[derive(Debug)]
pub struct JsonStore {
    path: Option<PathBuf>,
    document: Document,
}

impl JsonStore {
    /// Opens a document file and caches its content.
    ///
    /// # Side effects
    /// - Emits `document_load` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        let path = path.as_ref().to_path_buf();
        info!("event=document_load module=store status=start path={}", path.display());

        match Document::load(&path) {
            Ok(document) => {
                info!(
                    "event=document_load module=store status=ok path={} tables={} records={} duration_ms={}",
                    path.display(),
                    document.table_count(),
                    document.record_count(),
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    path: Some(path),
                    document,
                })
            }
            Err(err) => {
                error!(
                    "event=document_load module=store status=error path={} duration_ms={} error={}",
                    path.display(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Builds an in-memory store from an already constructed document.
    ///
    /// Used by tests and tooling that never touch the filesystem.
    pub fn from_document(document: Document) -> Self {
        Self {
            path: None,
            document,
        }
    }

    /// Re-reads the backing file, replacing the cached document.
    ///
    /// In-memory stores have no backing file and keep their document.
    pub fn reload(&mut self) -> StoreResult<()> {
        if let Some(path) = &self.path {
            self.document = Document::load(path)?;
        }
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn rows(&self, table: &str) -> StoreResult<&[Record]> {
        self.document
            .table(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
    }
}

impl RecordStore for JsonStore {
    fn select(&self, table: &str, criteria: &Criteria) -> StoreResult<Vec<Record>> {
        Ok(self
            .rows(table)?
            .iter()
            .filter(|record| criteria.matches(record))
            .cloned()
            .collect())
    }

    fn select_in(
        &self,
        table: &str,
        field: &str,
        values: &BTreeSet<String>,
    ) -> StoreResult<Vec<Record>> {
        Ok(self
            .rows(table)?
            .iter()
            .filter(|record| {
                record
                    .get(field)
                    .and_then(Value::as_str)
                    .is_some_and(|value| values.contains(value))
            })
            .cloned()
            .collect())
    }

    fn tables(&self) -> Vec<String> {
        self.document.table_names().map(str::to_string).collect()
    }
}
