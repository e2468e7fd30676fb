//! Flat-file record store: one wholesale-loaded document, batched queries.
//!
//! # Responsibility
//! - Define the store contract ([`RecordStore`]) and its query primitives.
//! - Keep predicate evaluation explicit and shared across implementations.
//!
//! # Invariants
//! - Criteria matching is a short-circuit conjunction over every entry;
//!   the predicate is a `bool`, never a lazily coerced iterator.
//! - `select` preserves document order, returns no duplicates and never
//!   mutates the underlying document.
//! - Batched lookups scan the target table exactly once per call.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod document;
mod json_store;

pub use document::{Document, Record, Table};
pub use json_store::JsonStore;

/// Field every record is identified by, unique within its table.
pub const ID_FIELD: &str = "id";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from document loading and store queries.
#[derive(Debug)]
pub enum StoreError {
    /// File I/O failure while reading or writing a document.
    Io(std::io::Error),
    /// Document bytes exist but do not form a valid table collection.
    Malformed { path: String, message: String },
    /// Requested table is absent from the loaded document.
    TableNotFound(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "document i/o error: {err}"),
            Self::Malformed { path, message } => {
                write!(f, "malformed document `{path}`: {message}")
            }
            Self::TableNotFound(table) => write!(f, "table not found: {table}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed { .. } | Self::TableNotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Exact-match conjunction filter over record fields.
///
/// A record matches only when every `(field, value)` entry equals the
/// record's value for that field. Empty criteria match every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    fields: BTreeMap<String, Value>,
}

impl Criteria {
    /// Creates empty criteria, matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one required exact field value.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `true` only when every criteria field equals the record's
    /// value for that field.
    ///
    /// Short-circuits to `false` on the first mismatch. A field absent from
    /// the record never matches.
    pub fn matches(&self, record: &Record) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }
}

impl Display for Criteria {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, value) in &self.fields {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{field}={value}")?;
            first = false;
        }
        Ok(())
    }
}

/// Query contract every store implementation and test double satisfies.
pub trait RecordStore {
    /// Returns records of `table` matching every criteria entry, in
    /// document order.
    fn select(&self, table: &str, criteria: &Criteria) -> StoreResult<Vec<Record>>;

    /// Returns records of `table` whose `field` holds a string contained in
    /// `values`. One scan for the whole value set.
    fn select_in(
        &self,
        table: &str,
        field: &str,
        values: &BTreeSet<String>,
    ) -> StoreResult<Vec<Record>>;

    /// Batched id lookup: one scan regardless of id-set size.
    fn select_by_ids(&self, table: &str, ids: &BTreeSet<String>) -> StoreResult<Vec<Record>> {
        self.select_in(table, ID_FIELD, ids)
    }

    /// Table names known to this store, for diagnostics.
    fn tables(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::{Criteria, Record};
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object record, got {other}"),
        }
    }

    #[test]
    fn empty_criteria_match_every_record() {
        let criteria = Criteria::new();
        assert!(criteria.matches(&record(json!({"id": "a"}))));
        assert!(criteria.matches(&Record::new()));
    }

    #[test]
    fn criteria_require_every_field_to_match() {
        let criteria = Criteria::new().with("owner_id", "p1").with("color", "black");

        let both = record(json!({"id": "a", "owner_id": "p1", "color": "black"}));
        let one_of_two = record(json!({"id": "b", "owner_id": "p1", "color": "gray"}));
        let neither = record(json!({"id": "c", "owner_id": "p2", "color": "gray"}));

        assert!(criteria.matches(&both));
        assert!(!criteria.matches(&one_of_two));
        assert!(!criteria.matches(&neither));
    }

    #[test]
    fn criteria_field_absent_from_record_never_matches() {
        let criteria = Criteria::new().with("owner_id", "p1");
        assert!(!criteria.matches(&record(json!({"id": "a"}))));
    }

    #[test]
    fn criteria_compare_values_not_text() {
        let criteria = Criteria::new().with("age", 3);
        assert!(criteria.matches(&record(json!({"age": 3}))));
        assert!(!criteria.matches(&record(json!({"age": "3"}))));
    }

    #[test]
    fn criteria_display_is_stable_key_value_text() {
        let criteria = Criteria::new().with("owner_id", "p1").with("age", 3);
        assert_eq!(criteria.to_string(), "age=3 owner_id=\"p1\"");
    }
}
