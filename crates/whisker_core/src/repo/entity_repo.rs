//! Generic entity accessors and their error contract.
//!
//! # Responsibility
//! - Provide by-id, natural-key and related-entity reads for any [`Entity`].
//! - Reject invalid persisted state instead of masking it.
//!
//! # Invariants
//! - Every accessor issues at most one store call.
//! - Accessors needing data for a parent *collection* use the batched
//!   forms; looping over the single-parent forms is the defect this layer
//!   exists to prevent.
//! - More than one record for one id is surfaced as data corruption, never
//!   resolved by picking one.

use crate::model::entity::Entity;
use crate::store::{Criteria, Record, RecordStore, StoreError, ID_FIELD};
use serde_json::Value;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from typed entity access.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying store or document error.
    Store(StoreError),
    /// Lookup expecting one record found none.
    NotFound { table: &'static str, key: String },
    /// Lookup expecting one record found several; per-table id uniqueness
    /// is broken.
    Ambiguous {
        table: &'static str,
        key: String,
        matches: usize,
    },
    /// Persisted record cannot be converted to a valid entity.
    InvalidRecord { table: &'static str, message: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound { table, key } => {
                write!(f, "record not found in `{table}` for {key}")
            }
            Self::Ambiguous { table, key, matches } => {
                write!(f, "ambiguous result in `{table}` for {key}: {matches} records")
            }
            Self::InvalidRecord { table, message } => {
                write!(f, "invalid persisted record in `{table}`: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound { .. } | Self::Ambiguous { .. } | Self::InvalidRecord { .. } => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Typed accessors over any [`RecordStore`] implementation.
pub struct EntityRepository<'s, S: RecordStore> {
    store: &'s S,
}

impl<'s, S: RecordStore> EntityRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Gets exactly one entity by id.
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] when no record carries the id.
    /// - [`RepoError::Ambiguous`] when several records share the id.
    pub fn get_by_id<E: Entity>(&self, id: &str) -> RepoResult<E> {
        let criteria = Criteria::new().with(ID_FIELD, id);
        self.expect_one(
            self.store.select(E::TABLE, &criteria)?,
            E::TABLE,
            format!("id `{id}`"),
        )
    }

    /// Gets exactly one entity by arbitrary criteria (unique natural keys).
    ///
    /// Same zero/ambiguous contract as [`EntityRepository::get_by_id`].
    pub fn find_one<E: Entity>(&self, criteria: &Criteria) -> RepoResult<E> {
        self.expect_one(
            self.store.select(E::TABLE, criteria)?,
            E::TABLE,
            format!("criteria `{criteria}`"),
        )
    }

    /// Gets every entity of the table, in document order.
    pub fn get_all<E: Entity>(&self) -> RepoResult<Vec<E>> {
        decode_all(self.store.select(E::TABLE, &Criteria::new())?)
    }

    /// Gets all entities whose `foreign_key_field` equals `parent_id`.
    pub fn get_related<E: Entity>(
        &self,
        foreign_key_field: &str,
        parent_id: &str,
    ) -> RepoResult<Vec<E>> {
        let criteria = Criteria::new().with(foreign_key_field, parent_id);
        decode_all(self.store.select(E::TABLE, &criteria)?)
    }

    /// Gets all entities whose `foreign_key_field` is in `parent_ids`.
    ///
    /// One store scan for the whole parent collection; callers must use
    /// this instead of looping over [`EntityRepository::get_related`].
    pub fn get_related_many<E: Entity>(
        &self,
        foreign_key_field: &str,
        parent_ids: &BTreeSet<String>,
    ) -> RepoResult<Vec<E>> {
        decode_all(self.store.select_in(E::TABLE, foreign_key_field, parent_ids)?)
    }

    /// Gets all entities whose id is in `ids`, in one store scan.
    pub fn get_by_ids<E: Entity>(&self, ids: &BTreeSet<String>) -> RepoResult<Vec<E>> {
        decode_all(self.store.select_by_ids(E::TABLE, ids)?)
    }

    fn expect_one<E: Entity>(
        &self,
        mut matches: Vec<Record>,
        table: &'static str,
        key: String,
    ) -> RepoResult<E> {
        match matches.len() {
            0 => Err(RepoError::NotFound { table, key }),
            1 => decode(matches.remove(0)),
            count => Err(RepoError::Ambiguous {
                table,
                key,
                matches: count,
            }),
        }
    }
}

fn decode<E: Entity>(record: Record) -> RepoResult<E> {
    let entity: E =
        serde_json::from_value(Value::Object(record)).map_err(|err| RepoError::InvalidRecord {
            table: E::TABLE,
            message: err.to_string(),
        })?;

    entity.validate().map_err(|err| RepoError::InvalidRecord {
        table: E::TABLE,
        message: err.to_string(),
    })?;

    Ok(entity)
}

fn decode_all<E: Entity>(records: Vec<Record>) -> RepoResult<Vec<E>> {
    records.into_iter().map(decode).collect()
}
