//! Core library for whisker: a flat-file record store for a veterinary
//! clinic domain. This crate is the single source of truth for the query
//! and accessor contracts.

pub mod dataset;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use dataset::{generate, DatasetError, DatasetProfile, DatasetResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entity::{
    Appointment, Cat, CatColor, Clinic, Entity, EntityValidationError, Person, Veterinarian,
};
pub use repo::entity_repo::{EntityRepository, RepoError, RepoResult};
pub use service::clinic_service::ClinicService;
pub use store::{
    Criteria, Document, JsonStore, Record, RecordStore, StoreError, StoreResult, Table,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
