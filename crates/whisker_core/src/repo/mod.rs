//! Typed accessor layer over the record store.
//!
//! # Responsibility
//! - Decode raw records into domain entities.
//! - Enforce the one-store-call-per-accessor contract.
//!
//! # Invariants
//! - Accessors never issue one store call per related entity; collection
//!   lookups go through the batched store primitives.
//! - Accessors return semantic errors (`NotFound`, `Ambiguous`) in addition
//!   to store transport errors.

pub mod entity_repo;
