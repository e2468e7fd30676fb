//! Clinic use-case service.
//!
//! # Responsibility
//! - Provide the domain reads callers actually ask for: who works where,
//!   which cats were seen at which clinic, whose appointments are whose.
//!
//! # Invariants
//! - Every operation issues a fixed number of store calls, independent of
//!   how many entities it touches.
//! - Aggregations across records that may reference the same target
//!   de-duplicate through a set of seen ids before the batched lookup.

use crate::model::entity::{Appointment, Cat, Clinic, Person, Veterinarian};
use crate::repo::entity_repo::{EntityRepository, RepoResult};
use crate::store::{Criteria, RecordStore};
use std::collections::BTreeSet;

/// Use-case wrapper over the typed accessors.
pub struct ClinicService<'s, S: RecordStore> {
    repo: EntityRepository<'s, S>,
}

impl<'s, S: RecordStore> ClinicService<'s, S> {
    /// Creates a service using the provided repository.
    pub fn new(repo: EntityRepository<'s, S>) -> Self {
        Self { repo }
    }

    /// Returns the cat with the given id.
    pub fn cat(&self, id: &str) -> RepoResult<Cat> {
        self.repo.get_by_id(id)
    }

    /// Returns the person with the given id.
    pub fn person(&self, id: &str) -> RepoResult<Person> {
        self.repo.get_by_id(id)
    }

    /// Returns the clinic with the given id.
    pub fn clinic(&self, id: &str) -> RepoResult<Clinic> {
        self.repo.get_by_id(id)
    }

    /// Returns the veterinarian with the given id.
    pub fn veterinarian(&self, id: &str) -> RepoResult<Veterinarian> {
        self.repo.get_by_id(id)
    }

    /// Returns the single clinic with the given name.
    ///
    /// Clinic names act as a unique natural key; duplicates surface as an
    /// ambiguous-result error.
    pub fn clinic_named(&self, name: &str) -> RepoResult<Clinic> {
        self.repo.find_one(&Criteria::new().with("name", name))
    }

    /// Returns all veterinarians working at the given clinic.
    pub fn veterinarians_at(&self, clinic: &Clinic) -> RepoResult<Vec<Veterinarian>> {
        self.repo.get_related("clinic_id", &clinic.id)
    }

    /// Returns all appointments for the given veterinarian.
    pub fn appointments_for(&self, veterinarian: &Veterinarian) -> RepoResult<Vec<Appointment>> {
        self.repo.get_related("veterinarian_id", &veterinarian.id)
    }

    /// Returns all appointments booked at the given clinic.
    pub fn appointments_at(&self, clinic: &Clinic) -> RepoResult<Vec<Appointment>> {
        self.repo.get_related("clinic_id", &clinic.id)
    }

    /// Returns all cats owned by the given person.
    pub fn cats_owned_by(&self, owner: &Person) -> RepoResult<Vec<Cat>> {
        self.repo.get_related("owner_id", &owner.id)
    }

    /// Returns all distinct cats seen at the clinic with the given name.
    ///
    /// Three store calls total: the clinic, its appointments, then one
    /// batched cat lookup over the distinct `cat_id` set. Cats referenced
    /// by several appointments appear once.
    pub fn cats_seen_at(&self, clinic_name: &str) -> RepoResult<Vec<Cat>> {
        let clinic = self.clinic_named(clinic_name)?;
        let appointments: Vec<Appointment> = self.repo.get_related("clinic_id", &clinic.id)?;

        let mut cat_ids = BTreeSet::new();
        for appointment in &appointments {
            cat_ids.insert(appointment.cat_id.clone());
        }

        self.repo.get_by_ids(&cat_ids)
    }
}
