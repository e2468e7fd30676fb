//! Synthetic dataset generation for the clinic domain.
//!
//! # Responsibility
//! - Build randomized clinic populations at two scales as one document.
//! - Stay external to the store: only the entity shapes are consumed.
//!
//! # Invariants
//! - Generated foreign keys always resolve within the same document.
//! - Ids are fresh uuid hex values, unique per table.
//! - Clinic names are unique, so they can serve as a natural key.

use crate::model::entity::{
    Appointment, Cat, CatColor, Clinic, Entity, Person, Veterinarian,
};
use crate::store::{Document, Record, Table};
use log::info;
use rand::Rng;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

const GIVEN_NAMES: &[&str] = &[
    "Ada", "Bram", "Carla", "Dmitri", "Elena", "Farid", "Greta", "Hugo", "Ines", "Jonas",
    "Katrin", "Luis", "Mara", "Nils", "Olga", "Pavel", "Quinn", "Rosa", "Sven", "Tessa",
];

const SURNAMES: &[&str] = &[
    "Albrecht", "Bauer", "Cruz", "Dietrich", "Eriksen", "Fischer", "Grimm", "Hansen",
    "Ivanova", "Jansen", "Keller", "Lindqvist", "Moreau", "Novak", "Olsen", "Petrov",
    "Quint", "Richter", "Sørensen", "Tanaka",
];

const CAT_NAMES: &[&str] = &[
    "biscuit", "clover", "dusty", "ember", "fig", "ginger", "hazel", "juniper", "maple",
    "miso", "mochi", "nutmeg", "olive", "pepper", "pickle", "poppy", "sage", "smokey",
    "tofu", "waffles",
];

const CLINIC_PREFIXES: &[&str] = &[
    "Harbor", "Willow", "Maple", "Northside", "Riverbend", "Cedar", "Lakeview", "Summit",
    "Old Town", "Meadow", "Birch", "Sunset",
];

const CLINIC_SUFFIXES: &[&str] = &[
    "Veterinary Clinic",
    "Animal Hospital",
    "Cat Care",
    "Pet Practice",
];

const COLORS: &[CatColor] = &[CatColor::Black, CatColor::Gray, CatColor::Orange, CatColor::Other];

const DURATIONS_MINUTES: &[i64] = &[15, 30, 45, 60];

pub const HOUR_MS: i64 = 60 * 60 * 1000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors from dataset construction.
#[derive(Debug)]
pub enum DatasetError {
    /// Entity failed JSON encoding.
    Encode(serde_json::Error),
    /// Entity encoded to something other than an object record.
    NonObjectRecord { table: &'static str },
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode entity: {err}"),
            Self::NonObjectRecord { table } => {
                write!(f, "entity for `{table}` did not encode to an object record")
            }
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::NonObjectRecord { .. } => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Population bounds for one generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetProfile {
    pub clinics: usize,
    pub persons: usize,
    pub max_cats_per_person: u32,
    pub max_veterinarians_per_clinic: u32,
    pub max_appointments_per_person: u32,
}

impl DatasetProfile {
    /// Small interactive scale.
    pub fn smoke() -> Self {
        Self {
            clinics: 3,
            persons: 50,
            max_cats_per_person: 3,
            max_veterinarians_per_clinic: 5,
            max_appointments_per_person: 4,
        }
    }

    /// Load-test scale.
    pub fn load() -> Self {
        Self {
            clinics: 300,
            persons: 100_000,
            max_cats_per_person: 30,
            max_veterinarians_per_clinic: 5,
            max_appointments_per_person: 40,
        }
    }
}

/// Builds one randomized document within the profile's bounds.
///
/// Every person owns at least one cat and every clinic employs at least one
/// veterinarian. A person's appointments all happen at one randomly chosen
/// clinic with one of that clinic's veterinarians, and always reference one
/// of the person's own cats. Appointment starts are floored to the hour,
/// beginning one day after `base_epoch_ms`.
///
/// # Side effects
/// - Emits a `dataset_generate` logging event with counts and duration.
pub fn generate(
    profile: &DatasetProfile,
    base_epoch_ms: i64,
    rng: &mut impl Rng,
) -> DatasetResult<Document> {
    let started_at = Instant::now();

    let mut persons = Vec::with_capacity(profile.persons);
    let mut cats: Vec<Cat> = Vec::new();
    let mut cat_ranges = Vec::with_capacity(profile.persons);

    for _ in 0..profile.persons {
        let person = Person {
            id: fresh_id(),
            given_name: pick(rng, GIVEN_NAMES).to_string(),
            surname: pick(rng, SURNAMES).to_string(),
        };

        let litter = rng.random_range(1..=profile.max_cats_per_person.max(1));
        let first_cat = cats.len();
        for _ in 0..litter {
            cats.push(Cat {
                id: fresh_id(),
                name: pick(rng, CAT_NAMES).to_string(),
                owner_id: person.id.clone(),
                age: rng.random_range(0..=20),
                color: COLORS[rng.random_range(0..COLORS.len())],
                lives: rng.random_range(1..=9),
            });
        }
        cat_ranges.push(first_cat..cats.len());
        persons.push(person);
    }

    let mut clinics = Vec::with_capacity(profile.clinics);
    let mut veterinarians: Vec<Veterinarian> = Vec::new();
    let mut vet_ranges = Vec::with_capacity(profile.clinics);

    for index in 0..profile.clinics {
        let clinic = Clinic {
            id: fresh_id(),
            name: clinic_name(index),
        };

        let staff = rng.random_range(1..=profile.max_veterinarians_per_clinic.max(1));
        let first_vet = veterinarians.len();
        for _ in 0..staff {
            veterinarians.push(Veterinarian {
                id: fresh_id(),
                clinic_id: clinic.id.clone(),
                given_name: pick(rng, GIVEN_NAMES).to_string(),
                surname: pick(rng, SURNAMES).to_string(),
                license_number: format!("{:08}", rng.random_range(0..100_000_000u32)),
            });
        }
        vet_ranges.push(first_vet..veterinarians.len());
        clinics.push(clinic);
    }

    let mut appointments = Vec::new();
    if !clinics.is_empty() {
        let first_slot = floor_to_hour(base_epoch_ms) + DAY_MS;
        for (person, cat_range) in persons.iter().zip(&cat_ranges) {
            let clinic_index = rng.random_range(0..clinics.len());
            let vet_range = vet_ranges[clinic_index].clone();

            let visits = rng.random_range(1..=profile.max_appointments_per_person.max(1));
            for _ in 0..visits {
                let cat = &cats[rng.random_range(cat_range.clone())];
                let veterinarian = &veterinarians[rng.random_range(vet_range.clone())];
                let day = i64::from(rng.random_range(0u32..28));
                let hour = i64::from(rng.random_range(8u32..18));

                appointments.push(Appointment {
                    id: fresh_id(),
                    cat_id: cat.id.clone(),
                    clinic_id: clinics[clinic_index].id.clone(),
                    owner_id: person.id.clone(),
                    veterinarian_id: veterinarian.id.clone(),
                    start_epoch_ms: first_slot + day * DAY_MS + hour * HOUR_MS,
                    duration_minutes: DURATIONS_MINUTES[rng.random_range(0..DURATIONS_MINUTES.len())],
                });
            }
        }
    }

    let mut document = Document::new();
    document.insert_table(Appointment::TABLE, table_of(&appointments)?);
    document.insert_table(Cat::TABLE, table_of(&cats)?);
    document.insert_table(Clinic::TABLE, table_of(&clinics)?);
    document.insert_table(Person::TABLE, table_of(&persons)?);
    document.insert_table(Veterinarian::TABLE, table_of(&veterinarians)?);

    info!(
        "event=dataset_generate module=dataset status=ok clinics={} persons={} cats={} veterinarians={} appointments={} duration_ms={}",
        clinics.len(),
        persons.len(),
        cats.len(),
        veterinarians.len(),
        appointments.len(),
        started_at.elapsed().as_millis()
    );

    Ok(document)
}

/// Floors an epoch-millisecond timestamp to the start of its hour.
pub fn floor_to_hour(epoch_ms: i64) -> i64 {
    epoch_ms - epoch_ms.rem_euclid(HOUR_MS)
}

/// Deterministic unique clinic name for the given index.
fn clinic_name(index: usize) -> String {
    let combos = CLINIC_PREFIXES.len() * CLINIC_SUFFIXES.len();
    let prefix = CLINIC_PREFIXES[index % CLINIC_PREFIXES.len()];
    let suffix = CLINIC_SUFFIXES[(index / CLINIC_PREFIXES.len()) % CLINIC_SUFFIXES.len()];
    if index < combos {
        format!("{prefix} {suffix}")
    } else {
        format!("{prefix} {suffix} {}", index / combos + 1)
    }
}

fn fresh_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn pick<'a>(rng: &mut impl Rng, pool: &'a [&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

fn table_of<E: Entity>(entities: &[E]) -> DatasetResult<Table> {
    entities.iter().map(record_of).collect()
}

fn record_of<E: Entity>(entity: &E) -> DatasetResult<Record> {
    match serde_json::to_value(entity)? {
        Value::Object(record) => Ok(record),
        _ => Err(DatasetError::NonObjectRecord { table: E::TABLE }),
    }
}
