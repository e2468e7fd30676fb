//! Entity definitions for the clinic domain.
//!
//! # Responsibility
//! - Define the typed projections of persisted records.
//! - Keep field names aligned with the on-disk document shape.
//!
//! # Invariants
//! - `Entity::TABLE` names the one document table an entity lives in.
//! - Decoded entities pass `validate()` before they reach callers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a person record.
pub type PersonId = String;
/// Stable identifier for a cat record.
pub type CatId = String;
/// Stable identifier for a clinic record.
pub type ClinicId = String;
/// Stable identifier for a veterinarian record.
pub type VeterinarianId = String;
/// Stable identifier for an appointment record.
pub type AppointmentId = String;

/// Validation failure for decoded entity state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityValidationError {
    /// Appointment duration must be strictly positive.
    NonPositiveDuration { minutes: i64 },
    /// Appointment start must not predate the epoch.
    NegativeStart { epoch_ms: i64 },
    /// Cat lives must stay within the canonical 1..=9 range.
    LivesOutOfRange { lives: u32 },
}

impl Display for EntityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveDuration { minutes } => {
                write!(f, "appointment duration must be positive, got {minutes} minutes")
            }
            Self::NegativeStart { epoch_ms } => {
                write!(f, "appointment start must not be negative, got {epoch_ms}")
            }
            Self::LivesOutOfRange { lives } => {
                write!(f, "cat lives must be within 1..=9, got {lives}")
            }
        }
    }
}

impl Error for EntityValidationError {}

/// Typed projection of one document table.
///
/// The accessor layer stays generic over this trait: it decodes raw records
/// into entities and never needs per-type query code.
pub trait Entity: Serialize + DeserializeOwned {
    /// Document table this entity is persisted in.
    const TABLE: &'static str;

    /// Stable record id, unique within [`Entity::TABLE`].
    fn id(&self) -> &str;

    /// Checks decoded state. Read paths reject failures instead of masking
    /// them.
    fn validate(&self) -> Result<(), EntityValidationError> {
        Ok(())
    }
}

/// A human who might or might not own a cat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub given_name: String,
    pub surname: String,
}

impl Entity for Person {
    const TABLE: &'static str = "persons";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Coat color buckets used by the original dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatColor {
    Black,
    Gray,
    Orange,
    #[default]
    Other,
}

/// A cat under the care of one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    pub id: CatId,
    pub name: String,
    pub owner_id: PersonId,
    /// Age in whole years.
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub color: CatColor,
    #[serde(default = "default_lives")]
    pub lives: u32,
}

impl Entity for Cat {
    const TABLE: &'static str = "cats";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), EntityValidationError> {
        if !(1..=9).contains(&self.lives) {
            return Err(EntityValidationError::LivesOutOfRange { lives: self.lives });
        }
        Ok(())
    }
}

/// A clinic where veterinarians work to care for cats and owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: ClinicId,
    pub name: String,
}

impl Entity for Clinic {
    const TABLE: &'static str = "clinics";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A person licensed to treat cats at one clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Veterinarian {
    pub id: VeterinarianId,
    pub clinic_id: ClinicId,
    pub given_name: String,
    pub surname: String,
    pub license_number: String,
}

impl Entity for Veterinarian {
    const TABLE: &'static str = "veterinarians";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A pet owner's appointment to see a veterinarian at a clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub cat_id: CatId,
    pub clinic_id: ClinicId,
    pub owner_id: PersonId,
    pub veterinarian_id: VeterinarianId,
    /// Appointment start in epoch milliseconds.
    pub start_epoch_ms: i64,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i64,
}

impl Entity for Appointment {
    const TABLE: &'static str = "appointments";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), EntityValidationError> {
        if self.duration_minutes <= 0 {
            return Err(EntityValidationError::NonPositiveDuration {
                minutes: self.duration_minutes,
            });
        }
        if self.start_epoch_ms < 0 {
            return Err(EntityValidationError::NegativeStart {
                epoch_ms: self.start_epoch_ms,
            });
        }
        Ok(())
    }
}

fn default_lives() -> u32 {
    9
}

fn default_duration_minutes() -> i64 {
    30
}
