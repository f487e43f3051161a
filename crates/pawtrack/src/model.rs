//! Core entity types for pawtrack.
//!
//! This module defines the data structures for pets and the records attached
//! to them. These are plain data carriers: ids are assigned by the storage
//! layer and all derived values are computed by [`crate::care`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// The species category of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// A dog.
    Dog,
    /// A cat.
    Cat,
    /// A bird.
    Bird,
    /// A fish.
    Fish,
    /// Any other species.
    Other,
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dog => write!(f, "dog"),
            Self::Cat => write!(f, "cat"),
            Self::Bird => write!(f, "bird"),
            Self::Fish => write!(f, "fish"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl Species {
    /// Parse a species from its stored string form.
    ///
    /// Unrecognized values fall back to [`Species::Other`], matching the
    /// defensive handling of free-form type strings at the storage boundary.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "dog" => Self::Dog,
            "cat" => Self::Cat,
            "bird" => Self::Bird,
            "fish" => Self::Fish,
            _ => Self::Other,
        }
    }
}

/// The gender of a pet, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

impl Gender {
    /// Parse a gender from its stored string form, if recognized.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

/// The kind of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentKind {
    /// A veterinary visit.
    Vet,
    /// A grooming session.
    Grooming,
    /// Anything else.
    Other,
}

impl std::fmt::Display for AppointmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vet => write!(f, "vet"),
            Self::Grooming => write!(f, "grooming"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl AppointmentKind {
    /// Parse an appointment kind from its stored string form.
    ///
    /// Unrecognized values fall back to [`AppointmentKind::Other`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "vet" => Self::Vet,
            "grooming" => Self::Grooming,
            _ => Self::Other,
        }
    }
}

/// A pet profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Unique identifier (assigned by the storage layer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The pet's name.
    pub name: String,
    /// Species category.
    pub species: Species,
    /// Breed, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Date of birth, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
    /// Gender, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Most recently recorded weight in kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Create a new pet profile with the given name and species.
    ///
    /// All optional fields start empty; the id is assigned on insert.
    #[must_use]
    pub fn new(name: impl Into<String>, species: Species) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            species,
            breed: None,
            birthdate: None,
            gender: None,
            weight_kg: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A dated health observation for a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Unique identifier (assigned by the storage layer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The pet this record belongs to.
    pub pet_id: i64,
    /// The date of the observation.
    pub date: NaiveDate,
    /// Weight in kilograms, if measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Body temperature in degrees Celsius, if measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    /// Observed symptoms, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    /// Administered medications, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl HealthRecord {
    /// Create a new health record for the given pet and date.
    #[must_use]
    pub fn new(pet_id: i64, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            pet_id,
            date,
            weight_kg: None,
            temperature_c: None,
            symptoms: None,
            medications: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the record carries a non-empty symptoms text.
    #[must_use]
    pub fn has_symptoms(&self) -> bool {
        self.symptoms.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Whether the record carries a non-empty medications text.
    #[must_use]
    pub fn has_medications(&self) -> bool {
        self.medications.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// A vaccination entry for a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vaccination {
    /// Unique identifier (assigned by the storage layer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The pet this vaccination belongs to.
    pub pet_id: i64,
    /// Name of the vaccine.
    pub name: String,
    /// Date of administration.
    pub administered: NaiveDate,
    /// Expiry date of the protection, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<NaiveDate>,
    /// Scheduled date of the next dose, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<NaiveDate>,
    /// Administering veterinarian, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vet: Option<String>,
    /// Clinic, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic: Option<String>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Vaccination {
    /// Create a new vaccination entry for the given pet.
    #[must_use]
    pub fn new(pet_id: i64, name: impl Into<String>, administered: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            pet_id,
            name: name.into(),
            administered,
            expires: None,
            next_due: None,
            vet: None,
            clinic: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A recurring feeding schedule for a pet.
///
/// Weekdays use the 1=Sunday..7=Saturday numbering; the set is persisted as a
/// comma-separated string and parsed defensively on the way back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSchedule {
    /// Unique identifier (assigned by the storage layer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The pet this schedule belongs to.
    pub pet_id: i64,
    /// Display name of the meal ("breakfast", "dinner", ...).
    pub name: String,
    /// Time of day the meal is served.
    pub time: NaiveTime,
    /// Serving amount in grams.
    pub amount_g: f64,
    /// Kind of food.
    pub food: String,
    /// Whether the schedule is currently active.
    pub active: bool,
    /// Sorted, deduplicated set of active weekdays (1=Sunday..7=Saturday).
    pub weekdays: Vec<u8>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the schedule was created.
    pub created_at: DateTime<Utc>,
    /// When the schedule was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MealSchedule {
    /// Create a new active meal schedule for the given pet.
    ///
    /// The weekday set is filtered to 1..=7, sorted, and deduplicated.
    #[must_use]
    pub fn new(
        pet_id: i64,
        name: impl Into<String>,
        time: NaiveTime,
        amount_g: f64,
        food: impl Into<String>,
        weekdays: &[u8],
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            pet_id,
            name: name.into(),
            time,
            amount_g,
            food: food.into(),
            active: true,
            weekdays: normalize_weekdays(weekdays),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the schedule applies on the given weekday (1=Sunday..7=Saturday).
    #[must_use]
    pub fn contains_weekday(&self, weekday: u8) -> bool {
        self.weekdays.contains(&weekday)
    }

    /// The stored string form of the weekday set ("1,3,5").
    #[must_use]
    pub fn weekdays_string(&self) -> String {
        weekdays_to_string(&self.weekdays)
    }
}

/// A scheduled appointment for a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique identifier (assigned by the storage layer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The pet this appointment belongs to.
    pub pet_id: i64,
    /// Title of the appointment.
    pub title: String,
    /// Kind of the appointment.
    pub kind: AppointmentKind,
    /// Calendar date.
    pub date: NaiveDate,
    /// Time of day.
    pub time: NaiveTime,
    /// Duration in minutes, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
    /// Location, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Whether the appointment has been completed.
    pub done: bool,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the appointment was created.
    pub created_at: DateTime<Utc>,
    /// When the appointment was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a new appointment for the given pet.
    #[must_use]
    pub fn new(
        pet_id: i64,
        title: impl Into<String>,
        kind: AppointmentKind,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            pet_id,
            title: title.into(),
            kind,
            date,
            time,
            duration_min: None,
            location: None,
            done: false,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The end time of the appointment, when a duration is known.
    #[must_use]
    pub fn end_time(&self) -> Option<NaiveTime> {
        self.duration_min
            .map(|d| self.time + chrono::Duration::minutes(i64::from(d)))
    }
}

/// Parse a comma-separated weekday string into a normalized weekday set.
///
/// Entries outside 1..=7 and anything that is not an integer are silently
/// dropped. The result is sorted and deduplicated.
#[must_use]
pub fn parse_weekdays(s: &str) -> Vec<u8> {
    let days: Vec<u8> = s
        .split(',')
        .filter_map(|part| part.trim().parse::<u8>().ok())
        .collect();
    normalize_weekdays(&days)
}

/// Filter a weekday list to 1..=7, sort it, and drop duplicates.
#[must_use]
pub fn normalize_weekdays(days: &[u8]) -> Vec<u8> {
    let mut days: Vec<u8> = days
        .iter()
        .copied()
        .filter(|d| (1..=7).contains(d))
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Render a weekday set in its stored comma-separated form.
#[must_use]
pub fn weekdays_to_string(days: &[u8]) -> String {
    days.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
