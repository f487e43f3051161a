//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand, ValueEnum};

use crate::model::{AppointmentKind, Gender, Species};

/// Pet profile commands.
#[derive(Debug, Subcommand)]
pub enum PetCommand {
    /// Add a pet profile
    Add {
        /// Name of the pet
        name: String,

        /// Species
        #[arg(short, long, value_enum, default_value = "other")]
        species: SpeciesArg,

        /// Breed
        #[arg(short, long)]
        breed: Option<String>,

        /// Birthdate (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        birthdate: Option<NaiveDate>,

        /// Gender
        #[arg(short, long, value_enum)]
        gender: Option<GenderArg>,

        /// Current weight in kilograms
        #[arg(short, long)]
        weight: Option<f64>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List pets
    List {
        /// Filter by species
        #[arg(short, long, value_enum)]
        species: Option<SpeciesArg>,

        /// Filter by a name substring (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show a pet profile with its derived age and health status
    Show {
        /// Id of the pet
        id: i64,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Record a new weight for a pet
    Weigh {
        /// Id of the pet
        id: i64,

        /// New weight in kilograms
        weight: f64,

        /// Date of the weigh-in (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// Remove a pet and all its records
    Remove {
        /// Id of the pet
        id: i64,
    },
}

/// Health record commands.
#[derive(Debug, Subcommand)]
pub enum HealthCommand {
    /// Add a health record
    Add {
        /// Id of the pet
        pet_id: i64,

        /// Date of the observation (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        /// Weight in kilograms
        #[arg(short, long)]
        weight: Option<f64>,

        /// Body temperature in degrees Celsius
        #[arg(short, long)]
        temperature: Option<f64>,

        /// Observed symptoms
        #[arg(short, long)]
        symptoms: Option<String>,

        /// Administered medications
        #[arg(short, long)]
        medications: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List health records for a pet, newest first
    List {
        /// Id of the pet
        pet_id: i64,

        /// Show records from this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        from: Option<NaiveDate>,

        /// Show records until this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        to: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the recent weight history of a pet
    Weights {
        /// Id of the pet
        pet_id: i64,

        /// Maximum number of entries
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Search a pet's health records by symptom text
    Search {
        /// Id of the pet
        pet_id: i64,

        /// The search query (matches symptom text, case-insensitive)
        query: String,
    },

    /// Remove a health record
    Remove {
        /// Id of the record
        id: i64,
    },
}

/// Vaccination commands.
#[derive(Debug, Subcommand)]
pub enum VaxCommand {
    /// Add a vaccination entry
    Add {
        /// Id of the pet
        pet_id: i64,

        /// Name of the vaccine
        name: String,

        /// Date of administration (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date_arg)]
        administered: Option<NaiveDate>,

        /// Expiry date of the protection (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        expires: Option<NaiveDate>,

        /// Date the next dose is due (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        next_due: Option<NaiveDate>,

        /// Administering veterinarian
        #[arg(long)]
        vet: Option<String>,

        /// Clinic
        #[arg(long)]
        clinic: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List vaccinations for a pet with their current status
    List {
        /// Id of the pet
        pet_id: i64,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Remove a vaccination entry
    Remove {
        /// Id of the entry
        id: i64,
    },
}

/// Meal schedule commands.
#[derive(Debug, Subcommand)]
pub enum MealCommand {
    /// Add a meal schedule
    Add {
        /// Id of the pet
        pet_id: i64,

        /// Display name of the meal
        name: String,

        /// Time of day the meal is served (HH:MM)
        #[arg(short, long, value_parser = parse_time_arg)]
        time: NaiveTime,

        /// Serving amount in grams
        #[arg(short, long)]
        amount: f64,

        /// Kind of food
        #[arg(short, long)]
        food: String,

        /// Active weekdays, comma-separated, 1=Sunday..7=Saturday
        /// (defaults to every day)
        #[arg(short, long, default_value = "1,2,3,4,5,6,7")]
        weekdays: String,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List meal schedules for a pet
    List {
        /// Id of the pet
        pet_id: i64,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the projected next feeding for a pet
    Next {
        /// Id of the pet
        pet_id: i64,
    },

    /// Pause a meal schedule
    Pause {
        /// Id of the schedule
        id: i64,
    },

    /// Resume a paused meal schedule
    Resume {
        /// Id of the schedule
        id: i64,
    },

    /// Remove a meal schedule
    Remove {
        /// Id of the schedule
        id: i64,
    },
}

/// Appointment commands.
#[derive(Debug, Subcommand)]
pub enum ApptCommand {
    /// Add an appointment
    Add {
        /// Id of the pet
        pet_id: i64,

        /// Title of the appointment
        title: String,

        /// Calendar date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: NaiveDate,

        /// Time of day (HH:MM)
        #[arg(short, long, value_parser = parse_time_arg)]
        time: NaiveTime,

        /// Kind of appointment
        #[arg(short, long, value_enum, default_value = "vet")]
        kind: KindArg,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// Location
        #[arg(short, long)]
        location: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List appointments for a pet with their status
    List {
        /// Id of the pet
        pet_id: i64,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Mark an appointment as completed
    Done {
        /// Id of the appointment
        id: i64,
    },

    /// Reopen a completed appointment
    Reopen {
        /// Id of the appointment
        id: i64,
    },

    /// Remove an appointment
    Remove {
        /// Id of the appointment
        id: i64,
    },
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Restrict the summary to a single pet
    #[arg(short, long)]
    pub pet: Option<i64>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Species argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpeciesArg {
    /// Dog
    Dog,
    /// Cat
    Cat,
    /// Bird
    Bird,
    /// Fish
    Fish,
    /// Anything else
    Other,
}

impl From<SpeciesArg> for Species {
    fn from(arg: SpeciesArg) -> Self {
        match arg {
            SpeciesArg::Dog => Self::Dog,
            SpeciesArg::Cat => Self::Cat,
            SpeciesArg::Bird => Self::Bird,
            SpeciesArg::Fish => Self::Fish,
            SpeciesArg::Other => Self::Other,
        }
    }
}

/// Gender argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    /// Male
    Male,
    /// Female
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
        }
    }
}

/// Appointment kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Veterinary visit
    Vet,
    /// Grooming
    Grooming,
    /// Anything else
    Other,
}

impl From<KindArg> for AppointmentKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Vet => Self::Vet,
            KindArg::Grooming => Self::Grooming,
            KindArg::Other => Self::Other,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

/// Parse a `YYYY-MM-DD` date argument.
fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

/// Parse a `HH:MM` or `HH:MM:SS` time argument.
fn parse_time_arg(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{s}', expected HH:MM"))
}
