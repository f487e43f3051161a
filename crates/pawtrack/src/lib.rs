//! `pawtrack` - A local pet-care tracker
//!
//! This library provides the core functionality for recording pet profiles,
//! health records, vaccinations, feeding schedules, and appointments in a
//! local `SQLite` database, together with the derived-state computations
//! (age, vaccination status, next feeding time, appointment status) the CLI
//! presents.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod care;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;
pub mod summary;

pub use care::CareThresholds;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{Appointment, HealthRecord, MealSchedule, Pet, Vaccination};
pub use storage::{Store, StoreStats};
pub use summary::CareSummary;
