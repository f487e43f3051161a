//! Storage layer for pawtrack.
//!
//! This module provides `SQLite`-based persistent storage for pets and their
//! attached records, with the filtered queries the CLI and the dashboard
//! summary are built on. All derived values (ages, statuses, projections)
//! live in [`crate::care`]; this layer only reads and writes entity fields.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{
    parse_weekdays, Appointment, AppointmentKind, Gender, HealthRecord, MealSchedule, Pet, Species,
    Vaccination,
};

/// Storage format for calendar dates.
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Storage format for times of day.
const TIME_FORMAT: &str = "%H:%M:%S";

/// Storage engine for pet-care records.
///
/// Wraps a single `SQLite` connection with:
/// - CRUD for pets, health records, vaccinations, meal schedules, and
///   appointments
/// - Filtered queries (by species, name, date range, weekday)
/// - Foreign-key integrity with cascading deletes from pets to their records
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // WAL for better concurrent read performance; foreign keys are off by
        // default in SQLite and cascading deletes depend on them.
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // === Pets ===

    /// Insert a pet profile and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn add_pet(&self, pet: &Pet) -> Result<i64> {
        self.conn.execute(
            r"
            INSERT INTO pets (name, species, breed, birthdate, gender, weight_kg, notes,
                              created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
            params![
                pet.name,
                pet.species.to_string(),
                pet.breed,
                pet.birthdate.map(format_date),
                pet.gender.map(|g| g.to_string()),
                pet.weight_kg,
                pet.notes,
                pet.created_at.to_rfc3339(),
                pet.updated_at.to_rfc3339(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted pet {} with id {}", pet.name, id);
        Ok(id)
    }

    /// Get a pet by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_pet(&self, id: i64) -> Result<Option<Pet>> {
        let result = self
            .conn
            .query_row(
                &format!("{PET_SELECT} WHERE id = ?1"),
                [id],
                Self::row_to_pet,
            )
            .optional()?;
        Ok(result)
    }

    /// Get a pet by its id, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PetNotFound`] if there is no pet with the given id.
    pub fn require_pet(&self, id: i64) -> Result<Pet> {
        self.get_pet(id)?.ok_or(Error::PetNotFound { id })
    }

    /// List all pets, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_pets(&self) -> Result<Vec<Pet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PET_SELECT} ORDER BY name ASC"))?;
        let pets = stmt
            .query_map([], Self::row_to_pet)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(pets)
    }

    /// List pets of a given species, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn pets_by_species(&self, species: Species) -> Result<Vec<Pet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PET_SELECT} WHERE species = ?1 ORDER BY name ASC"))?;
        let pets = stmt
            .query_map([species.to_string()], Self::row_to_pet)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(pets)
    }

    /// Search pets by a case-insensitive name substring, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn search_pets(&self, name: &str) -> Result<Vec<Pet>> {
        let pattern = format!("%{}%", name.to_lowercase());
        let mut stmt = self.conn.prepare(&format!(
            "{PET_SELECT} WHERE LOWER(name) LIKE ?1 ORDER BY name ASC"
        ))?;
        let pets = stmt
            .query_map([pattern], Self::row_to_pet)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(pets)
    }

    /// Update a pet profile. The `updated_at` timestamp is refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PetNotFound`] if the pet does not exist, or an error
    /// if the database operation fails.
    pub fn update_pet(&self, pet: &Pet) -> Result<()> {
        let id = pet
            .id
            .ok_or_else(|| Error::internal("update_pet called with an unsaved pet"))?;

        let affected = self.conn.execute(
            r"
            UPDATE pets
            SET name = ?1, species = ?2, breed = ?3, birthdate = ?4, gender = ?5,
                weight_kg = ?6, notes = ?7, updated_at = ?8
            WHERE id = ?9
            ",
            params![
                pet.name,
                pet.species.to_string(),
                pet.breed,
                pet.birthdate.map(format_date),
                pet.gender.map(|g| g.to_string()),
                pet.weight_kg,
                pet.notes,
                Utc::now().to_rfc3339(),
                id,
            ],
        )?;

        if affected == 0 {
            return Err(Error::PetNotFound { id });
        }
        Ok(())
    }

    /// Delete a pet and, via cascade, all its records.
    ///
    /// Returns `true` if a pet was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_pet(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM pets WHERE id = ?1", [id])?;
        if affected > 0 {
            info!("Deleted pet {} and its records", id);
        }
        Ok(affected > 0)
    }

    /// Record a new weight for a pet.
    ///
    /// Updates the pet's current weight and inserts a weight-only health
    /// record dated `date`. Returns the id of the inserted record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PetNotFound`] if the pet does not exist, or an error
    /// if the database operation fails.
    pub fn record_weight(&self, pet_id: i64, weight_kg: f64, date: NaiveDate) -> Result<i64> {
        self.require_pet(pet_id)?;

        let mut record = HealthRecord::new(pet_id, date);
        record.weight_kg = Some(weight_kg);
        let record_id = self.insert_health_record(&record)?;

        self.set_pet_weight(pet_id, weight_kg)?;
        Ok(record_id)
    }

    /// Update only a pet's current weight and `updated_at`.
    fn set_pet_weight(&self, pet_id: i64, weight_kg: f64) -> Result<()> {
        self.conn.execute(
            "UPDATE pets SET weight_kg = ?1, updated_at = ?2 WHERE id = ?3",
            params![weight_kg, Utc::now().to_rfc3339(), pet_id],
        )?;
        Ok(())
    }

    // === Health records ===

    /// Insert a health record and return its assigned id.
    ///
    /// When the record carries a weight, the pet's current weight is updated
    /// to match, mirroring the weigh-in flow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PetNotFound`] if the owning pet does not exist, or an
    /// error if the database operation fails.
    pub fn add_health_record(&self, record: &HealthRecord) -> Result<i64> {
        self.require_pet(record.pet_id)?;
        let id = self.insert_health_record(record)?;

        if let Some(weight) = record.weight_kg {
            self.set_pet_weight(record.pet_id, weight)?;
        }
        Ok(id)
    }

    fn insert_health_record(&self, record: &HealthRecord) -> Result<i64> {
        self.conn.execute(
            r"
            INSERT INTO health_records (pet_id, date, weight_kg, temperature_c, symptoms,
                                        medications, notes, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
            params![
                record.pet_id,
                format_date(record.date),
                record.weight_kg,
                record.temperature_c,
                record.symptoms,
                record.medications,
                record.notes,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update a health record. The `updated_at` timestamp is refreshed, and
    /// the pet's current weight follows the record's weight when present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the record does not exist, or an
    /// error if the database operation fails.
    pub fn update_health_record(&self, record: &HealthRecord) -> Result<()> {
        let id = record
            .id
            .ok_or_else(|| Error::internal("update_health_record called with an unsaved record"))?;

        let affected = self.conn.execute(
            r"
            UPDATE health_records
            SET date = ?1, weight_kg = ?2, temperature_c = ?3, symptoms = ?4,
                medications = ?5, notes = ?6, updated_at = ?7
            WHERE id = ?8
            ",
            params![
                format_date(record.date),
                record.weight_kg,
                record.temperature_c,
                record.symptoms,
                record.medications,
                record.notes,
                Utc::now().to_rfc3339(),
                id,
            ],
        )?;

        if affected == 0 {
            return Err(Error::record_not_found("health record", id));
        }
        if let Some(weight) = record.weight_kg {
            self.set_pet_weight(record.pet_id, weight)?;
        }
        Ok(())
    }

    /// Delete a health record by id.
    ///
    /// Returns `true` if a record was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_health_record(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM health_records WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    /// Get all health records for a pet, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn health_records(&self, pet_id: i64) -> Result<Vec<HealthRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{HEALTH_SELECT} WHERE pet_id = ?1 ORDER BY date DESC"
        ))?;
        let records = stmt
            .query_map([pet_id], Self::row_to_health_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Get health records for a pet within an inclusive date range, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn health_records_between(
        &self,
        pet_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HealthRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{HEALTH_SELECT} WHERE pet_id = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date DESC"
        ))?;
        let records = stmt
            .query_map(
                params![pet_id, format_date(start), format_date(end)],
                Self::row_to_health_record,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Get the most recent weight-bearing health records for a pet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn weight_history(&self, pet_id: i64, limit: usize) -> Result<Vec<HealthRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{HEALTH_SELECT} WHERE pet_id = ?1 AND weight_kg IS NOT NULL
             ORDER BY date DESC LIMIT ?2"
        ))?;
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let records = stmt
            .query_map(params![pet_id, limit_i64], Self::row_to_health_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Search a pet's health records by a case-insensitive symptom substring.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn search_symptoms(&self, pet_id: i64, query: &str) -> Result<Vec<HealthRecord>> {
        let pattern = format!("%{}%", query.to_lowercase());
        let mut stmt = self.conn.prepare(&format!(
            "{HEALTH_SELECT} WHERE pet_id = ?1 AND LOWER(symptoms) LIKE ?2 ORDER BY date DESC"
        ))?;
        let records = stmt
            .query_map(params![pet_id, pattern], Self::row_to_health_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    // === Vaccinations ===

    /// Insert a vaccination entry and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PetNotFound`] if the owning pet does not exist, or an
    /// error if the database operation fails.
    pub fn add_vaccination(&self, vaccination: &Vaccination) -> Result<i64> {
        self.require_pet(vaccination.pet_id)?;
        self.conn.execute(
            r"
            INSERT INTO vaccinations (pet_id, name, administered, expires, next_due, vet,
                                      clinic, notes, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
            params![
                vaccination.pet_id,
                vaccination.name,
                format_date(vaccination.administered),
                vaccination.expires.map(format_date),
                vaccination.next_due.map(format_date),
                vaccination.vet,
                vaccination.clinic,
                vaccination.notes,
                vaccination.created_at.to_rfc3339(),
                vaccination.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get all vaccinations for a pet, most recently administered first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn vaccinations(&self, pet_id: i64) -> Result<Vec<Vaccination>> {
        let mut stmt = self.conn.prepare(&format!(
            "{VACCINATION_SELECT} WHERE pet_id = ?1 ORDER BY administered DESC"
        ))?;
        let vaccinations = stmt
            .query_map([pet_id], Self::row_to_vaccination)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(vaccinations)
    }

    /// Delete a vaccination by id.
    ///
    /// Returns `true` if an entry was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_vaccination(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM vaccinations WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    // === Meal schedules ===

    /// Insert a meal schedule and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PetNotFound`] if the owning pet does not exist, or an
    /// error if the database operation fails.
    pub fn add_meal_schedule(&self, schedule: &MealSchedule) -> Result<i64> {
        self.require_pet(schedule.pet_id)?;
        self.conn.execute(
            r"
            INSERT INTO meal_schedules (pet_id, name, time, amount_g, food, active,
                                        weekdays, notes, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
            params![
                schedule.pet_id,
                schedule.name,
                format_time(schedule.time),
                schedule.amount_g,
                schedule.food,
                schedule.active,
                schedule.weekdays_string(),
                schedule.notes,
                schedule.created_at.to_rfc3339(),
                schedule.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get all meal schedules for a pet, earliest time of day first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn meal_schedules(&self, pet_id: i64) -> Result<Vec<MealSchedule>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEAL_SELECT} WHERE pet_id = ?1 ORDER BY time ASC"
        ))?;
        let schedules = stmt
            .query_map([pet_id], Self::row_to_meal_schedule)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(schedules)
    }

    /// Get a pet's active meal schedules that apply on the given weekday
    /// (1=Sunday..7=Saturday), earliest time of day first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn meal_schedules_for_weekday(
        &self,
        pet_id: i64,
        weekday: u8,
    ) -> Result<Vec<MealSchedule>> {
        // The weekday set is a parsed column, so membership is filtered here
        // rather than with string matching in SQL.
        let schedules = self
            .meal_schedules(pet_id)?
            .into_iter()
            .filter(|s| s.active && s.contains_weekday(weekday))
            .collect();
        Ok(schedules)
    }

    /// Update a meal schedule. The `updated_at` timestamp is refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the schedule does not exist, or
    /// an error if the database operation fails.
    pub fn update_meal_schedule(&self, schedule: &MealSchedule) -> Result<()> {
        let id = schedule
            .id
            .ok_or_else(|| Error::internal("update_meal_schedule called with an unsaved schedule"))?;

        let affected = self.conn.execute(
            r"
            UPDATE meal_schedules
            SET name = ?1, time = ?2, amount_g = ?3, food = ?4, active = ?5,
                weekdays = ?6, notes = ?7, updated_at = ?8
            WHERE id = ?9
            ",
            params![
                schedule.name,
                format_time(schedule.time),
                schedule.amount_g,
                schedule.food,
                schedule.active,
                schedule.weekdays_string(),
                schedule.notes,
                Utc::now().to_rfc3339(),
                id,
            ],
        )?;

        if affected == 0 {
            return Err(Error::record_not_found("meal schedule", id));
        }
        Ok(())
    }

    /// Switch a meal schedule on or off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the schedule does not exist, or
    /// an error if the database operation fails.
    pub fn set_meal_active(&self, id: i64, active: bool) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE meal_schedules SET active = ?1, updated_at = ?2 WHERE id = ?3",
            params![active, Utc::now().to_rfc3339(), id],
        )?;
        if affected == 0 {
            return Err(Error::record_not_found("meal schedule", id));
        }
        Ok(())
    }

    /// Delete a meal schedule by id.
    ///
    /// Returns `true` if a schedule was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_meal_schedule(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM meal_schedules WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    // === Appointments ===

    /// Insert an appointment and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PetNotFound`] if the owning pet does not exist, or an
    /// error if the database operation fails.
    pub fn add_appointment(&self, appointment: &Appointment) -> Result<i64> {
        self.require_pet(appointment.pet_id)?;
        self.conn.execute(
            r"
            INSERT INTO appointments (pet_id, title, kind, date, time, duration_min,
                                      location, done, notes, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ",
            params![
                appointment.pet_id,
                appointment.title,
                appointment.kind.to_string(),
                format_date(appointment.date),
                format_time(appointment.time),
                appointment.duration_min,
                appointment.location,
                appointment.done,
                appointment.notes,
                appointment.created_at.to_rfc3339(),
                appointment.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get all appointments for a pet in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn appointments(&self, pet_id: i64) -> Result<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{APPOINTMENT_SELECT} WHERE pet_id = ?1 ORDER BY date ASC, time ASC"
        ))?;
        let appointments = stmt
            .query_map([pet_id], Self::row_to_appointment)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(appointments)
    }

    /// Get open appointments on or after `today`, soonest first.
    ///
    /// Completed appointments are excluded. When `pet_id` is given, only that
    /// pet's appointments are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn upcoming_appointments(
        &self,
        pet_id: Option<i64>,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Appointment>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let today = format_date(today);

        let appointments = match pet_id {
            Some(pet_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{APPOINTMENT_SELECT} WHERE date >= ?1 AND done = 0 AND pet_id = ?2
                     ORDER BY date ASC, time ASC LIMIT ?3"
                ))?;
                let rows = stmt
                    .query_map(params![today, pet_id, limit_i64], Self::row_to_appointment)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "{APPOINTMENT_SELECT} WHERE date >= ?1 AND done = 0
                     ORDER BY date ASC, time ASC LIMIT ?2"
                ))?;
                let rows = stmt
                    .query_map(params![today, limit_i64], Self::row_to_appointment)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };
        Ok(appointments)
    }

    /// Set or clear an appointment's completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the appointment does not exist,
    /// or an error if the database operation fails.
    pub fn set_appointment_done(&self, id: i64, done: bool) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE appointments SET done = ?1, updated_at = ?2 WHERE id = ?3",
            params![done, Utc::now().to_rfc3339(), id],
        )?;
        if affected == 0 {
            return Err(Error::record_not_found("appointment", id));
        }
        Ok(())
    }

    /// Delete an appointment by id.
    ///
    /// Returns `true` if an appointment was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_appointment(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    // === Stats ===

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let count = |table: &str| -> Result<i64> {
            let n: i64 =
                self.conn
                    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                        row.get(0)
                    })?;
            Ok(n)
        };

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            pets: count("pets")?,
            health_records: count("health_records")?,
            vaccinations: count("vaccinations")?,
            meal_schedules: count("meal_schedules")?,
            appointments: count("appointments")?,
            db_size_bytes,
        })
    }

    // === Row mappers ===

    fn row_to_pet(row: &Row) -> rusqlite::Result<Pet> {
        let species_str: String = row.get(2)?;
        let gender_str: Option<String> = row.get(5)?;
        Ok(Pet {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            species: Species::parse(&species_str),
            breed: row.get(3)?,
            birthdate: row.get::<_, Option<String>>(4)?.map(|s| parse_date(&s)),
            gender: gender_str.and_then(|s| Gender::parse(&s)),
            weight_kg: row.get(6)?,
            notes: row.get(7)?,
            created_at: parse_timestamp(&row.get::<_, String>(8)?),
            updated_at: parse_timestamp(&row.get::<_, String>(9)?),
        })
    }

    fn row_to_health_record(row: &Row) -> rusqlite::Result<HealthRecord> {
        Ok(HealthRecord {
            id: Some(row.get(0)?),
            pet_id: row.get(1)?,
            date: parse_date(&row.get::<_, String>(2)?),
            weight_kg: row.get(3)?,
            temperature_c: row.get(4)?,
            symptoms: row.get(5)?,
            medications: row.get(6)?,
            notes: row.get(7)?,
            created_at: parse_timestamp(&row.get::<_, String>(8)?),
            updated_at: parse_timestamp(&row.get::<_, String>(9)?),
        })
    }

    fn row_to_vaccination(row: &Row) -> rusqlite::Result<Vaccination> {
        Ok(Vaccination {
            id: Some(row.get(0)?),
            pet_id: row.get(1)?,
            name: row.get(2)?,
            administered: parse_date(&row.get::<_, String>(3)?),
            expires: row.get::<_, Option<String>>(4)?.map(|s| parse_date(&s)),
            next_due: row.get::<_, Option<String>>(5)?.map(|s| parse_date(&s)),
            vet: row.get(6)?,
            clinic: row.get(7)?,
            notes: row.get(8)?,
            created_at: parse_timestamp(&row.get::<_, String>(9)?),
            updated_at: parse_timestamp(&row.get::<_, String>(10)?),
        })
    }

    fn row_to_meal_schedule(row: &Row) -> rusqlite::Result<MealSchedule> {
        let weekdays_str: String = row.get(7)?;
        Ok(MealSchedule {
            id: Some(row.get(0)?),
            pet_id: row.get(1)?,
            name: row.get(2)?,
            time: parse_time(&row.get::<_, String>(3)?),
            amount_g: row.get(4)?,
            food: row.get(5)?,
            active: row.get(6)?,
            weekdays: parse_weekdays(&weekdays_str),
            notes: row.get(8)?,
            created_at: parse_timestamp(&row.get::<_, String>(9)?),
            updated_at: parse_timestamp(&row.get::<_, String>(10)?),
        })
    }

    fn row_to_appointment(row: &Row) -> rusqlite::Result<Appointment> {
        let kind_str: String = row.get(3)?;
        Ok(Appointment {
            id: Some(row.get(0)?),
            pet_id: row.get(1)?,
            title: row.get(2)?,
            kind: AppointmentKind::parse(&kind_str),
            date: parse_date(&row.get::<_, String>(4)?),
            time: parse_time(&row.get::<_, String>(5)?),
            duration_min: row.get(6)?,
            location: row.get(7)?,
            done: row.get(8)?,
            notes: row.get(9)?,
            created_at: parse_timestamp(&row.get::<_, String>(10)?),
            updated_at: parse_timestamp(&row.get::<_, String>(11)?),
        })
    }
}

/// Column list for pet queries, kept in sync with `row_to_pet`.
const PET_SELECT: &str = "SELECT id, name, species, breed, birthdate, gender, weight_kg, notes, \
                          created_at, updated_at FROM pets";

/// Column list for health record queries, kept in sync with `row_to_health_record`.
const HEALTH_SELECT: &str = "SELECT id, pet_id, date, weight_kg, temperature_c, symptoms, \
                             medications, notes, created_at, updated_at FROM health_records";

/// Column list for vaccination queries, kept in sync with `row_to_vaccination`.
const VACCINATION_SELECT: &str = "SELECT id, pet_id, name, administered, expires, next_due, vet, \
                                  clinic, notes, created_at, updated_at FROM vaccinations";

/// Column list for meal schedule queries, kept in sync with `row_to_meal_schedule`.
const MEAL_SELECT: &str = "SELECT id, pet_id, name, time, amount_g, food, active, weekdays, \
                           notes, created_at, updated_at FROM meal_schedules";

/// Column list for appointment queries, kept in sync with `row_to_appointment`.
const APPOINTMENT_SELECT: &str = "SELECT id, pet_id, title, kind, date, time, duration_min, \
                                  location, done, notes, created_at, updated_at FROM appointments";

/// Render a date in its stored form.
fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Render a time of day in its stored form.
fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parse a stored date, falling back to today on corruption.
fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap_or_else(|_| {
        warn!("Invalid stored date: {}, defaulting to today", s);
        Utc::now().date_naive()
    })
}

/// Parse a stored time of day, falling back to midnight on corruption.
fn parse_time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .unwrap_or_else(|_| {
            warn!("Invalid stored time: {}, defaulting to midnight", s);
            NaiveTime::MIN
        })
}

/// Parse a stored timestamp, falling back to now on corruption.
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    /// Number of pet profiles.
    pub pets: i64,
    /// Number of health records.
    pub health_records: i64,
    /// Number of vaccinations.
    pub vaccinations: i64,
    /// Number of meal schedules.
    pub meal_schedules: i64,
    /// Number of appointments.
    pub appointments: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
