//! `SQLite` schema definitions for pawtrack.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the pets table.
pub const CREATE_PETS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS pets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    species TEXT NOT NULL,
    breed TEXT,
    birthdate TEXT,
    gender TEXT,
    weight_kg REAL,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the health records table.
pub const CREATE_HEALTH_RECORDS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS health_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
    date TEXT NOT NULL,
    weight_kg REAL,
    temperature_c REAL,
    symptoms TEXT,
    medications TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the vaccinations table.
pub const CREATE_VACCINATIONS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS vaccinations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    administered TEXT NOT NULL,
    expires TEXT,
    next_due TEXT,
    vet TEXT,
    clinic TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the meal schedules table.
pub const CREATE_MEAL_SCHEDULES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS meal_schedules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    time TEXT NOT NULL,
    amount_g REAL NOT NULL,
    food TEXT NOT NULL,
    active INTEGER NOT NULL DEFAULT 1,
    weekdays TEXT NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the appointments table.
pub const CREATE_APPOINTMENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    kind TEXT NOT NULL,
    date TEXT NOT NULL,
    time TEXT NOT NULL,
    duration_min INTEGER,
    location TEXT,
    done INTEGER NOT NULL DEFAULT 0,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create an index on pet names for sorted listings.
pub const CREATE_PET_NAME_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_pets_name ON pets(name)
";

/// SQL statement to create an index on health record ownership and date.
pub const CREATE_HEALTH_PET_DATE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_health_records_pet_date ON health_records(pet_id, date DESC)
";

/// SQL statement to create an index on vaccination ownership.
pub const CREATE_VACCINATION_PET_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_vaccinations_pet ON vaccinations(pet_id)
";

/// SQL statement to create an index on meal schedule ownership and time.
pub const CREATE_MEAL_PET_TIME_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_meal_schedules_pet_time ON meal_schedules(pet_id, time)
";

/// SQL statement to create an index on appointment date for range scans.
pub const CREATE_APPOINTMENT_DATE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_PETS_TABLE,
    CREATE_HEALTH_RECORDS_TABLE,
    CREATE_VACCINATIONS_TABLE,
    CREATE_MEAL_SCHEDULES_TABLE,
    CREATE_APPOINTMENTS_TABLE,
    CREATE_PET_NAME_INDEX,
    CREATE_HEALTH_PET_DATE_INDEX,
    CREATE_VACCINATION_PET_INDEX,
    CREATE_MEAL_PET_TIME_INDEX,
    CREATE_APPOINTMENT_DATE_INDEX,
    CREATE_METADATA_TABLE,
];
