//! `pawtrack` - CLI for the local pet-care tracker
//!
//! This binary provides the command-line interface for managing pet profiles,
//! health records, vaccinations, meal schedules, and appointments.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;

use pawtrack::care::{
    self, appointment_status, health_status, meal_status, vaccination_status_description,
    CareThresholds,
};
use pawtrack::cli::{
    ApptCommand, Cli, Command, ConfigCommand, HealthCommand, MealCommand, OutputFormat,
    PetCommand, StatusCommand, SummaryCommand, VaxCommand,
};
use pawtrack::model::{parse_weekdays, Appointment, HealthRecord, MealSchedule, Pet, Vaccination};
use pawtrack::{init_logging, CareSummary, Config, Store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        // Config commands don't need the database
        Command::Config(cmd) => handle_config(&config, cmd),
        command => {
            let store = Store::open(config.database_path()).with_context(|| {
                format!("cannot open database at {}", config.database_path().display())
            })?;
            let now = Local::now().naive_local();

            match command {
                Command::Pet(cmd) => handle_pet(&store, &config.care, cmd, now),
                Command::Health(cmd) => handle_health(&store, &config.care, cmd, now.date()),
                Command::Vax(cmd) => handle_vax(&store, &config.care, cmd, now.date()),
                Command::Meal(cmd) => handle_meal(&store, &config.care, cmd, now),
                Command::Appt(cmd) => handle_appt(&store, cmd, now),
                Command::Summary(cmd) => handle_summary(&store, &config.care, &cmd, now),
                Command::Status(cmd) => handle_status(&store, &config, &cmd),
                Command::Config(_) => unreachable!(),
            }
        }
    }
}

fn handle_pet(
    store: &Store,
    thresholds: &CareThresholds,
    cmd: PetCommand,
    now: NaiveDateTime,
) -> anyhow::Result<()> {
    let today = now.date();
    match cmd {
        PetCommand::Add {
            name,
            species,
            breed,
            birthdate,
            gender,
            weight,
            notes,
        } => {
            let mut pet = Pet::new(name, species.into());
            pet.breed = breed;
            pet.birthdate = birthdate;
            pet.gender = gender.map(Into::into);
            pet.weight_kg = weight;
            pet.notes = notes;

            let id = store.add_pet(&pet)?;
            println!("Added pet '{}' with id {id}", pet.name);
        }
        PetCommand::List {
            species,
            name,
            format,
        } => {
            let pets = match (species, &name) {
                (Some(species), _) => store.pets_by_species(species.into())?,
                (None, Some(name)) => store.search_pets(name)?,
                (None, None) => store.list_pets()?,
            };
            print_pets(&pets, format, today)?;
        }
        PetCommand::Show { id, json } => {
            let pet = store.require_pet(id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pet)?);
            } else {
                print_pet_profile(store, thresholds, &pet, today)?;
            }
        }
        PetCommand::Weigh { id, weight, date } => {
            let date = date.unwrap_or(today);
            store.record_weight(id, weight, date)?;
            println!("Recorded {weight} kg for pet {id} on {date}");
        }
        PetCommand::Remove { id } => {
            if store.delete_pet(id)? {
                println!("Removed pet {id} and all its records");
            } else {
                println!("No pet with id {id}");
            }
        }
    }
    Ok(())
}

fn print_pets(pets: &[Pet], format: OutputFormat, today: NaiveDate) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(pets)?),
        OutputFormat::Table => {
            if pets.is_empty() {
                println!("No pets recorded.");
                return Ok(());
            }
            println!("{:<5} {:<16} {:<8} {:<14} {:<18} WEIGHT", "ID", "NAME", "SPECIES", "BREED", "AGE");
            for pet in pets {
                println!(
                    "{:<5} {:<16} {:<8} {:<14} {:<18} {}",
                    pet.id.unwrap_or(0),
                    pet.name,
                    pet.species.to_string(),
                    pet.breed.as_deref().unwrap_or("-"),
                    care::age(pet.birthdate, today).to_string(),
                    pet.weight_kg
                        .map_or_else(|| "-".to_string(), |w| format!("{w} kg")),
                );
            }
        }
        OutputFormat::Plain => {
            for pet in pets {
                println!("{}  {} ({})", pet.id.unwrap_or(0), pet.name, pet.species);
            }
        }
    }
    Ok(())
}

fn print_pet_profile(
    store: &Store,
    thresholds: &CareThresholds,
    pet: &Pet,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let id = pet.id.unwrap_or(0);
    println!("{} (id {id})", pet.name);
    println!("  Species:   {}", pet.species);
    if let Some(breed) = &pet.breed {
        println!("  Breed:     {breed}");
    }
    println!("  Age:       {}", care::age(pet.birthdate, today));
    if let Some(gender) = pet.gender {
        println!("  Gender:    {gender}");
    }
    if let Some(weight) = pet.weight_kg {
        println!("  Weight:    {weight} kg");
    }
    if let Some(notes) = &pet.notes {
        println!("  Notes:     {notes}");
    }

    if let Some(record) = store.health_records(id)?.first() {
        println!(
            "  Health:    {} (last record {})",
            health_status(record, thresholds),
            care::relative_day(record.date, today)
        );
    } else {
        println!("  Health:    no records yet");
    }
    Ok(())
}

fn handle_health(
    store: &Store,
    thresholds: &CareThresholds,
    cmd: HealthCommand,
    today: NaiveDate,
) -> anyhow::Result<()> {
    match cmd {
        HealthCommand::Add {
            pet_id,
            date,
            weight,
            temperature,
            symptoms,
            medications,
            notes,
        } => {
            let mut record = HealthRecord::new(pet_id, date.unwrap_or(today));
            record.weight_kg = weight;
            record.temperature_c = temperature;
            record.symptoms = symptoms;
            record.medications = medications;
            record.notes = notes;

            let id = store.add_health_record(&record)?;
            println!(
                "Added health record {id} for pet {pet_id} (status: {})",
                health_status(&record, thresholds)
            );
        }
        HealthCommand::List {
            pet_id,
            from,
            to,
            format,
        } => {
            let records = if from.is_some() || to.is_some() {
                let lo = from.unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
                let hi = to.unwrap_or_else(|| NaiveDate::from_ymd_opt(9999, 12, 31).unwrap());
                store.health_records_between(pet_id, lo, hi)?
            } else {
                store.health_records(pet_id)?
            };
            print_health_records(&records, thresholds, format, today)?;
        }
        HealthCommand::Weights { pet_id, limit } => {
            let history = store.weight_history(pet_id, limit)?;
            if history.is_empty() {
                println!("No weight records for pet {pet_id}.");
            }
            for record in history {
                if let Some(weight) = record.weight_kg {
                    println!("{}  {weight} kg", record.date);
                }
            }
        }
        HealthCommand::Search { pet_id, query } => {
            let records = store.search_symptoms(pet_id, &query)?;
            if records.is_empty() {
                println!("No records matching '{query}'.");
            }
            for record in records {
                println!(
                    "{}  {}  ({})",
                    record.id.unwrap_or(0),
                    record.date,
                    record.symptoms.as_deref().unwrap_or("-")
                );
            }
        }
        HealthCommand::Remove { id } => {
            if store.delete_health_record(id)? {
                println!("Removed health record {id}");
            } else {
                println!("No health record with id {id}");
            }
        }
    }
    Ok(())
}

fn print_health_records(
    records: &[HealthRecord],
    thresholds: &CareThresholds,
    format: OutputFormat,
    today: NaiveDate,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Table => {
            if records.is_empty() {
                println!("No health records.");
                return Ok(());
            }
            println!("{:<5} {:<12} {:<9} {:<7} {:<8} SYMPTOMS", "ID", "DATE", "WEIGHT", "TEMP", "STATUS");
            for record in records {
                println!(
                    "{:<5} {:<12} {:<9} {:<7} {:<8} {}",
                    record.id.unwrap_or(0),
                    record.date.to_string(),
                    record
                        .weight_kg
                        .map_or_else(|| "-".to_string(), |w| format!("{w} kg")),
                    record
                        .temperature_c
                        .map_or_else(|| "-".to_string(), |t| format!("{t}")),
                    health_status(record, thresholds).to_string(),
                    record.symptoms.as_deref().unwrap_or("-"),
                );
            }
        }
        OutputFormat::Plain => {
            for record in records {
                println!(
                    "{}  {}  {}",
                    record.id.unwrap_or(0),
                    care::relative_day(record.date, today),
                    health_status(record, thresholds)
                );
            }
        }
    }
    Ok(())
}

fn handle_vax(
    store: &Store,
    thresholds: &CareThresholds,
    cmd: VaxCommand,
    today: NaiveDate,
) -> anyhow::Result<()> {
    match cmd {
        VaxCommand::Add {
            pet_id,
            name,
            administered,
            expires,
            next_due,
            vet,
            clinic,
            notes,
        } => {
            let mut vaccination = Vaccination::new(pet_id, name, administered.unwrap_or(today));
            vaccination.expires = expires;
            vaccination.next_due = next_due;
            vaccination.vet = vet;
            vaccination.clinic = clinic;
            vaccination.notes = notes;

            let id = store.add_vaccination(&vaccination)?;
            println!(
                "Added vaccination '{}' with id {id} ({})",
                vaccination.name,
                vaccination_status_description(&vaccination, today, thresholds)
            );
        }
        VaxCommand::List { pet_id, json } => {
            let vaccinations = store.vaccinations(pet_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&vaccinations)?);
            } else if vaccinations.is_empty() {
                println!("No vaccinations for pet {pet_id}.");
            } else {
                for vaccination in &vaccinations {
                    println!(
                        "{}  {} (administered {}): {}",
                        vaccination.id.unwrap_or(0),
                        vaccination.name,
                        vaccination.administered,
                        vaccination_status_description(vaccination, today, thresholds)
                    );
                }
            }
        }
        VaxCommand::Remove { id } => {
            if store.delete_vaccination(id)? {
                println!("Removed vaccination {id}");
            } else {
                println!("No vaccination with id {id}");
            }
        }
    }
    Ok(())
}

fn handle_meal(
    store: &Store,
    thresholds: &CareThresholds,
    cmd: MealCommand,
    now: NaiveDateTime,
) -> anyhow::Result<()> {
    match cmd {
        MealCommand::Add {
            pet_id,
            name,
            time,
            amount,
            food,
            weekdays,
            notes,
        } => {
            let days = parse_weekdays(&weekdays);
            if days.is_empty() {
                bail!("no valid weekdays in '{weekdays}' (use 1=Sunday..7=Saturday)");
            }
            let mut schedule = MealSchedule::new(pet_id, name, time, amount, food, &days);
            schedule.notes = notes;

            let id = store.add_meal_schedule(&schedule)?;
            println!("Added meal schedule '{}' with id {id}", schedule.name);
        }
        MealCommand::List { pet_id, json } => {
            let schedules = store.meal_schedules(pet_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&schedules)?);
            } else if schedules.is_empty() {
                println!("No meal schedules for pet {pet_id}.");
            } else {
                for schedule in &schedules {
                    println!(
                        "{}  {} at {} ({} g of {}, days {}) [{}]",
                        schedule.id.unwrap_or(0),
                        schedule.name,
                        schedule.time.format("%H:%M"),
                        schedule.amount_g,
                        schedule.food,
                        schedule.weekdays_string(),
                        meal_status(schedule, now, thresholds),
                    );
                }
            }
        }
        MealCommand::Next { pet_id } => {
            store.require_pet(pet_id)?;
            let next = store
                .meal_schedules(pet_id)?
                .into_iter()
                .filter_map(|s| care::next_feeding(&s, now).map(|at| (at, s)))
                .min_by_key(|(at, _)| *at);

            match next {
                Some((at, schedule)) => {
                    let minutes = at.signed_duration_since(now).num_minutes();
                    println!(
                        "Next feeding: '{}' at {} ({})",
                        schedule.name,
                        at.format("%Y-%m-%d %H:%M"),
                        care::format_feeding_lead(minutes)
                    );
                }
                None => println!("No active meal schedule for pet {pet_id}."),
            }
        }
        MealCommand::Pause { id } => {
            store.set_meal_active(id, false)?;
            println!("Paused meal schedule {id}");
        }
        MealCommand::Resume { id } => {
            store.set_meal_active(id, true)?;
            println!("Resumed meal schedule {id}");
        }
        MealCommand::Remove { id } => {
            if store.delete_meal_schedule(id)? {
                println!("Removed meal schedule {id}");
            } else {
                println!("No meal schedule with id {id}");
            }
        }
    }
    Ok(())
}

fn handle_appt(store: &Store, cmd: ApptCommand, now: NaiveDateTime) -> anyhow::Result<()> {
    match cmd {
        ApptCommand::Add {
            pet_id,
            title,
            date,
            time,
            kind,
            duration,
            location,
            notes,
        } => {
            let mut appointment = Appointment::new(pet_id, title, kind.into(), date, time);
            appointment.duration_min = duration;
            appointment.location = location;
            appointment.notes = notes;

            let id = store.add_appointment(&appointment)?;
            println!(
                "Added appointment '{}' with id {id} on {} at {}",
                appointment.title,
                appointment.date,
                appointment.time.format("%H:%M")
            );
        }
        ApptCommand::List { pet_id, json } => {
            let appointments = store.appointments(pet_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&appointments)?);
            } else if appointments.is_empty() {
                println!("No appointments for pet {pet_id}.");
            } else {
                for appointment in &appointments {
                    println!(
                        "{}  {} {}  {} ({}) [{}]",
                        appointment.id.unwrap_or(0),
                        appointment.date,
                        appointment.time.format("%H:%M"),
                        appointment.title,
                        appointment.kind,
                        appointment_status(appointment, now),
                    );
                }
            }
        }
        ApptCommand::Done { id } => {
            store.set_appointment_done(id, true)?;
            println!("Marked appointment {id} as completed");
        }
        ApptCommand::Reopen { id } => {
            store.set_appointment_done(id, false)?;
            println!("Reopened appointment {id}");
        }
        ApptCommand::Remove { id } => {
            if store.delete_appointment(id)? {
                println!("Removed appointment {id}");
            } else {
                println!("No appointment with id {id}");
            }
        }
    }
    Ok(())
}

fn handle_summary(
    store: &Store,
    thresholds: &CareThresholds,
    cmd: &SummaryCommand,
    now: NaiveDateTime,
) -> anyhow::Result<()> {
    let summary = CareSummary::build(store, cmd.pet, now, thresholds)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Care summary ({} pets)", summary.pets.len());
    println!("======================");

    println!();
    println!("Upcoming appointments");
    if summary.upcoming_appointments.is_empty() {
        println!("  none");
    }
    for appointment in &summary.upcoming_appointments {
        println!(
            "  {} {}  {}",
            appointment.date,
            appointment.time.format("%H:%M"),
            appointment.title
        );
    }

    println!();
    println!("Vaccination alerts");
    if summary.vaccination_alerts.is_empty() {
        println!("  none");
    }
    for alert in &summary.vaccination_alerts {
        println!(
            "  {}: {} {}",
            alert.pet_name, alert.vaccination.name, alert.description
        );
    }

    println!();
    println!("Today's feedings");
    if summary.today_feedings.is_empty() {
        println!("  none");
    }
    let next = summary.next_feeding(now);
    for slot in &summary.today_feedings {
        let marker = match next {
            Some(n) if std::ptr::eq(n, slot) => " <- next",
            _ => "",
        };
        println!(
            "  {} {}  {}{marker}",
            slot.time().format("%H:%M"),
            slot.pet_name,
            slot.schedule.name
        );
    }
    Ok(())
}

fn handle_status(store: &Store, config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let stats = store.stats()?;
    if cmd.json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("pawtrack status");
        println!("---------------");
        println!("Database:        {}", config.database_path().display());
        println!("Pets:            {}", stats.pets);
        println!("Health records:  {}", stats.health_records);
        println!("Vaccinations:    {}", stats.vaccinations);
        println!("Meal schedules:  {}", stats.meal_schedules);
        println!("Appointments:    {}", stats.appointments);
        println!("Database size:   {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:        {}", config.database_path().display());
                println!();
                println!("[Care]");
                println!("  Expiry warning days:  {}", config.care.expiry_warning_days);
                println!("  Due-soon days:        {}", config.care.due_soon_days);
                println!("  Upcoming days:        {}", config.care.upcoming_days);
                println!("  Feeding-soon minutes: {}", config.care.feeding_soon_minutes);
                println!(
                    "  Normal temperature:   {} - {} degC",
                    config.care.temperature_normal_min, config.care.temperature_normal_max
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
