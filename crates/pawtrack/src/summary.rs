//! Care dashboard assembly.
//!
//! Builds a point-in-time overview of everything that needs attention:
//! open appointments, vaccinations that are expired or closing in on a
//! deadline, and today's feeding slots. All status logic lives in
//! [`crate::care`]; this module only gathers and orders.

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::care::{
    self, vaccination_status, vaccination_status_description, CareThresholds, VaccinationStatus,
};
use crate::error::Result;
use crate::model::{Appointment, MealSchedule, Pet, Vaccination};
use crate::storage::Store;

/// Maximum number of open appointments shown on the dashboard.
const UPCOMING_APPOINTMENT_LIMIT: usize = 5;

/// A vaccination that needs attention.
#[derive(Debug, Clone, Serialize)]
pub struct VaccinationAlert {
    /// Id of the pet the vaccination belongs to.
    pub pet_id: i64,
    /// Name of the pet, for display.
    pub pet_name: String,
    /// The vaccination entry.
    pub vaccination: Vaccination,
    /// The computed status that raised the alert.
    pub status: VaccinationStatus,
    /// Days until the relevant deadline. Negative when already past.
    pub days_until: Option<i64>,
    /// Human-readable status line.
    pub description: String,
}

/// A feeding slot that applies today.
#[derive(Debug, Clone, Serialize)]
pub struct FeedingSlot {
    /// Name of the pet, for display.
    pub pet_name: String,
    /// The meal schedule.
    pub schedule: MealSchedule,
}

impl FeedingSlot {
    /// Time of day the slot is served.
    #[must_use]
    pub fn time(&self) -> NaiveTime {
        self.schedule.time
    }
}

/// A point-in-time overview of pets and the care items that need attention.
#[derive(Debug, Clone, Serialize)]
pub struct CareSummary {
    /// The pets covered by this summary, sorted by name.
    pub pets: Vec<Pet>,
    /// Open appointments, soonest first, capped at five.
    pub upcoming_appointments: Vec<Appointment>,
    /// Vaccinations that are expired, near expiry, or due soon, most urgent
    /// first.
    pub vaccination_alerts: Vec<VaccinationAlert>,
    /// Active feeding slots that apply today, earliest first.
    pub today_feedings: Vec<FeedingSlot>,
}

impl CareSummary {
    /// Assemble a summary from the store as of `now`.
    ///
    /// When `pet_id` is given the summary covers only that pet, otherwise
    /// every pet in the store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PetNotFound`] if a filter pet does not exist,
    /// or an error if a database operation fails.
    pub fn build(
        store: &Store,
        pet_id: Option<i64>,
        now: NaiveDateTime,
        thresholds: &CareThresholds,
    ) -> Result<Self> {
        let pets = match pet_id {
            Some(id) => vec![store.require_pet(id)?],
            None => store.list_pets()?,
        };

        let upcoming_appointments =
            store.upcoming_appointments(pet_id, now.date(), UPCOMING_APPOINTMENT_LIMIT)?;

        let today = now.date();
        let weekday = care::weekday_number(today);

        let mut vaccination_alerts = Vec::new();
        let mut today_feedings = Vec::new();

        for pet in &pets {
            let Some(id) = pet.id else { continue };

            for vaccination in store.vaccinations(id)? {
                let status = vaccination_status(&vaccination, today, thresholds);
                let days_until = match status {
                    VaccinationStatus::Expired | VaccinationStatus::NearExpiry => vaccination
                        .expires
                        .map(|d| care::days_between(today, d)),
                    VaccinationStatus::DueSoon => {
                        vaccination.next_due.map(|d| care::days_between(today, d))
                    }
                    VaccinationStatus::Valid | VaccinationStatus::Unknown => continue,
                };
                let description = vaccination_status_description(&vaccination, today, thresholds);
                vaccination_alerts.push(VaccinationAlert {
                    pet_id: id,
                    pet_name: pet.name.clone(),
                    vaccination,
                    status,
                    days_until,
                    description,
                });
            }

            for schedule in store.meal_schedules_for_weekday(id, weekday)? {
                today_feedings.push(FeedingSlot {
                    pet_name: pet.name.clone(),
                    schedule,
                });
            }
        }

        vaccination_alerts
            .sort_by_key(|a| (urgency_rank(a.status), a.days_until.unwrap_or(i64::MAX)));
        today_feedings.sort_by_key(FeedingSlot::time);

        Ok(Self {
            pets,
            upcoming_appointments,
            vaccination_alerts,
            today_feedings,
        })
    }

    /// The next feeding slot relative to `now`.
    ///
    /// Returns the earliest slot still ahead today, or the first slot of the
    /// day when all of today's servings are behind us.
    #[must_use]
    pub fn next_feeding(&self, now: NaiveDateTime) -> Option<&FeedingSlot> {
        self.today_feedings
            .iter()
            .find(|slot| slot.time() > now.time())
            .or_else(|| self.today_feedings.first())
    }

    /// Whether the summary has nothing that needs attention.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.upcoming_appointments.is_empty()
            && self.vaccination_alerts.is_empty()
            && self.today_feedings.is_empty()
    }
}

/// Sort rank for alert urgency. Lower is more urgent.
fn urgency_rank(status: VaccinationStatus) -> u8 {
    match status {
        VaccinationStatus::Expired => 0,
        VaccinationStatus::NearExpiry => 1,
        VaccinationStatus::DueSoon => 2,
        VaccinationStatus::Valid | VaccinationStatus::Unknown => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppointmentKind, Species};
    use chrono::{NaiveDate, NaiveDateTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // 2026-08-30 is a Sunday (weekday 1).
    fn sunday_morning() -> NaiveDateTime {
        date(2026, 8, 30).and_time(time(10, 0))
    }

    fn setup() -> (Store, i64) {
        let store = Store::open_in_memory().unwrap();
        let id = store.add_pet(&Pet::new("Mocha", Species::Dog)).unwrap();
        (store, id)
    }

    #[test]
    fn test_empty_store_summary() {
        let store = Store::open_in_memory().unwrap();
        let summary = CareSummary::build(
            &store,
            None,
            sunday_morning(),
            &CareThresholds::default(),
        )
        .unwrap();

        assert!(summary.pets.is_empty());
        assert!(summary.is_quiet());
        assert!(summary.next_feeding(sunday_morning()).is_none());
    }

    #[test]
    fn test_pet_filter_missing() {
        let store = Store::open_in_memory().unwrap();
        let err = CareSummary::build(
            &store,
            Some(42),
            sunday_morning(),
            &CareThresholds::default(),
        )
        .unwrap_err();
        assert!(err.is_pet_not_found());
    }

    #[test]
    fn test_upcoming_appointments_capped_at_five() {
        let (store, id) = setup();
        for day in 1..=8 {
            store
                .add_appointment(&Appointment::new(
                    id,
                    format!("appt {day}"),
                    AppointmentKind::Vet,
                    date(2026, 9, day),
                    time(9, 0),
                ))
                .unwrap();
        }

        let summary = CareSummary::build(
            &store,
            None,
            sunday_morning(),
            &CareThresholds::default(),
        )
        .unwrap();

        assert_eq!(summary.upcoming_appointments.len(), 5);
        assert_eq!(summary.upcoming_appointments[0].title, "appt 1");
    }

    #[test]
    fn test_vaccination_alerts_ordered_by_urgency() {
        let (store, id) = setup();
        let today = date(2026, 8, 30);

        let mut valid = Vaccination::new(id, "valid", date(2026, 1, 1));
        valid.expires = Some(date(2027, 8, 1));
        store.add_vaccination(&valid).unwrap();

        let mut due_soon = Vaccination::new(id, "due soon", date(2026, 1, 1));
        due_soon.next_due = Some(date(2026, 9, 5));
        store.add_vaccination(&due_soon).unwrap();

        let mut near = Vaccination::new(id, "near expiry", date(2026, 1, 1));
        near.expires = Some(date(2026, 9, 20));
        store.add_vaccination(&near).unwrap();

        let mut expired = Vaccination::new(id, "expired", date(2025, 1, 1));
        expired.expires = Some(date(2026, 8, 1));
        store.add_vaccination(&expired).unwrap();

        let summary =
            CareSummary::build(&store, None, today.and_time(time(10, 0)), &CareThresholds::default())
                .unwrap();

        let names: Vec<&str> = summary
            .vaccination_alerts
            .iter()
            .map(|a| a.vaccination.name.as_str())
            .collect();
        assert_eq!(names, vec!["expired", "near expiry", "due soon"]);
        assert_eq!(summary.vaccination_alerts[0].days_until, Some(-29));
        assert_eq!(summary.vaccination_alerts[1].days_until, Some(21));
        assert_eq!(summary.vaccination_alerts[2].days_until, Some(6));
    }

    #[test]
    fn test_alerts_within_same_rank_sorted_by_days() {
        let (store, id) = setup();

        let mut far = Vaccination::new(id, "near far", date(2026, 1, 1));
        far.expires = Some(date(2026, 9, 25));
        store.add_vaccination(&far).unwrap();

        let mut close = Vaccination::new(id, "near close", date(2026, 1, 1));
        close.expires = Some(date(2026, 9, 2));
        store.add_vaccination(&close).unwrap();

        let summary = CareSummary::build(
            &store,
            None,
            sunday_morning(),
            &CareThresholds::default(),
        )
        .unwrap();

        assert_eq!(summary.vaccination_alerts[0].vaccination.name, "near close");
        assert_eq!(summary.vaccination_alerts[1].vaccination.name, "near far");
    }

    #[test]
    fn test_today_feedings_only_todays_weekday() {
        let (store, id) = setup();

        // Sunday is weekday 1
        store
            .add_meal_schedule(&MealSchedule::new(
                id,
                "sunday dinner",
                time(18, 0),
                200.0,
                "wet food",
                &[1],
            ))
            .unwrap();
        store
            .add_meal_schedule(&MealSchedule::new(
                id,
                "weekday breakfast",
                time(7, 30),
                150.0,
                "dry food",
                &[2, 3, 4, 5, 6],
            ))
            .unwrap();

        let summary = CareSummary::build(
            &store,
            None,
            sunday_morning(),
            &CareThresholds::default(),
        )
        .unwrap();

        assert_eq!(summary.today_feedings.len(), 1);
        assert_eq!(summary.today_feedings[0].schedule.name, "sunday dinner");
        assert_eq!(summary.today_feedings[0].pet_name, "Mocha");
    }

    #[test]
    fn test_today_feedings_sorted_across_pets() {
        let (store, mocha) = setup();
        let mike = store.add_pet(&Pet::new("Mike", Species::Cat)).unwrap();

        store
            .add_meal_schedule(&MealSchedule::new(
                mocha,
                "late",
                time(18, 0),
                200.0,
                "wet food",
                &[1],
            ))
            .unwrap();
        store
            .add_meal_schedule(&MealSchedule::new(
                mike,
                "early",
                time(6, 0),
                60.0,
                "kibble",
                &[1],
            ))
            .unwrap();

        let summary = CareSummary::build(
            &store,
            None,
            sunday_morning(),
            &CareThresholds::default(),
        )
        .unwrap();

        assert_eq!(summary.today_feedings[0].schedule.name, "early");
        assert_eq!(summary.today_feedings[1].schedule.name, "late");
    }

    #[test]
    fn test_next_feeding_prefers_slot_still_ahead() {
        let (store, id) = setup();

        for (name, t) in [("morning", time(6, 0)), ("evening", time(18, 0))] {
            store
                .add_meal_schedule(&MealSchedule::new(id, name, t, 150.0, "dry food", &[1]))
                .unwrap();
        }

        let summary = CareSummary::build(
            &store,
            None,
            sunday_morning(),
            &CareThresholds::default(),
        )
        .unwrap();

        // At 10:00 the morning slot is behind us
        let next = summary.next_feeding(sunday_morning()).unwrap();
        assert_eq!(next.schedule.name, "evening");

        // After the last slot, wrap back to the first of the day
        let late = date(2026, 8, 30).and_time(time(22, 0));
        let next = summary.next_feeding(late).unwrap();
        assert_eq!(next.schedule.name, "morning");
    }

    #[test]
    fn test_pet_filter_scopes_everything() {
        let (store, mocha) = setup();
        let mike = store.add_pet(&Pet::new("Mike", Species::Cat)).unwrap();

        store
            .add_appointment(&Appointment::new(
                mike,
                "mike checkup",
                AppointmentKind::Vet,
                date(2026, 9, 4),
                time(14, 30),
            ))
            .unwrap();
        let mut expired = Vaccination::new(mike, "expired", date(2025, 1, 1));
        expired.expires = Some(date(2026, 8, 1));
        store.add_vaccination(&expired).unwrap();

        let summary = CareSummary::build(
            &store,
            Some(mocha),
            sunday_morning(),
            &CareThresholds::default(),
        )
        .unwrap();

        assert_eq!(summary.pets.len(), 1);
        assert_eq!(summary.pets[0].name, "Mocha");
        assert!(summary.upcoming_appointments.is_empty());
        assert!(summary.vaccination_alerts.is_empty());
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let (store, id) = setup();
        let mut expired = Vaccination::new(id, "rabies", date(2025, 1, 1));
        expired.expires = Some(date(2026, 8, 1));
        store.add_vaccination(&expired).unwrap();

        let summary = CareSummary::build(
            &store,
            None,
            sunday_morning(),
            &CareThresholds::default(),
        )
        .unwrap();

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("vaccination_alerts"));
        assert!(json.contains("rabies"));
    }
}
