//! Derived-state computations over pet-care records.
//!
//! Everything in this module is a pure function of already-loaded entity
//! fields and an explicit "now" passed by the caller: age decomposition,
//! vaccination status, next-feeding projection, appointment status, and
//! health status. Nothing here touches storage or the ambient clock, which
//! keeps every classification idempotent and trivially testable.
//!
//! Day counts are whole-day differences between start-of-day values, so a
//! same-day target always yields 0 rather than a fractional day.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::model::{normalize_weekdays, Appointment, HealthRecord, MealSchedule, Vaccination};

/// Thresholds used by the status classifiers.
///
/// Defaults reproduce the built-in values: 30-day expiry warning, 14-day
/// due-soon window, 7-day upcoming window, 30-minute feeding-soon window, and
/// a 38.0..=39.2 degC normal temperature range (calibrated for a dog; no
/// per-species table is modeled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareThresholds {
    /// Days before expiry at which a vaccination counts as near-expiry.
    pub expiry_warning_days: i64,
    /// Days before the next dose at which a vaccination counts as due soon.
    pub due_soon_days: i64,
    /// Days ahead within which an appointment counts as upcoming.
    pub upcoming_days: i64,
    /// Minutes ahead within which a feeding counts as soon.
    pub feeding_soon_minutes: i64,
    /// Lower bound of the normal body temperature range in degrees Celsius.
    pub temperature_normal_min: f64,
    /// Upper bound of the normal body temperature range in degrees Celsius.
    pub temperature_normal_max: f64,
}

impl Default for CareThresholds {
    fn default() -> Self {
        Self {
            expiry_warning_days: 30,
            due_soon_days: 14,
            upcoming_days: 7,
            feeding_soon_minutes: 30,
            temperature_normal_min: 38.0,
            temperature_normal_max: 39.2,
        }
    }
}

/// Whole-day difference between two dates (`to - from`).
///
/// Both dates are already at day granularity, so this is the count of
/// calendar days between them; negative when `to` is before `from`.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Weekday number of a date in the 1=Sunday..7=Saturday convention.
#[must_use]
pub fn weekday_number(date: NaiveDate) -> u8 {
    u8::try_from(date.weekday().number_from_sunday()).unwrap_or(1)
}

// === Age ===

/// A pet's age decomposed into full years and remaining months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Age {
    /// Age computed from a known birthdate.
    Known {
        /// Elapsed full years.
        years: u32,
        /// Remaining months, always in 0..=11.
        months: u32,
    },
    /// No birthdate is recorded.
    Unknown,
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known { years: 0, months } => write!(f, "{months} months"),
            Self::Known { years, months } => write!(f, "{years} years {months} months"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Compute the age of a pet as of `today`.
///
/// Returns [`Age::Unknown`] when no birthdate is recorded. A birthdate in the
/// future clamps to zero years and months.
#[must_use]
pub fn age(birthdate: Option<NaiveDate>, today: NaiveDate) -> Age {
    let Some(birth) = birthdate else {
        return Age::Unknown;
    };

    let mut years = today.year() - birth.year();
    let mut months =
        i32::try_from(today.month()).unwrap_or(1) - i32::try_from(birth.month()).unwrap_or(1);
    if today.day() < birth.day() {
        months -= 1;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }
    if years < 0 {
        return Age::Known { years: 0, months: 0 };
    }

    Age::Known {
        years: u32::try_from(years).unwrap_or(0),
        months: u32::try_from(months).unwrap_or(0),
    }
}

// === Vaccination status ===

/// The protection status of a vaccination, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaccinationStatus {
    /// The expiry date has passed.
    Expired,
    /// The expiry date is within the warning window.
    NearExpiry,
    /// The next dose is within the due-soon window.
    DueSoon,
    /// An expiry date is set and none of the above matched.
    Valid,
    /// No expiry date is recorded.
    Unknown,
}

impl std::fmt::Display for VaccinationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expired => write!(f, "expired"),
            Self::NearExpiry => write!(f, "near-expiry"),
            Self::DueSoon => write!(f, "due-soon"),
            Self::Valid => write!(f, "valid"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify a vaccination as of `today`.
///
/// Evaluation order is fixed: expired, then near-expiry, then due-soon, then
/// valid, then unknown. An expiry exactly `expiry_warning_days` out is still
/// near-expiry; a same-day expiry counts as 0 days remaining, not expired.
#[must_use]
pub fn vaccination_status(
    vaccination: &Vaccination,
    today: NaiveDate,
    thresholds: &CareThresholds,
) -> VaccinationStatus {
    if let Some(expires) = vaccination.expires {
        let days = days_between(today, expires);
        if days < 0 {
            return VaccinationStatus::Expired;
        }
        if days <= thresholds.expiry_warning_days {
            return VaccinationStatus::NearExpiry;
        }
    }

    if let Some(next_due) = vaccination.next_due {
        let days = days_between(today, next_due);
        if (0..=thresholds.due_soon_days).contains(&days) {
            return VaccinationStatus::DueSoon;
        }
    }

    if vaccination.expires.is_some() {
        VaccinationStatus::Valid
    } else {
        VaccinationStatus::Unknown
    }
}

/// Human-readable description of a vaccination's status, embedding the
/// remaining day count where one applies.
#[must_use]
pub fn vaccination_status_description(
    vaccination: &Vaccination,
    today: NaiveDate,
    thresholds: &CareThresholds,
) -> String {
    let until_expiry = vaccination.expires.map(|d| days_between(today, d));
    let until_due = vaccination.next_due.map(|d| days_between(today, d));

    match vaccination_status(vaccination, today, thresholds) {
        VaccinationStatus::Expired => "expired".to_string(),
        VaccinationStatus::NearExpiry => match until_expiry {
            Some(days) => format!("expires in {days} days"),
            None => "expiry approaching".to_string(),
        },
        VaccinationStatus::DueSoon => match until_due {
            Some(days) => format!("next dose due in {days} days"),
            None => "next dose due soon".to_string(),
        },
        VaccinationStatus::Valid => match until_expiry {
            Some(days) => format!("valid for {days} more days"),
            None => "valid".to_string(),
        },
        VaccinationStatus::Unknown => "no expiry date recorded".to_string(),
    }
}

// === Next feeding projection ===

/// Project the next occurrence of a feeding schedule from `now`.
///
/// Returns `None` for inactive schedules and for schedules with an empty
/// active-weekday set. If today is an active weekday and today's serving time
/// has not passed yet, the result is today at that time. Otherwise the first
/// active weekday strictly after today's weekday number is used; when none
/// exists the projection wraps to the first active weekday of the next week
/// (day offset `7 - current + first`).
#[must_use]
pub fn next_feeding(schedule: &MealSchedule, now: NaiveDateTime) -> Option<NaiveDateTime> {
    if !schedule.active {
        return None;
    }
    // The scan below needs an ordered set, and the field can be assigned
    // directly, so normalize here rather than trusting the stored order.
    let days = normalize_weekdays(&schedule.weekdays);
    let first = *days.first()?;

    let current = weekday_number(now.date());
    let today_at = now.date().and_time(schedule.time);
    if today_at > now && days.contains(&current) {
        return Some(today_at);
    }

    let offset = match days.iter().find(|&&d| d > current) {
        Some(&next) => i64::from(next - current),
        None => i64::from(7 - current + first),
    };
    Some((now.date() + Duration::days(offset)).and_time(schedule.time))
}

/// Minutes until the next feeding, rounded down. `None` when the schedule has
/// no projectable next occurrence.
#[must_use]
pub fn minutes_until_feeding(schedule: &MealSchedule, now: NaiveDateTime) -> Option<i64> {
    next_feeding(schedule, now).map(|next| next.signed_duration_since(now).num_minutes())
}

/// Format a minute count as a feeding lead string: "45m later", "2h later",
/// or "2h30m later".
#[must_use]
pub fn format_feeding_lead(minutes: i64) -> String {
    if minutes < 60 {
        return format!("{minutes}m later");
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{hours}h later")
    } else {
        format!("{hours}h{rest}m later")
    }
}

/// The state of a single feeding slot relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealStatus {
    /// The schedule is switched off.
    Inactive,
    /// The next serving is within the feeding-soon window.
    Soon,
    /// The next serving is further out.
    Upcoming,
    /// No next serving can be projected.
    Past,
}

impl std::fmt::Display for MealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Soon => write!(f, "soon"),
            Self::Upcoming => write!(f, "upcoming"),
            Self::Past => write!(f, "past"),
        }
    }
}

/// Classify a feeding schedule relative to `now`.
#[must_use]
pub fn meal_status(
    schedule: &MealSchedule,
    now: NaiveDateTime,
    thresholds: &CareThresholds,
) -> MealStatus {
    if !schedule.active {
        return MealStatus::Inactive;
    }
    match minutes_until_feeding(schedule, now) {
        None => MealStatus::Past,
        Some(minutes) if minutes <= thresholds.feeding_soon_minutes => MealStatus::Soon,
        Some(_) => MealStatus::Upcoming,
    }
}

// === Appointment status ===

/// The state of an appointment, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// The completion flag is set.
    Completed,
    /// The appointment falls on the current calendar day.
    Today,
    /// The appointment instant has passed without completion.
    Past,
    /// Anything else.
    Upcoming,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Today => write!(f, "today"),
            Self::Past => write!(f, "past"),
            Self::Upcoming => write!(f, "upcoming"),
        }
    }
}

/// Classify an appointment as of `now`.
///
/// The completion flag wins over everything; a same-day appointment is
/// `Today` even when its time has already passed.
#[must_use]
pub fn appointment_status(appointment: &Appointment, now: NaiveDateTime) -> AppointmentStatus {
    if appointment.done {
        return AppointmentStatus::Completed;
    }
    if appointment.date == now.date() {
        return AppointmentStatus::Today;
    }
    if appointment.date.and_time(appointment.time) < now {
        return AppointmentStatus::Past;
    }
    AppointmentStatus::Upcoming
}

/// Whether the appointment is within the upcoming window (0..=7 days ahead by
/// default), regardless of completion.
#[must_use]
pub fn is_upcoming_week(
    appointment: &Appointment,
    today: NaiveDate,
    thresholds: &CareThresholds,
) -> bool {
    let days = days_between(today, appointment.date);
    (0..=thresholds.upcoming_days).contains(&days)
}

// === Health status ===

/// The assessed state of a health record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Weight or temperature recorded with nothing out of range.
    Good,
    /// Symptoms are present.
    Warning,
    /// Temperature outside the normal range.
    Alert,
    /// Nothing measurable recorded.
    Unknown,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Alert => write!(f, "alert"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify a health record.
///
/// Symptom text takes priority over the temperature check, so a record with
/// symptoms and a normal temperature is still a warning.
#[must_use]
pub fn health_status(record: &HealthRecord, thresholds: &CareThresholds) -> HealthStatus {
    if record.has_symptoms() {
        return HealthStatus::Warning;
    }

    if let Some(temp) = record.temperature_c {
        if temp < thresholds.temperature_normal_min || temp > thresholds.temperature_normal_max {
            return HealthStatus::Alert;
        }
    }

    if record.weight_kg.is_some() || record.temperature_c.is_some() {
        return HealthStatus::Good;
    }

    HealthStatus::Unknown
}

// === Relative dates ===

/// Render a date relative to `today`: "today", "yesterday", "N days ago" up
/// to a week back, otherwise the ISO date.
#[must_use]
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    match days_between(date, today) {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        n @ 2..=7 => format!("{n} days ago"),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}

/// Convenience: compose a date and a time of day into a `NaiveDateTime`.
#[must_use]
pub fn at(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppointmentKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn schedule(weekdays: &[u8], at: NaiveTime) -> MealSchedule {
        MealSchedule::new(1, "meal", at, 150.0, "dry food", weekdays)
    }

    fn vaccination(expires: Option<NaiveDate>, next_due: Option<NaiveDate>) -> Vaccination {
        let mut vax = Vaccination::new(1, "combo", date(2026, 1, 10));
        vax.expires = expires;
        vax.next_due = next_due;
        vax
    }

    // === age ===

    #[test]
    fn test_age_unknown_without_birthdate() {
        assert_eq!(age(None, date(2026, 8, 30)), Age::Unknown);
        assert_eq!(age(None, date(2026, 8, 30)).to_string(), "unknown");
    }

    #[test]
    fn test_age_years_and_months() {
        let a = age(Some(date(2023, 5, 12)), date(2026, 8, 30));
        assert_eq!(
            a,
            Age::Known {
                years: 3,
                months: 3
            }
        );
        assert_eq!(a.to_string(), "3 years 3 months");
    }

    #[test]
    fn test_age_under_one_year() {
        let a = age(Some(date(2026, 1, 15)), date(2026, 8, 30));
        assert_eq!(
            a,
            Age::Known {
                years: 0,
                months: 7
            }
        );
        assert_eq!(a.to_string(), "7 months");
    }

    #[test]
    fn test_age_day_not_yet_reached() {
        // Birthday on the 31st, today the 30th: the month hasn't completed.
        let a = age(Some(date(2025, 7, 31)), date(2026, 7, 30));
        assert_eq!(
            a,
            Age::Known {
                years: 0,
                months: 11
            }
        );
    }

    #[test]
    fn test_age_on_birthday() {
        let a = age(Some(date(2024, 8, 30)), date(2026, 8, 30));
        assert_eq!(
            a,
            Age::Known {
                years: 2,
                months: 0
            }
        );
    }

    #[test]
    fn test_age_months_always_in_range() {
        let birth = date(2020, 1, 1);
        let mut today = birth;
        for _ in 0..1200 {
            today = today.succ_opt().unwrap();
            match age(Some(birth), today) {
                Age::Known { months, .. } => assert!(months <= 11),
                Age::Unknown => panic!("birthdate was given"),
            }
        }
    }

    #[test]
    fn test_age_future_birthdate_clamps() {
        let a = age(Some(date(2027, 1, 1)), date(2026, 8, 30));
        assert_eq!(
            a,
            Age::Known {
                years: 0,
                months: 0
            }
        );
    }

    // === vaccination status ===

    #[test]
    fn test_vaccination_expired() {
        let vax = vaccination(Some(date(2026, 8, 29)), None);
        let status = vaccination_status(&vax, date(2026, 8, 30), &CareThresholds::default());
        assert_eq!(status, VaccinationStatus::Expired);
    }

    #[test]
    fn test_vaccination_same_day_expiry_is_near_not_expired() {
        let vax = vaccination(Some(date(2026, 8, 30)), None);
        let today = date(2026, 8, 30);
        let thresholds = CareThresholds::default();
        assert_eq!(
            vaccination_status(&vax, today, &thresholds),
            VaccinationStatus::NearExpiry
        );
        assert_eq!(
            vaccination_status_description(&vax, today, &thresholds),
            "expires in 0 days"
        );
    }

    #[test]
    fn test_vaccination_near_expiry_boundary() {
        let today = date(2026, 8, 1);
        let thresholds = CareThresholds::default();

        // Exactly 30 days out: near-expiry
        let vax = vaccination(Some(date(2026, 8, 31)), None);
        assert_eq!(
            vaccination_status(&vax, today, &thresholds),
            VaccinationStatus::NearExpiry
        );

        // 31 days out: valid
        let vax = vaccination(Some(date(2026, 9, 1)), None);
        assert_eq!(
            vaccination_status(&vax, today, &thresholds),
            VaccinationStatus::Valid
        );
    }

    #[test]
    fn test_vaccination_due_soon() {
        let today = date(2026, 8, 1);
        let vax = vaccination(Some(date(2027, 8, 1)), Some(date(2026, 8, 10)));
        let thresholds = CareThresholds::default();
        assert_eq!(
            vaccination_status(&vax, today, &thresholds),
            VaccinationStatus::DueSoon
        );
        assert_eq!(
            vaccination_status_description(&vax, today, &thresholds),
            "next dose due in 9 days"
        );
    }

    #[test]
    fn test_vaccination_due_soon_boundary() {
        let today = date(2026, 8, 1);
        let thresholds = CareThresholds::default();

        // 14 days out: due soon
        let vax = vaccination(None, Some(date(2026, 8, 15)));
        assert_eq!(
            vaccination_status(&vax, today, &thresholds),
            VaccinationStatus::DueSoon
        );

        // 15 days out with no expiry date: unknown
        let vax = vaccination(None, Some(date(2026, 8, 16)));
        assert_eq!(
            vaccination_status(&vax, today, &thresholds),
            VaccinationStatus::Unknown
        );
    }

    #[test]
    fn test_vaccination_expired_wins_over_due_soon() {
        // Expiry in the past AND next dose within 14 days: priority says expired.
        let today = date(2026, 8, 30);
        let vax = vaccination(Some(date(2026, 8, 1)), Some(date(2026, 9, 5)));
        assert_eq!(
            vaccination_status(&vax, today, &CareThresholds::default()),
            VaccinationStatus::Expired
        );
    }

    #[test]
    fn test_vaccination_unknown_without_expiry() {
        let vax = vaccination(None, None);
        let today = date(2026, 8, 30);
        let thresholds = CareThresholds::default();
        assert_eq!(
            vaccination_status(&vax, today, &thresholds),
            VaccinationStatus::Unknown
        );
        assert_eq!(
            vaccination_status_description(&vax, today, &thresholds),
            "no expiry date recorded"
        );
    }

    #[test]
    fn test_vaccination_valid_description_has_day_count() {
        let today = date(2026, 8, 1);
        let vax = vaccination(Some(date(2026, 12, 1)), None);
        let desc = vaccination_status_description(&vax, today, &CareThresholds::default());
        assert_eq!(desc, "valid for 122 more days");
    }

    #[test]
    fn test_vaccination_idempotent() {
        let today = date(2026, 8, 30);
        let vax = vaccination(Some(date(2026, 9, 10)), Some(date(2026, 9, 5)));
        let thresholds = CareThresholds::default();
        let first = vaccination_status(&vax, today, &thresholds);
        let second = vaccination_status(&vax, today, &thresholds);
        assert_eq!(first, second);
    }

    // === next feeding ===

    // 2026-08-26 is a Wednesday (weekday number 4).
    const WEDNESDAY: (i32, u32, u32) = (2026, 8, 26);

    #[test]
    fn test_next_feeding_inactive() {
        let mut s = schedule(&[1, 2, 3, 4, 5, 6, 7], time(8, 0));
        s.active = false;
        let now = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2).and_time(time(7, 0));
        assert_eq!(next_feeding(&s, now), None);
        assert_eq!(minutes_until_feeding(&s, now), None);
    }

    #[test]
    fn test_next_feeding_empty_weekdays() {
        let s = schedule(&[], time(8, 0));
        let now = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2).and_time(time(7, 0));
        assert_eq!(next_feeding(&s, now), None);
    }

    #[test]
    fn test_next_feeding_today_not_yet_passed() {
        // Schedule at 20:00, evaluated the same weekday at 10:00: today at 20:00.
        let s = schedule(&[4], time(20, 0));
        let today = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2);
        let now = today.and_time(time(10, 0));
        assert_eq!(next_feeding(&s, now), Some(today.and_time(time(20, 0))));
    }

    #[test]
    fn test_next_feeding_wraps_to_next_week() {
        // Active Mon (2) and Wed (4) at 08:00, evaluated Wednesday 09:00:
        // today's slot has passed and no later weekday is active, so the
        // projection wraps to Monday next week (offset 7 - 4 + 2 = 5 days).
        let s = schedule(&[2, 4], time(8, 0));
        let wednesday = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2);
        let now = wednesday.and_time(time(9, 0));

        let next = next_feeding(&s, now).unwrap();
        let monday = date(2026, 8, 31);
        assert_eq!(weekday_number(monday), 2);
        assert_eq!(next, monday.and_time(time(8, 0)));
    }

    #[test]
    fn test_next_feeding_later_weekday_same_week() {
        // Active Mon (2) and Fri (6), evaluated Wednesday 09:00: Friday.
        let s = schedule(&[2, 6], time(8, 0));
        let now = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2).and_time(time(9, 0));
        assert_eq!(
            next_feeding(&s, now),
            Some(date(2026, 8, 28).and_time(time(8, 0)))
        );
    }

    #[test]
    fn test_next_feeding_saturday_wraps_to_sunday() {
        // Saturday is weekday 7; a Sun+Sat schedule evaluated Saturday evening
        // must land on Sunday tomorrow (offset 7 - 7 + 1 = 1).
        let saturday = date(2026, 8, 29);
        assert_eq!(weekday_number(saturday), 7);

        let s = schedule(&[1, 7], time(18, 0));
        let now = saturday.and_time(time(19, 0));
        assert_eq!(
            next_feeding(&s, now),
            Some(date(2026, 8, 30).and_time(time(18, 0)))
        );
    }

    #[test]
    fn test_next_feeding_unsorted_weekday_field() {
        // The weekdays field is public and can be assigned without going
        // through the normalizing constructor; the projection must not
        // depend on the stored order.
        let mut s = schedule(&[2, 4], time(8, 0));
        s.weekdays = vec![4, 2];
        let now = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2).and_time(time(9, 0));
        // Wrap on Wednesday evaluation must still anchor on Monday (2), not
        // on whatever happens to sit first in the vec.
        assert_eq!(
            next_feeding(&s, now),
            Some(date(2026, 8, 31).and_time(time(8, 0)))
        );

        s.weekdays = vec![6, 9, 2];
        assert_eq!(
            next_feeding(&s, now),
            Some(date(2026, 8, 28).and_time(time(8, 0)))
        );
    }

    #[test]
    fn test_next_feeding_today_inactive_weekday_skipped() {
        // Today (Wed) is not in the set, so 20:00 today is not returned even
        // though it hasn't passed yet.
        let s = schedule(&[6], time(20, 0));
        let now = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2).and_time(time(10, 0));
        assert_eq!(
            next_feeding(&s, now),
            Some(date(2026, 8, 28).and_time(time(20, 0)))
        );
    }

    #[test]
    fn test_minutes_until_feeding_floors() {
        let s = schedule(&[4], time(20, 0));
        let today = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2);
        let now = today
            .and_time(NaiveTime::from_hms_opt(19, 29, 30).unwrap());
        assert_eq!(minutes_until_feeding(&s, now), Some(30));
    }

    #[test]
    fn test_format_feeding_lead() {
        assert_eq!(format_feeding_lead(45), "45m later");
        assert_eq!(format_feeding_lead(60), "1h later");
        assert_eq!(format_feeding_lead(150), "2h30m later");
        assert_eq!(format_feeding_lead(0), "0m later");
    }

    #[test]
    fn test_meal_status() {
        let thresholds = CareThresholds::default();
        let today = date(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2);

        let s = schedule(&[4], time(20, 0));
        assert_eq!(
            meal_status(&s, today.and_time(time(19, 45)), &thresholds),
            MealStatus::Soon
        );
        assert_eq!(
            meal_status(&s, today.and_time(time(10, 0)), &thresholds),
            MealStatus::Upcoming
        );

        let mut inactive = schedule(&[4], time(20, 0));
        inactive.active = false;
        assert_eq!(
            meal_status(&inactive, today.and_time(time(10, 0)), &thresholds),
            MealStatus::Inactive
        );

        let empty = schedule(&[], time(20, 0));
        assert_eq!(
            meal_status(&empty, today.and_time(time(10, 0)), &thresholds),
            MealStatus::Past
        );
    }

    // === appointment status ===

    fn appointment(d: NaiveDate, t: NaiveTime, done: bool) -> Appointment {
        let mut appt = Appointment::new(1, "checkup", AppointmentKind::Vet, d, t);
        appt.done = done;
        appt
    }

    #[test]
    fn test_appointment_completed_wins() {
        let now = date(2026, 8, 30).and_time(time(12, 0));

        // Past and completed
        let past = appointment(date(2026, 8, 1), time(10, 0), true);
        assert_eq!(appointment_status(&past, now), AppointmentStatus::Completed);

        // Future and completed
        let future = appointment(date(2026, 9, 15), time(10, 0), true);
        assert_eq!(
            appointment_status(&future, now),
            AppointmentStatus::Completed
        );
    }

    #[test]
    fn test_appointment_today() {
        let now = date(2026, 8, 30).and_time(time(12, 0));

        // Same day, time already passed: still today
        let earlier = appointment(date(2026, 8, 30), time(9, 0), false);
        assert_eq!(appointment_status(&earlier, now), AppointmentStatus::Today);

        let later = appointment(date(2026, 8, 30), time(16, 0), false);
        assert_eq!(appointment_status(&later, now), AppointmentStatus::Today);
    }

    #[test]
    fn test_appointment_past_and_upcoming() {
        let now = date(2026, 8, 30).and_time(time(12, 0));

        let past = appointment(date(2026, 8, 25), time(10, 0), false);
        assert_eq!(appointment_status(&past, now), AppointmentStatus::Past);

        let upcoming = appointment(date(2026, 9, 10), time(10, 0), false);
        assert_eq!(
            appointment_status(&upcoming, now),
            AppointmentStatus::Upcoming
        );
    }

    #[test]
    fn test_appointment_upcoming_week_window() {
        let today = date(2026, 8, 30);
        let thresholds = CareThresholds::default();

        let in_window = appointment(date(2026, 9, 6), time(10, 0), false);
        assert!(is_upcoming_week(&in_window, today, &thresholds));

        let out_of_window = appointment(date(2026, 9, 7), time(10, 0), false);
        assert!(!is_upcoming_week(&out_of_window, today, &thresholds));

        let past = appointment(date(2026, 8, 29), time(10, 0), false);
        assert!(!is_upcoming_week(&past, today, &thresholds));
    }

    // === health status ===

    fn record(
        weight: Option<f64>,
        temperature: Option<f64>,
        symptoms: Option<&str>,
    ) -> HealthRecord {
        let mut r = HealthRecord::new(1, date(2026, 8, 30));
        r.weight_kg = weight;
        r.temperature_c = temperature;
        r.symptoms = symptoms.map(str::to_string);
        r
    }

    #[test]
    fn test_health_symptoms_override_normal_temperature() {
        let r = record(Some(8.5), Some(38.5), Some("lethargy"));
        assert_eq!(
            health_status(&r, &CareThresholds::default()),
            HealthStatus::Warning
        );
    }

    #[test]
    fn test_health_temperature_out_of_range() {
        let thresholds = CareThresholds::default();
        let high = record(None, Some(39.5), None);
        assert_eq!(health_status(&high, &thresholds), HealthStatus::Alert);

        let low = record(None, Some(37.5), None);
        assert_eq!(health_status(&low, &thresholds), HealthStatus::Alert);
    }

    #[test]
    fn test_health_temperature_range_inclusive() {
        let thresholds = CareThresholds::default();
        let min = record(None, Some(38.0), None);
        assert_eq!(health_status(&min, &thresholds), HealthStatus::Good);

        let max = record(None, Some(39.2), None);
        assert_eq!(health_status(&max, &thresholds), HealthStatus::Good);
    }

    #[test]
    fn test_health_good_with_weight_only() {
        let r = record(Some(8.5), None, None);
        assert_eq!(
            health_status(&r, &CareThresholds::default()),
            HealthStatus::Good
        );
    }

    #[test]
    fn test_health_unknown_with_nothing_recorded() {
        let r = record(None, None, None);
        assert_eq!(
            health_status(&r, &CareThresholds::default()),
            HealthStatus::Unknown
        );
    }

    #[test]
    fn test_health_empty_symptom_string_is_not_a_warning() {
        let r = record(None, Some(38.5), Some(""));
        assert_eq!(
            health_status(&r, &CareThresholds::default()),
            HealthStatus::Good
        );
    }

    // === misc ===

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2026, 8, 1), date(2026, 8, 31)), 30);
        assert_eq!(days_between(date(2026, 8, 31), date(2026, 8, 1)), -30);
        assert_eq!(days_between(date(2026, 8, 1), date(2026, 8, 1)), 0);
    }

    #[test]
    fn test_weekday_number_convention() {
        // 2026-08-30 is a Sunday.
        assert_eq!(weekday_number(date(2026, 8, 30)), 1);
        assert_eq!(weekday_number(date(2026, 8, 31)), 2);
        assert_eq!(weekday_number(date(2026, 8, 29)), 7);
    }

    #[test]
    fn test_relative_day() {
        let today = date(2026, 8, 30);
        assert_eq!(relative_day(today, today), "today");
        assert_eq!(relative_day(date(2026, 8, 29), today), "yesterday");
        assert_eq!(relative_day(date(2026, 8, 25), today), "5 days ago");
        assert_eq!(relative_day(date(2026, 8, 23), today), "7 days ago");
        assert_eq!(relative_day(date(2026, 8, 22), today), "2026-08-22");
        // Future dates fall through to the ISO form too
        assert_eq!(relative_day(date(2026, 9, 2), today), "2026-09-02");
    }

    #[test]
    fn test_thresholds_default() {
        let t = CareThresholds::default();
        assert_eq!(t.expiry_warning_days, 30);
        assert_eq!(t.due_soon_days, 14);
        assert_eq!(t.upcoming_days, 7);
        assert_eq!(t.feeding_soon_minutes, 30);
        assert!((t.temperature_normal_min - 38.0).abs() < f64::EPSILON);
        assert!((t.temperature_normal_max - 39.2).abs() < f64::EPSILON);
    }
}
