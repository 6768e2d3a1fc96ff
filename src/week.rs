//! Calendrier : une semaine commence toujours un lundi.

use crate::model::Day;
use chrono::{Datelike, Duration, NaiveDate};

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Lundi de la semaine qui contient `date` (le dimanche clôt la semaine).
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn week_end(start: NaiveDate) -> NaiveDate {
    start + Duration::days(6)
}

pub fn day_date(start: NaiveDate, day: Day) -> NaiveDate {
    start + Duration::days(day.index() as i64)
}

/// Lundi de la semaine suivante.
pub fn next_week(start: NaiveDate) -> NaiveDate {
    start + Duration::days(7)
}

/// Format long : `26 août 2024`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}
