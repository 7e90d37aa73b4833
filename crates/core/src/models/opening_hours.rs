use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// Opening hours of a service on one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub service_id: Uuid,
    pub weekday: Weekday,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
    pub closed: bool,
}

/// Converts an ISO weekday number (Monday = 1 ... Sunday = 7).
pub fn weekday_from_iso(day: u32) -> BookingResult<Weekday> {
    match day {
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        7 => Ok(Weekday::Sun),
        other => Err(BookingError::Validation(format!(
            "Weekday must be between 1 and 7, got {}",
            other
        ))),
    }
}

/// Display language for weekday labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pl,
}

/// Weekday label for presentation only. Lookups always use [`Weekday`].
pub fn weekday_label(weekday: Weekday, locale: Locale) -> &'static str {
    match locale {
        Locale::En => match weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        },
        Locale::Pl => match weekday {
            Weekday::Mon => "Poniedziałek",
            Weekday::Tue => "Wtorek",
            Weekday::Wed => "Środa",
            Weekday::Thu => "Czwartek",
            Weekday::Fri => "Piątek",
            Weekday::Sat => "Sobota",
            Weekday::Sun => "Niedziela",
        },
    }
}

/// A validated week of opening hours: at most one entry per weekday, and
/// every open day closes after it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSchedule {
    days: Vec<OpeningHours>,
}

impl WeekSchedule {
    pub fn new(mut days: Vec<OpeningHours>) -> BookingResult<Self> {
        days.sort_by_key(|d| d.weekday.number_from_monday());

        for pair in days.windows(2) {
            if pair[0].weekday == pair[1].weekday {
                return Err(BookingError::Validation(format!(
                    "Opening hours for {} given more than once",
                    weekday_label(pair[0].weekday, Locale::En)
                )));
            }
        }

        if let Some(day) = days.iter().find(|d| !d.closed && d.opens_at >= d.closes_at) {
            return Err(BookingError::Validation(format!(
                "{} opens at {} but closes at {}",
                weekday_label(day.weekday, Locale::En),
                day.opens_at.format("%H:%M"),
                day.closes_at.format("%H:%M")
            )));
        }

        Ok(Self { days })
    }

    pub fn days(&self) -> &[OpeningHours] {
        &self.days
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHoursEntry {
    /// ISO weekday, Monday = 1.
    pub day: u32,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOpeningHoursRequest {
    pub days: Vec<OpeningHoursEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHoursDayResponse {
    pub day: u32,
    pub label: String,
    pub opens_at: String,
    pub closes_at: String,
    pub closed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOpeningHoursResponse {
    pub service_id: Uuid,
    pub service_name: String,
    pub days: Vec<OpeningHoursDayResponse>,
}

impl OpeningHoursDayResponse {
    pub fn new(hours: &OpeningHours, locale: Locale) -> Self {
        Self {
            day: hours.weekday.number_from_monday(),
            label: weekday_label(hours.weekday, locale).to_string(),
            opens_at: hours.opens_at.format("%H:%M").to_string(),
            closes_at: hours.closes_at.format("%H:%M").to_string(),
            closed: hours.closed,
        }
    }
}

impl UpdateOpeningHoursRequest {
    pub fn into_schedule(self, service_id: Uuid) -> BookingResult<WeekSchedule> {
        let days = self
            .days
            .into_iter()
            .map(|entry| {
                Ok(OpeningHours {
                    service_id,
                    weekday: weekday_from_iso(entry.day)?,
                    opens_at: entry.opens_at,
                    closes_at: entry.closes_at,
                    closed: entry.closed,
                })
            })
            .collect::<BookingResult<Vec<_>>>()?;

        WeekSchedule::new(days)
    }
}
