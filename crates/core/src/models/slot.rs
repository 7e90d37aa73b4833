use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsQuery {
    pub offer_id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
}

/// One bookable start time as shown to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResponse {
    /// `HH:MM`
    pub time: String,
    pub datetime: NaiveDateTime,
}

impl From<NaiveDateTime> for SlotResponse {
    fn from(start: NaiveDateTime) -> Self {
        Self {
            time: start.format("%H:%M").to_string(),
            datetime: start,
        }
    }
}
