use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,
    pub service_id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
}

impl Offer {
    /// Length of one appointment. A non-positive duration would stall the
    /// slot grid, so it is rejected here rather than scanned.
    pub fn duration(&self) -> BookingResult<Duration> {
        if self.duration_minutes <= 0 {
            return Err(BookingError::Validation(format!(
                "Offer {} has a non-positive duration of {} minutes",
                self.id, self.duration_minutes
            )));
        }
        Ok(Duration::minutes(i64::from(self.duration_minutes)))
    }
}
