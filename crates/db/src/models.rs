use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use eyre::Result;
use serde::{Deserialize, Serialize};
use slotbook_core::models::{
    booking::BookingResponse,
    employee::Employee,
    offer::Offer,
    opening_hours::{OpeningHours, weekday_from_iso},
    service::Service,
    time_range::TimeRange,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOpeningHours {
    pub service_id: Uuid,
    /// ISO weekday, Monday = 1.
    pub weekday: i16,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
    pub closed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOffer {
    pub id: Uuid,
    pub service_id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: Uuid,
    pub service_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub service_id: Uuid,
    pub offer_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub customer_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbOpeningHours> for OpeningHours {
    type Error = eyre::Report;

    fn try_from(row: DbOpeningHours) -> Result<Self> {
        let weekday = u32::try_from(row.weekday)
            .ok()
            .and_then(|day| weekday_from_iso(day).ok())
            .ok_or_else(|| eyre::eyre!("Stored weekday {} is out of range", row.weekday))?;

        Ok(Self {
            service_id: row.service_id,
            weekday,
            opens_at: row.opens_at,
            closes_at: row.closes_at,
            closed: row.closed,
        })
    }
}

impl From<DbOffer> for Offer {
    fn from(row: DbOffer) -> Self {
        Self {
            id: row.id,
            service_id: row.service_id,
            name: row.name,
            duration_minutes: row.duration_minutes,
            price_cents: row.price_cents,
        }
    }
}

impl From<DbEmployee> for Employee {
    fn from(row: DbEmployee) -> Self {
        Self {
            id: row.id,
            service_id: row.service_id,
            name: row.name,
        }
    }
}

impl DbBooking {
    pub fn time(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

impl From<DbBooking> for BookingResponse {
    fn from(row: DbBooking) -> Self {
        Self {
            id: row.id,
            service_id: row.service_id,
            offer_id: row.offer_id,
            employee_id: row.employee_id,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}
