use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    CustomerId,
    errors::{BookingError, BookingResult},
    models::{offer::Offer, time_range::TimeRange},
};

/// The parts of a booking chosen by the customer. The end time is not part
/// of it: [`Booking::new`] derives it from the offer.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub service_id: Uuid,
    pub offer_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub customer_id: CustomerId,
    pub start_time: NaiveDateTime,
}

/// A booking whose end time always equals its start time plus the offer's
/// duration. Times are only readable; a different start or offer means a new
/// `Booking`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id: Uuid,
    service_id: Uuid,
    offer_id: Uuid,
    employee_id: Option<Uuid>,
    customer_id: CustomerId,
    time: TimeRange,
    created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(booking: NewBooking, offer: &Offer) -> BookingResult<Self> {
        if booking.offer_id != offer.id {
            return Err(BookingError::Validation(format!(
                "Booking refers to offer {} but was priced with offer {}",
                booking.offer_id, offer.id
            )));
        }
        let duration = offer.duration()?;

        Ok(Self {
            id: Uuid::new_v4(),
            service_id: booking.service_id,
            offer_id: booking.offer_id,
            employee_id: booking.employee_id,
            customer_id: booking.customer_id,
            time: TimeRange::starting_at(booking.start_time, duration),
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn service_id(&self) -> Uuid {
        self.service_id
    }

    pub fn offer_id(&self) -> Uuid {
        self.offer_id
    }

    pub fn employee_id(&self) -> Option<Uuid> {
        self.employee_id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.time.start
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.time.end
    }

    pub fn time(&self) -> TimeRange {
        self.time
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub offer_id: Uuid,
    pub employee_id: Uuid,
    pub start_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub offer_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id(),
            service_id: booking.service_id(),
            offer_id: booking.offer_id(),
            employee_id: booking.employee_id(),
            start_time: booking.start_time(),
            end_time: booking.end_time(),
            created_at: booking.created_at(),
        }
    }
}
