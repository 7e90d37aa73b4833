#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use slotbook_core::{
    BookingResult, ConflictingBookingsLookup, CustomerId, OpeningHoursLookup, UserBookingsLookup,
    models::{
        employee::Employee, offer::Offer, opening_hours::OpeningHours, service::Service,
        time_range::TimeRange,
    },
};
use uuid::Uuid;

/// Monday.
pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
}

pub fn at(h: u32, m: u32) -> NaiveDateTime {
    day().and_hms_opt(h, m, 0).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn range(from: (u32, u32), to: (u32, u32)) -> TimeRange {
    TimeRange::new(at(from.0, from.1), at(to.0, to.1))
}

pub struct Fixture {
    pub service: Service,
    pub offer: Offer,
    pub employee: Employee,
    pub customer: CustomerId,
}

impl Fixture {
    pub fn new(duration_minutes: i32) -> Self {
        let service = Service {
            id: Uuid::new_v4(),
            name: "Studio".to_string(),
            created_at: Utc::now(),
        };
        let offer = Offer {
            id: Uuid::new_v4(),
            service_id: service.id,
            name: "Massage".to_string(),
            duration_minutes,
            price_cents: 12000,
        };
        let employee = Employee {
            id: Uuid::new_v4(),
            service_id: service.id,
            name: "Ola".to_string(),
        };
        Self {
            service,
            offer,
            employee,
            customer: Uuid::new_v4(),
        }
    }
}

/// In-memory opening hours and bookings.
#[derive(Default)]
pub struct Calendar {
    pub hours: Vec<OpeningHours>,
    pub employee_bookings: Vec<(Uuid, TimeRange)>,
    pub customer_bookings: Vec<(CustomerId, TimeRange)>,
}

impl Calendar {
    pub fn open(mut self, service_id: Uuid, weekday: Weekday, opens: NaiveTime, closes: NaiveTime) -> Self {
        self.hours.push(OpeningHours {
            service_id,
            weekday,
            opens_at: opens,
            closes_at: closes,
            closed: false,
        });
        self
    }

    pub fn closed(mut self, service_id: Uuid, weekday: Weekday) -> Self {
        self.hours.push(OpeningHours {
            service_id,
            weekday,
            opens_at: time(9, 0),
            closes_at: time(17, 0),
            closed: true,
        });
        self
    }

    pub fn employee_booking(mut self, employee_id: Uuid, time: TimeRange) -> Self {
        self.employee_bookings.push((employee_id, time));
        self
    }

    pub fn customer_booking(mut self, customer_id: CustomerId, time: TimeRange) -> Self {
        self.customer_bookings.push((customer_id, time));
        self
    }
}

#[async_trait]
impl OpeningHoursLookup for Calendar {
    async fn for_weekday(
        &self,
        service_id: Uuid,
        weekday: Weekday,
    ) -> BookingResult<Option<OpeningHours>> {
        Ok(self
            .hours
            .iter()
            .find(|h| h.service_id == service_id && h.weekday == weekday)
            .cloned())
    }
}

#[async_trait]
impl ConflictingBookingsLookup for Calendar {
    async fn employee_bookings(
        &self,
        employee_id: Uuid,
        window: TimeRange,
    ) -> BookingResult<Vec<TimeRange>> {
        Ok(self
            .employee_bookings
            .iter()
            .filter(|(id, time)| *id == employee_id && time.overlaps(&window))
            .map(|(_, time)| *time)
            .collect())
    }
}

#[async_trait]
impl UserBookingsLookup for Calendar {
    async fn customer_bookings(
        &self,
        customer_id: CustomerId,
        window: TimeRange,
    ) -> BookingResult<Vec<TimeRange>> {
        Ok(self
            .customer_bookings
            .iter()
            .filter(|(id, time)| *id == customer_id && time.overlaps(&window))
            .map(|(_, time)| *time)
            .collect())
    }
}
