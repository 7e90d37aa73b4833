//! # Slot Availability
//!
//! Computes the bookable start times of one offer with one employee on one
//! calendar day.
//!
//! ## Algorithm
//!
//! 1. Look up the service's opening hours for the day's weekday. A missing or
//!    closed day yields no slots.
//! 2. Turn the opening hours into a window `[opens_at, closes_at)` on that date.
//!    An empty window (closing at or before opening) also yields no slots.
//! 3. Collect the employee's bookings and, when a customer is known, the
//!    customer's own bookings that overlap the window.
//! 4. Walk a grid from the opening time in steps of the offer's duration.
//!    A grid point is a slot when the appointment starting there ends no later
//!    than closing time and overlaps none of the collected bookings.
//!
//! The grid restarts at opening time on every call, so slots never overlap
//! each other and are returned in chronological order.

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use tracing::debug;
use uuid::Uuid;

use crate::{
    CustomerId,
    errors::BookingResult,
    models::{
        employee::Employee, offer::Offer, opening_hours::OpeningHours, service::Service,
        time_range::TimeRange,
    },
};

/// Opening hours of a service on a weekday, or `None` when nothing is stored.
#[async_trait]
pub trait OpeningHoursLookup: Send + Sync {
    async fn for_weekday(
        &self,
        service_id: Uuid,
        weekday: Weekday,
    ) -> BookingResult<Option<OpeningHours>>;
}

/// Bookings of an employee that overlap a window.
#[async_trait]
pub trait ConflictingBookingsLookup: Send + Sync {
    async fn employee_bookings(
        &self,
        employee_id: Uuid,
        window: TimeRange,
    ) -> BookingResult<Vec<TimeRange>>;
}

/// Bookings a customer already holds, at any service, that overlap a window.
#[async_trait]
pub trait UserBookingsLookup: Send + Sync {
    async fn customer_bookings(
        &self,
        customer_id: CustomerId,
        window: TimeRange,
    ) -> BookingResult<Vec<TimeRange>>;
}

/// The customer on whose behalf slots are computed.
pub trait CurrentUserProvider: Send + Sync {
    fn current(&self) -> Option<CustomerId>;
}

impl CurrentUserProvider for Option<CustomerId> {
    fn current(&self) -> Option<CustomerId> {
        *self
    }
}

pub struct AvailabilitySlotComputer<'a> {
    opening_hours: &'a dyn OpeningHoursLookup,
    employee_bookings: &'a dyn ConflictingBookingsLookup,
    customer_bookings: &'a dyn UserBookingsLookup,
    current_user: &'a dyn CurrentUserProvider,
}

impl<'a> AvailabilitySlotComputer<'a> {
    pub fn new(
        opening_hours: &'a dyn OpeningHoursLookup,
        employee_bookings: &'a dyn ConflictingBookingsLookup,
        customer_bookings: &'a dyn UserBookingsLookup,
        current_user: &'a dyn CurrentUserProvider,
    ) -> Self {
        Self {
            opening_hours,
            employee_bookings,
            customer_bookings,
            current_user,
        }
    }

    /// Slots for the current customer. Without a current customer there are
    /// no slots, since the customer's own bookings cannot be excluded.
    pub async fn compute_slots(
        &self,
        service: &Service,
        offer: &Offer,
        employee: &Employee,
        date: NaiveDate,
    ) -> BookingResult<Vec<NaiveDateTime>> {
        let step = offer.duration()?;

        let Some(window) = self.opening_window(service, date).await? else {
            return Ok(Vec::new());
        };

        let Some(customer_id) = self.current_user.current() else {
            debug!(service_id = %service.id, "No current customer, returning no slots");
            return Ok(Vec::new());
        };

        self.scan(window, step, employee, Some(customer_id)).await
    }

    /// Slots excluding the employee's bookings and, if given, the bookings of
    /// `exclude_bookings_for`. Does not consult the current user.
    pub async fn compute_slots_for(
        &self,
        service: &Service,
        offer: &Offer,
        employee: &Employee,
        date: NaiveDate,
        exclude_bookings_for: Option<CustomerId>,
    ) -> BookingResult<Vec<NaiveDateTime>> {
        let step = offer.duration()?;

        match self.opening_window(service, date).await? {
            Some(window) => self.scan(window, step, employee, exclude_bookings_for).await,
            None => Ok(Vec::new()),
        }
    }

    async fn opening_window(
        &self,
        service: &Service,
        date: NaiveDate,
    ) -> BookingResult<Option<TimeRange>> {
        let weekday = date.weekday();
        let hours = self.opening_hours.for_weekday(service.id, weekday).await?;

        let window = match hours {
            Some(hours) if !hours.closed => TimeRange::new(
                date.and_time(hours.opens_at),
                date.and_time(hours.closes_at),
            ),
            _ => {
                debug!(service_id = %service.id, %date, "Service closed");
                return Ok(None);
            }
        };

        if window.is_empty() {
            debug!(service_id = %service.id, %date, "Opening hours leave no time");
            return Ok(None);
        }

        Ok(Some(window))
    }

    async fn scan(
        &self,
        window: TimeRange,
        step: Duration,
        employee: &Employee,
        customer_id: Option<CustomerId>,
    ) -> BookingResult<Vec<NaiveDateTime>> {
        let mut busy = self
            .employee_bookings
            .employee_bookings(employee.id, window)
            .await?;

        if let Some(customer_id) = customer_id {
            busy.extend(
                self.customer_bookings
                    .customer_bookings(customer_id, window)
                    .await?,
            );
        }

        let slots = scan_slots(window, step, &busy);
        debug!(
            employee_id = %employee.id,
            busy = busy.len(),
            slots = slots.len(),
            "Computed slots"
        );

        Ok(slots)
    }
}

/// Start times on a grid of `step` from `window.start` whose appointment fits
/// in the window and overlaps nothing in `busy`. A non-positive step yields
/// no slots.
pub fn scan_slots(window: TimeRange, step: Duration, busy: &[TimeRange]) -> Vec<NaiveDateTime> {
    let mut slots = Vec::new();
    if step <= Duration::zero() {
        return slots;
    }

    let mut current = window.start;
    while current < window.end {
        let candidate = TimeRange::starting_at(current, step);

        if window.contains(&candidate) && !busy.iter().any(|b| b.overlaps(&candidate)) {
            slots.push(current);
        }

        current += step;
    }

    slots
}
