//! Queries, one module per table, as free functions over a pool.
//!
//! The traits below are the read side those functions offer to callers that
//! should not depend on Postgres directly. [`crate::store::PgStore`]
//! implements them, and [`crate::mock::repositories`] has mocks for tests.

pub mod booking;
pub mod employee;
pub mod offer;
pub mod opening_hours;
pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use eyre::Result;
use uuid::Uuid;

use crate::models::{DbBooking, DbEmployee, DbOffer, DbOpeningHours, DbService};

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn get_service_by_id(&self, id: Uuid) -> Result<Option<DbService>>;
}

#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn get_offer_by_id(&self, id: Uuid) -> Result<Option<DbOffer>>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn get_employee_by_id(&self, id: Uuid) -> Result<Option<DbEmployee>>;
}

#[async_trait]
pub trait OpeningHoursRepository: Send + Sync {
    /// `weekday` is ISO, Monday = 1.
    async fn get_opening_hours_for_weekday(
        &self,
        service_id: Uuid,
        weekday: i16,
    ) -> Result<Option<DbOpeningHours>>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get_employee_bookings_in_window(
        &self,
        employee_id: Uuid,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<DbBooking>>;

    async fn get_customer_bookings_in_window(
        &self,
        customer_id: Uuid,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<DbBooking>>;
}
