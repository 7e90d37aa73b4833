//! Postgres-backed lookups for the slot computer.
//!
//! The lookup logic is written against the repository traits so it can be
//! exercised with the mocks in [`crate::mock::repositories`].

use async_trait::async_trait;
use chrono::{NaiveDateTime, Weekday};
use eyre::Result;
use slotbook_core::{
    BookingResult, ConflictingBookingsLookup, CustomerId, OpeningHoursLookup, UserBookingsLookup,
    models::{opening_hours::OpeningHours, time_range::TimeRange},
};
use uuid::Uuid;

use crate::{
    DbPool,
    models::{DbBooking, DbEmployee, DbOffer, DbOpeningHours, DbService},
    repositories::{
        self, BookingRepository, EmployeeRepository, OfferRepository, OpeningHoursRepository,
        ServiceRepository,
    },
};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Opening hours of `service_id` on `weekday`. A stored weekday outside
/// 1..=7 is reported as a database error.
pub async fn opening_hours_for_weekday<R>(
    repo: &R,
    service_id: Uuid,
    weekday: Weekday,
) -> BookingResult<Option<OpeningHours>>
where
    R: OpeningHoursRepository + ?Sized,
{
    let row = repo
        .get_opening_hours_for_weekday(service_id, weekday.number_from_monday() as i16)
        .await?;

    Ok(row.map(OpeningHours::try_from).transpose()?)
}

pub async fn employee_booking_ranges<R>(
    repo: &R,
    employee_id: Uuid,
    window: TimeRange,
) -> BookingResult<Vec<TimeRange>>
where
    R: BookingRepository + ?Sized,
{
    let rows = repo
        .get_employee_bookings_in_window(employee_id, window.start, window.end)
        .await?;

    Ok(rows.iter().map(DbBooking::time).collect())
}

pub async fn customer_booking_ranges<R>(
    repo: &R,
    customer_id: CustomerId,
    window: TimeRange,
) -> BookingResult<Vec<TimeRange>>
where
    R: BookingRepository + ?Sized,
{
    let rows = repo
        .get_customer_bookings_in_window(customer_id, window.start, window.end)
        .await?;

    Ok(rows.iter().map(DbBooking::time).collect())
}

#[async_trait]
impl ServiceRepository for PgStore {
    async fn get_service_by_id(&self, id: Uuid) -> Result<Option<DbService>> {
        repositories::service::get_service_by_id(&self.pool, id).await
    }
}

#[async_trait]
impl OfferRepository for PgStore {
    async fn get_offer_by_id(&self, id: Uuid) -> Result<Option<DbOffer>> {
        repositories::offer::get_offer_by_id(&self.pool, id).await
    }
}

#[async_trait]
impl EmployeeRepository for PgStore {
    async fn get_employee_by_id(&self, id: Uuid) -> Result<Option<DbEmployee>> {
        repositories::employee::get_employee_by_id(&self.pool, id).await
    }
}

#[async_trait]
impl OpeningHoursRepository for PgStore {
    async fn get_opening_hours_for_weekday(
        &self,
        service_id: Uuid,
        weekday: i16,
    ) -> Result<Option<DbOpeningHours>> {
        repositories::opening_hours::get_opening_hours_for_weekday(&self.pool, service_id, weekday)
            .await
    }
}

#[async_trait]
impl BookingRepository for PgStore {
    async fn get_employee_bookings_in_window(
        &self,
        employee_id: Uuid,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<DbBooking>> {
        repositories::booking::get_employee_bookings_in_window(
            &self.pool,
            employee_id,
            window_start,
            window_end,
        )
        .await
    }

    async fn get_customer_bookings_in_window(
        &self,
        customer_id: Uuid,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<DbBooking>> {
        repositories::booking::get_customer_bookings_in_window(
            &self.pool,
            customer_id,
            window_start,
            window_end,
        )
        .await
    }
}

#[async_trait]
impl OpeningHoursLookup for PgStore {
    async fn for_weekday(
        &self,
        service_id: Uuid,
        weekday: Weekday,
    ) -> BookingResult<Option<OpeningHours>> {
        opening_hours_for_weekday(self, service_id, weekday).await
    }
}

#[async_trait]
impl ConflictingBookingsLookup for PgStore {
    async fn employee_bookings(
        &self,
        employee_id: Uuid,
        window: TimeRange,
    ) -> BookingResult<Vec<TimeRange>> {
        employee_booking_ranges(self, employee_id, window).await
    }
}

#[async_trait]
impl UserBookingsLookup for PgStore {
    async fn customer_bookings(
        &self,
        customer_id: CustomerId,
        window: TimeRange,
    ) -> BookingResult<Vec<TimeRange>> {
        customer_booking_ranges(self, customer_id, window).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::repositories::{MockBookingRepo, MockOpeningHoursRepo};
    use chrono::{NaiveDate, NaiveTime, Utc};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use slotbook_core::BookingError;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn hours_row(service_id: Uuid, weekday: i16) -> DbOpeningHours {
        DbOpeningHours {
            service_id,
            weekday,
            opens_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            closes_at: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            closed: false,
        }
    }

    fn booking_row(start: NaiveDateTime, end: NaiveDateTime) -> DbBooking {
        DbBooking {
            id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            offer_id: Uuid::new_v4(),
            employee_id: Some(Uuid::new_v4()),
            customer_id: Uuid::new_v4(),
            start_time: start,
            end_time: end,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case::monday(Weekday::Mon, 1)]
    #[case::thursday(Weekday::Thu, 4)]
    #[case::sunday(Weekday::Sun, 7)]
    #[tokio::test]
    async fn test_opening_hours_queried_by_iso_weekday(#[case] weekday: Weekday, #[case] iso: i16) {
        let service_id = Uuid::new_v4();
        let mut repo = MockOpeningHoursRepo::new();
        repo.expect_get_opening_hours_for_weekday()
            .with(eq(service_id), eq(iso))
            .times(1)
            .returning(move |service_id, day| Ok(Some(hours_row(service_id, day))));

        let hours = opening_hours_for_weekday(&repo, service_id, weekday)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(hours.weekday, weekday);
        assert_eq!(hours.service_id, service_id);
    }

    #[tokio::test]
    async fn test_missing_opening_hours() {
        let mut repo = MockOpeningHoursRepo::new();
        repo.expect_get_opening_hours_for_weekday()
            .returning(|_, _| Ok(None));

        let hours = opening_hours_for_weekday(&repo, Uuid::new_v4(), Weekday::Sat)
            .await
            .unwrap();

        assert!(hours.is_none());
    }

    #[tokio::test]
    async fn test_stored_weekday_out_of_range_is_database_error() {
        let mut repo = MockOpeningHoursRepo::new();
        repo.expect_get_opening_hours_for_weekday()
            .returning(|service_id, _| Ok(Some(hours_row(service_id, 9))));

        let result = opening_hours_for_weekday(&repo, Uuid::new_v4(), Weekday::Mon).await;

        assert!(matches!(result, Err(BookingError::Database(_))));
    }

    #[tokio::test]
    async fn test_employee_bookings_map_to_ranges() {
        let employee_id = Uuid::new_v4();
        let window = TimeRange::new(at(9, 0), at(17, 0));
        let mut repo = MockBookingRepo::new();
        repo.expect_get_employee_bookings_in_window()
            .with(eq(employee_id), eq(at(9, 0)), eq(at(17, 0)))
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    booking_row(at(8, 30), at(9, 30)),
                    booking_row(at(12, 0), at(13, 0)),
                ])
            });

        let ranges = employee_booking_ranges(&repo, employee_id, window)
            .await
            .unwrap();

        assert_eq!(
            ranges,
            vec![
                TimeRange::new(at(8, 30), at(9, 30)),
                TimeRange::new(at(12, 0), at(13, 0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_customer_booking_failure_is_database_error() {
        let mut repo = MockBookingRepo::new();
        repo.expect_get_customer_bookings_in_window()
            .returning(|_, _, _| Err(eyre::eyre!("connection reset")));

        let result =
            customer_booking_ranges(&repo, Uuid::new_v4(), TimeRange::new(at(9, 0), at(17, 0)))
                .await;

        assert!(matches!(result, Err(BookingError::Database(_))));
    }
}
