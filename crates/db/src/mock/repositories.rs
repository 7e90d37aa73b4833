use async_trait::async_trait;
use chrono::NaiveDateTime;
use mockall::mock;
use uuid::Uuid;

use crate::{
    models::{DbBooking, DbEmployee, DbOffer, DbOpeningHours, DbService},
    repositories::{
        BookingRepository, EmployeeRepository, OfferRepository, OpeningHoursRepository,
        ServiceRepository,
    },
};

// Mock repositories for testing
mock! {
    pub ServiceRepo {}

    #[async_trait]
    impl ServiceRepository for ServiceRepo {
        async fn get_service_by_id(&self, id: Uuid) -> eyre::Result<Option<DbService>>;
    }
}

mock! {
    pub OfferRepo {}

    #[async_trait]
    impl OfferRepository for OfferRepo {
        async fn get_offer_by_id(&self, id: Uuid) -> eyre::Result<Option<DbOffer>>;
    }
}

mock! {
    pub EmployeeRepo {}

    #[async_trait]
    impl EmployeeRepository for EmployeeRepo {
        async fn get_employee_by_id(&self, id: Uuid) -> eyre::Result<Option<DbEmployee>>;
    }
}

mock! {
    pub OpeningHoursRepo {}

    #[async_trait]
    impl OpeningHoursRepository for OpeningHoursRepo {
        async fn get_opening_hours_for_weekday(
            &self,
            service_id: Uuid,
            weekday: i16,
        ) -> eyre::Result<Option<DbOpeningHours>>;
    }
}

mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingRepository for BookingRepo {
        async fn get_employee_bookings_in_window(
            &self,
            employee_id: Uuid,
            window_start: NaiveDateTime,
            window_end: NaiveDateTime,
        ) -> eyre::Result<Vec<DbBooking>>;

        async fn get_customer_bookings_in_window(
            &self,
            customer_id: Uuid,
            window_start: NaiveDateTime,
            window_end: NaiveDateTime,
        ) -> eyre::Result<Vec<DbBooking>>;
    }
}
