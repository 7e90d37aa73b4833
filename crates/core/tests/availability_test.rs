mod common;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Weekday};
use common::{Calendar, Fixture, at, day, range, time};
use mockall::mock;
use pretty_assertions::assert_eq;
use rstest::rstest;
use slotbook_core::{
    AvailabilitySlotComputer, BookingError, BookingResult, ConflictingBookingsLookup, CustomerId,
    UserBookingsLookup, models::time_range::TimeRange,
};
use uuid::Uuid;

mock! {
    pub Bookings {}

    #[async_trait]
    impl ConflictingBookingsLookup for Bookings {
        async fn employee_bookings(
            &self,
            employee_id: Uuid,
            window: TimeRange,
        ) -> BookingResult<Vec<TimeRange>>;
    }

    #[async_trait]
    impl UserBookingsLookup for Bookings {
        async fn customer_bookings(
            &self,
            customer_id: Uuid,
            window: TimeRange,
        ) -> BookingResult<Vec<TimeRange>>;
    }
}

async fn slots_for(
    fixture: &Fixture,
    calendar: &Calendar,
    customer: Option<CustomerId>,
) -> BookingResult<Vec<NaiveDateTime>> {
    AvailabilitySlotComputer::new(calendar, calendar, calendar, &customer)
        .compute_slots(&fixture.service, &fixture.offer, &fixture.employee, day())
        .await
}

fn nine_to(fixture: &Fixture, closes: (u32, u32)) -> Calendar {
    Calendar::default().open(
        fixture.service.id,
        Weekday::Mon,
        time(9, 0),
        time(closes.0, closes.1),
    )
}

#[tokio::test]
async fn test_closed_day_has_no_slots() {
    let fixture = Fixture::new(60);
    let calendar = Calendar::default().closed(fixture.service.id, Weekday::Mon);

    let slots = slots_for(&fixture, &calendar, Some(fixture.customer)).await.unwrap();

    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_missing_opening_hours_has_no_slots() {
    let fixture = Fixture::new(60);
    let calendar = Calendar::default().open(fixture.service.id, Weekday::Tue, time(9, 0), time(17, 0));

    let slots = slots_for(&fixture, &calendar, Some(fixture.customer)).await.unwrap();

    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_no_customer_has_no_slots() {
    let fixture = Fixture::new(60);
    let calendar = nine_to(&fixture, (17, 0));

    let slots = slots_for(&fixture, &calendar, None).await.unwrap();

    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_no_customer_skips_booking_lookups() {
    let fixture = Fixture::new(60);
    let calendar = nine_to(&fixture, (17, 0));
    let mut bookings = MockBookings::new();
    bookings.expect_employee_bookings().never();
    bookings.expect_customer_bookings().never();
    let nobody: Option<CustomerId> = None;

    let slots = AvailabilitySlotComputer::new(&calendar, &bookings, &bookings, &nobody)
        .compute_slots(&fixture.service, &fixture.offer, &fixture.employee, day())
        .await
        .unwrap();

    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_full_day_hourly_grid() {
    let fixture = Fixture::new(60);
    let calendar = nine_to(&fixture, (17, 0));

    let slots = slots_for(&fixture, &calendar, Some(fixture.customer)).await.unwrap();

    let expected: Vec<NaiveDateTime> = (9..=16).map(|h| at(h, 0)).collect();
    assert_eq!(slots, expected);
}

#[tokio::test]
async fn test_employee_booking_removes_overlapping_slot() {
    let fixture = Fixture::new(60);
    let calendar = nine_to(&fixture, (17, 0))
        .employee_booking(fixture.employee.id, range((11, 0), (12, 0)));

    let slots = slots_for(&fixture, &calendar, Some(fixture.customer)).await.unwrap();

    assert_eq!(slots.len(), 7);
    assert!(!slots.contains(&at(11, 0)));
}

#[tokio::test]
async fn test_other_employees_bookings_are_ignored() {
    let fixture = Fixture::new(60);
    let calendar = nine_to(&fixture, (17, 0))
        .employee_booking(Uuid::new_v4(), range((11, 0), (12, 0)));

    let slots = slots_for(&fixture, &calendar, Some(fixture.customer)).await.unwrap();

    assert_eq!(slots.len(), 8);
}

#[tokio::test]
async fn test_customer_booking_removes_slot() {
    let fixture = Fixture::new(60);
    let calendar = nine_to(&fixture, (17, 0))
        .customer_booking(fixture.customer, range((14, 0), (15, 0)));

    let slots = slots_for(&fixture, &calendar, Some(fixture.customer)).await.unwrap();

    assert_eq!(slots.len(), 7);
    assert!(!slots.contains(&at(14, 0)));
}

#[tokio::test]
async fn test_partial_overlap_removes_every_touched_slot() {
    let fixture = Fixture::new(60);
    let calendar = nine_to(&fixture, (12, 0))
        .employee_booking(fixture.employee.id, range((10, 30), (11, 30)));

    let slots = slots_for(&fixture, &calendar, Some(fixture.customer)).await.unwrap();

    assert_eq!(slots, vec![at(9, 0)]);
}

#[rstest]
#[case(30, vec![(9, 0), (9, 30), (10, 0), (10, 30), (11, 0), (11, 30)])]
#[case(60, vec![(9, 0), (10, 0), (11, 0)])]
#[case(90, vec![(9, 0), (10, 30)])]
#[case(120, vec![(9, 0)])]
#[case(240, vec![])]
#[tokio::test]
async fn test_duration_sets_grid_density(#[case] duration: i32, #[case] expected: Vec<(u32, u32)>) {
    let fixture = Fixture::new(duration);
    let calendar = nine_to(&fixture, (12, 0));

    let slots = slots_for(&fixture, &calendar, Some(fixture.customer)).await.unwrap();

    let expected: Vec<NaiveDateTime> = expected.into_iter().map(|(h, m)| at(h, m)).collect();
    assert_eq!(slots, expected);
}

#[tokio::test]
async fn test_repeated_computation_is_identical() {
    let fixture = Fixture::new(45);
    let calendar = nine_to(&fixture, (17, 0))
        .employee_booking(fixture.employee.id, range((10, 0), (10, 50)))
        .customer_booking(fixture.customer, range((15, 0), (16, 0)));

    let first = slots_for(&fixture, &calendar, Some(fixture.customer)).await.unwrap();
    let second = slots_for(&fixture, &calendar, Some(fixture.customer)).await.unwrap();

    assert_eq!(first, second);
    assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
}

#[rstest]
#[case(0)]
#[case(-30)]
#[tokio::test]
async fn test_non_positive_duration_is_rejected(#[case] duration: i32) {
    let fixture = Fixture::new(duration);
    let calendar = nine_to(&fixture, (17, 0));

    let result = slots_for(&fixture, &calendar, Some(fixture.customer)).await;

    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[tokio::test]
async fn test_explicit_exclusion_without_current_user() {
    let fixture = Fixture::new(60);
    let calendar = nine_to(&fixture, (12, 0))
        .customer_booking(fixture.customer, range((10, 0), (11, 0)));
    let nobody: Option<CustomerId> = None;
    let computer = AvailabilitySlotComputer::new(&calendar, &calendar, &calendar, &nobody);

    let anonymous = computer
        .compute_slots_for(&fixture.service, &fixture.offer, &fixture.employee, day(), None)
        .await
        .unwrap();
    let excluding = computer
        .compute_slots_for(
            &fixture.service,
            &fixture.offer,
            &fixture.employee,
            day(),
            Some(fixture.customer),
        )
        .await
        .unwrap();

    assert_eq!(anonymous, vec![at(9, 0), at(10, 0), at(11, 0)]);
    assert_eq!(excluding, vec![at(9, 0), at(11, 0)]);
}

#[tokio::test]
async fn test_lookup_failure_propagates() {
    let fixture = Fixture::new(60);
    let calendar = nine_to(&fixture, (17, 0));
    let mut bookings = MockBookings::new();
    bookings
        .expect_employee_bookings()
        .returning(|_, _| Err(BookingError::Database(eyre::eyre!("connection reset"))));
    let customer = Some(fixture.customer);

    let result = AvailabilitySlotComputer::new(&calendar, &bookings, &bookings, &customer)
        .compute_slots(&fixture.service, &fixture.offer, &fixture.employee, day())
        .await;

    assert!(matches!(result, Err(BookingError::Database(_))));
}

#[tokio::test]
async fn test_lookups_receive_opening_window() {
    let fixture = Fixture::new(60);
    let calendar = nine_to(&fixture, (17, 0));
    let employee_id = fixture.employee.id;
    let customer_id = fixture.customer;
    let mut bookings = MockBookings::new();
    bookings
        .expect_employee_bookings()
        .withf(move |id, window| *id == employee_id && *window == range((9, 0), (17, 0)))
        .times(1)
        .returning(|_, _| Ok(vec![range((9, 0), (10, 0))]));
    bookings
        .expect_customer_bookings()
        .withf(move |id, window| *id == customer_id && *window == range((9, 0), (17, 0)))
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    let customer = Some(customer_id);

    let slots = AvailabilitySlotComputer::new(&calendar, &bookings, &bookings, &customer)
        .compute_slots(&fixture.service, &fixture.offer, &fixture.employee, day())
        .await
        .unwrap();

    assert_eq!(slots.first(), Some(&at(10, 0)));
    assert_eq!(slots.len(), 7);
}

#[rstest]
#[case::inverted((17, 0), (9, 0))]
#[case::zero_length((9, 0), (9, 0))]
#[tokio::test]
async fn test_empty_opening_window_skips_booking_lookups(
    #[case] opens: (u32, u32),
    #[case] closes: (u32, u32),
) {
    let fixture = Fixture::new(30);
    let calendar = Calendar::default().open(
        fixture.service.id,
        Weekday::Mon,
        time(opens.0, opens.1),
        time(closes.0, closes.1),
    );
    // No expectations: any booking lookup fails the test.
    let bookings = MockBookings::new();
    let customer = Some(fixture.customer);

    let slots = AvailabilitySlotComputer::new(&calendar, &bookings, &bookings, &customer)
        .compute_slots(&fixture.service, &fixture.offer, &fixture.employee, day())
        .await
        .unwrap();

    assert!(slots.is_empty());
}
