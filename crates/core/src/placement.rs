use chrono::NaiveDateTime;
use tracing::info;

use crate::{
    CustomerId,
    availability::AvailabilitySlotComputer,
    errors::{BookingError, BookingResult},
    models::{
        booking::{Booking, NewBooking},
        employee::Employee,
        offer::Offer,
        service::Service,
    },
};

/// Rejects an offer or employee that belongs to a different service.
pub fn ensure_same_service(service: &Service, offer: &Offer, employee: &Employee) -> BookingResult<()> {
    if offer.service_id != service.id {
        return Err(BookingError::Validation(format!(
            "Offer {} does not belong to service {}",
            offer.id, service.id
        )));
    }
    if employee.service_id != service.id {
        return Err(BookingError::Validation(format!(
            "Employee {} does not work for service {}",
            employee.id, service.id
        )));
    }
    Ok(())
}

/// Builds a booking for `start_time` if it is currently one of the free slots
/// of its day for this customer. The check reads a snapshot; a concurrent
/// booking of the same slot is not prevented here.
pub async fn place_booking(
    computer: &AvailabilitySlotComputer<'_>,
    service: &Service,
    offer: &Offer,
    employee: &Employee,
    customer_id: CustomerId,
    start_time: NaiveDateTime,
) -> BookingResult<Booking> {
    ensure_same_service(service, offer, employee)?;

    let slots = computer
        .compute_slots_for(service, offer, employee, start_time.date(), Some(customer_id))
        .await?;

    if !slots.contains(&start_time) {
        return Err(BookingError::Conflict(format!(
            "{} is not an available slot for employee {}",
            start_time.format("%Y-%m-%d %H:%M"),
            employee.id
        )));
    }

    let booking = Booking::new(
        NewBooking {
            service_id: service.id,
            offer_id: offer.id,
            employee_id: Some(employee.id),
            customer_id,
            start_time,
        },
        offer,
    )?;

    info!(
        booking_id = %booking.id(),
        employee_id = %employee.id,
        start = %booking.start_time(),
        "Booking placed"
    );
    Ok(booking)
}
