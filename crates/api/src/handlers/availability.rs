//! # Availability Handlers
//!
//! Serves the bookable start times of an offer with an employee on one day.
//! The computation itself lives in `slotbook_core::availability`; this module
//! resolves the service, offer and employee and formats the result.

use axum::{
    Json,
    extract::{Query, State},
};
use slotbook_core::{
    AvailabilitySlotComputer,
    errors::BookingError,
    models::{
        employee::Employee,
        offer::Offer,
        service::Service,
        slot::{SlotResponse, SlotsQuery},
    },
    placement::ensure_same_service,
};
use slotbook_db::repositories::{EmployeeRepository, OfferRepository, ServiceRepository};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::Customer, error_handling::AppError},
};

/// Loads an offer and an employee together with the service they belong to.
///
/// # Errors
///
/// * `BookingError::NotFound` - Unknown offer, employee or service
/// * `BookingError::Validation` - Offer and employee belong to different services
pub async fn load_booking_target<S, O, E>(
    services: &S,
    offers: &O,
    employees: &E,
    offer_id: Uuid,
    employee_id: Uuid,
) -> Result<(Service, Offer, Employee), AppError>
where
    S: ServiceRepository + ?Sized,
    O: OfferRepository + ?Sized,
    E: EmployeeRepository + ?Sized,
{
    let offer: Offer = offers
        .get_offer_by_id(offer_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Offer with ID {} not found", offer_id)))?
        .into();

    let employee: Employee = employees
        .get_employee_by_id(employee_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Employee with ID {} not found", employee_id))
        })?
        .into();

    let service: Service = services
        .get_service_by_id(offer.service_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Service with ID {} not found", offer.service_id))
        })?
        .into();

    ensure_same_service(&service, &offer, &employee)?;

    Ok((service, offer, employee))
}

/// Lists the free slots for the requesting customer.
///
/// # Endpoint
///
/// ```text
/// GET /api/slots?offer_id=<uuid>&employee_id=<uuid>&date=2024-05-06
/// ```
///
/// Anonymous requests get an empty list: the customer's own bookings are part
/// of the exclusion, so availability is only computed for a known customer.
/// The offer and employee are still resolved first, so an unknown id is a 404
/// for anonymous callers too.
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    customer: Customer,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    let (service, offer, employee) = load_booking_target(
        &state.store,
        &state.store,
        &state.store,
        query.offer_id,
        query.employee_id,
    )
    .await?;

    let computer = AvailabilitySlotComputer::new(&state.store, &state.store, &state.store, &customer);
    let slots = computer
        .compute_slots(&service, &offer, &employee, query.date)
        .await?;

    Ok(Json(slots.into_iter().map(SlotResponse::from).collect()))
}
