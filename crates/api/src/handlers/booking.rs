use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use slotbook_core::{
    AvailabilitySlotComputer,
    errors::BookingError,
    models::booking::{BookingResponse, CreateBookingRequest},
    placement::place_booking,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    ApiState,
    handlers::availability::load_booking_target,
    middleware::{auth::Customer, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    customer: Customer,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let customer_id = customer.require()?;

    let (service, offer, employee) = load_booking_target(
        &state.store,
        &state.store,
        &state.store,
        payload.offer_id,
        payload.employee_id,
    )
    .await?;

    let computer = AvailabilitySlotComputer::new(&state.store, &state.store, &state.store, &customer);
    let booking = place_booking(
        &computer,
        &service,
        &offer,
        &employee,
        customer_id,
        payload.start_time,
    )
    .await?;

    let row = slotbook_db::repositories::booking::create_booking(&state.db_pool, &booking)
        .await
        .map_err(BookingError::Database)?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    customer: Customer,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let customer_id = customer.require()?;

    let bookings =
        slotbook_db::repositories::booking::get_bookings_by_customer_id(&state.db_pool, customer_id)
            .await
            .map_err(BookingError::Database)?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    customer: Customer,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let customer_id = customer.require()?;

    let booking = slotbook_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;

    if booking.customer_id != customer_id {
        return Err(AppError(BookingError::Authorization(
            "Bookings can only be cancelled by the customer who made them".to_string(),
        )));
    }

    slotbook_db::repositories::booking::delete_booking(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?;

    info!(booking_id = %id, "Booking cancelled");
    Ok(StatusCode::NO_CONTENT)
}
