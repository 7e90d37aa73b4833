use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use slotbook_core::{
    errors::BookingError,
    models::{
        opening_hours::{
            Locale, OpeningHours, OpeningHoursDayResponse, ServiceOpeningHoursResponse,
            UpdateOpeningHoursRequest,
        },
        service::Service,
    },
};
use slotbook_db::models::DbOpeningHours;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct OpeningHoursQuery {
    /// Language of the weekday labels (default: en)
    pub locale: Option<Locale>,
}

async fn load_service(state: &ApiState, id: Uuid) -> Result<Service, AppError> {
    let service = slotbook_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Service with ID {} not found", id)))?;

    Ok(service.into())
}

fn week_response(
    service: Service,
    rows: Vec<DbOpeningHours>,
    locale: Locale,
) -> Result<ServiceOpeningHoursResponse, AppError> {
    let days = rows
        .into_iter()
        .map(|row| {
            let hours = OpeningHours::try_from(row)?;
            Ok(OpeningHoursDayResponse::new(&hours, locale))
        })
        .collect::<Result<Vec<_>, eyre::Report>>()?;

    Ok(ServiceOpeningHoursResponse {
        service_id: service.id,
        service_name: service.name,
        days,
    })
}

#[axum::debug_handler]
pub async fn get_opening_hours(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<OpeningHoursQuery>,
) -> Result<Json<ServiceOpeningHoursResponse>, AppError> {
    let service = load_service(&state, id).await?;

    let rows =
        slotbook_db::repositories::opening_hours::get_opening_hours_by_service_id(&state.db_pool, id)
            .await
            .map_err(BookingError::Database)?;

    Ok(Json(week_response(
        service,
        rows,
        query.locale.unwrap_or_default(),
    )?))
}

/// Replaces the week of opening hours. Days left out have no record and are
/// treated as closed.
#[axum::debug_handler]
pub async fn update_opening_hours(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOpeningHoursRequest>,
) -> Result<Json<ServiceOpeningHoursResponse>, AppError> {
    let week = payload.into_schedule(id)?;
    let service = load_service(&state, id).await?;

    let rows = slotbook_db::repositories::opening_hours::replace_opening_hours(
        &state.db_pool,
        id,
        week.days(),
    )
    .await
    .map_err(BookingError::Database)?;

    info!(service_id = %id, days = rows.len(), "Opening hours replaced");
    Ok(Json(week_response(service, rows, Locale::default())?))
}
