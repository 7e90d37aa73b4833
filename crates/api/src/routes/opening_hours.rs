use axum::{
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, middleware::auth::require_admin, ApiState};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/services/:id/opening-hours",
        get(handlers::opening_hours::get_opening_hours).merge(
            put(handlers::opening_hours::update_opening_hours)
                .route_layer(from_fn_with_state(state, require_admin)),
        ),
    )
}
