//! # Authentication Module
//!
//! Login and sessions live in front of this service. Requests arrive with the
//! authenticated customer in the `x-customer-id` header; admin requests carry
//! the configured token in `x-admin-token`.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use slotbook_core::{CurrentUserProvider, CustomerId, errors::BookingError};
use tracing::warn;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

pub const CUSTOMER_HEADER: &str = "x-customer-id";
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// The customer making the request, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer(pub Option<CustomerId>);

impl Customer {
    /// The customer id, or an authentication error for anonymous requests.
    pub fn require(&self) -> Result<CustomerId, AppError> {
        self.0.ok_or_else(|| {
            AppError(BookingError::Authentication(
                "A customer is required for this request".to_string(),
            ))
        })
    }
}

impl CurrentUserProvider for Customer {
    fn current(&self) -> Option<CustomerId> {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Customer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(CUSTOMER_HEADER) else {
            return Ok(Customer(None));
        };

        value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(|id| Customer(Some(id)))
            .ok_or_else(|| {
                AppError(BookingError::Validation(format!(
                    "{} must be a UUID",
                    CUSTOMER_HEADER
                )))
            })
    }
}

/// Lets a request through only when it carries the configured admin token.
pub async fn require_admin(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Err(AppError(BookingError::Authorization(
            "Admin endpoints are disabled".to_string(),
        )));
    };

    match request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        None => Err(AppError(BookingError::Authentication(
            "Missing admin token".to_string(),
        ))),
        Some(token) if token == expected => Ok(next.run(request).await),
        Some(_) => {
            warn!(path = %request.uri().path(), "Rejected admin request with invalid token");
            Err(AppError(BookingError::Authorization(
                "Invalid admin token".to_string(),
            )))
        }
    }
}
