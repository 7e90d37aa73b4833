//! HTTP surface of Slotbook.
//!
//! Customers list free slots and book or cancel them; admins edit opening
//! hours. Handlers resolve entities through `slotbook_db` and leave the slot
//! rules to `slotbook_core`.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use eyre::Result;
use slotbook_db::store::PgStore;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// State handed to every handler.
pub struct ApiState {
    pub db_pool: PgPool,
    /// Lookups used by the slot computer, backed by the same pool
    pub store: PgStore,
    /// Expected `x-admin-token`; admin endpoints are closed when `None`
    pub admin_token: Option<String>,
}

impl ApiState {
    pub fn new(db_pool: PgPool, admin_token: Option<String>) -> Self {
        Self {
            store: PgStore::new(db_pool.clone()),
            db_pool,
            admin_token,
        }
    }
}

/// Every endpoint, bound to `state`. Serving layers are added by
/// [`start_server`].
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::availability::routes())
        .merge(routes::booking::routes())
        .merge(routes::opening_hours::routes(state.clone()))
        .with_state(state)
}

/// CORS for the given origins. A `*` entry allows any origin; unparseable
/// origins are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(middleware::auth::CUSTOMER_HEADER),
            HeaderName::from_static(middleware::auth::ADMIN_TOKEN_HEADER),
        ])
}

fn allowed_origins(origins: &[String]) -> AllowOrigin {
    // tower-http refuses `*` inside an origin list.
    if origins.iter().any(|origin| origin == "*") {
        if origins.len() > 1 {
            warn!("API_CORS_ORIGINS contains `*`, other origins are redundant");
        }
        return AllowOrigin::any();
    }

    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    AllowOrigin::list(origins)
}

/// Installs the log subscriber, then serves [`router`] on
/// `config.server_addr()` until the listener closes.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(config.log_level)
            .finish(),
    )?;

    let state = Arc::new(ApiState::new(db_pool, config.admin_token.clone()));
    if state.admin_token.is_none() {
        warn!("ADMIN_TOKEN is not set, opening hours cannot be edited");
    }

    let mut app = router(state);
    if let Some(origins) = &config.cors_origins {
        app = app.layer(cors_layer(origins));
    }
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(config.request_timeout)),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Slotbook API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
