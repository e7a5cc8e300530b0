//! Application assembly: service wiring and the HTTP router.

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, routing::get, Router};
use tower::ServiceBuilder;

use cityinfo_infra::{CityRepository, Notifier};

use crate::app::services::AppServices;

/// Build the full application router around the given store and notifier.
///
/// Tests inject an empty store or a recording notifier here; `main` passes
/// the seeded store and the configured mail transport.
pub fn build_app(store: Arc<dyn CityRepository>, notifier: Arc<dyn Notifier>) -> Router {
    let services = Arc::new(AppServices::new(store, notifier));

    Router::new()
        .route("/health", get(health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}

async fn health() -> StatusCode {
    StatusCode::OK
}
