use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use cityinfo_core::CityId;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_cities))
        .route("/:city_id", get(get_city))
        .nest("/:city_id/pois", super::points_of_interest::router())
}

pub async fn list_cities(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().list_cities() {
        Ok(cities) => (StatusCode::OK, Json(cities)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_city(
    Extension(services): Extension<Arc<AppServices>>,
    Path(city_id): Path<CityId>,
) -> axum::response::Response {
    match services.store().find(city_id) {
        Ok(Some(city)) => (StatusCode::OK, Json(city)).into_response(),
        Ok(None) => {
            tracing::info!("city {city_id} was not found");
            errors::json_error(StatusCode::NOT_FOUND, "not_found", "city not found")
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
