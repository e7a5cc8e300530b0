use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use cityinfo_core::{patch, CityId, PatchOperation, PoiDraft, PoiId};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_points_of_interest).post(create_point_of_interest))
        .route(
            "/:poi_id",
            get(get_point_of_interest)
                .put(replace_point_of_interest)
                .patch(patch_point_of_interest)
                .delete(delete_point_of_interest),
        )
}

pub async fn list_points_of_interest(
    Extension(services): Extension<Arc<AppServices>>,
    Path(city_id): Path<CityId>,
) -> axum::response::Response {
    match services.store().list_for_city(city_id) {
        Ok(pois) => (StatusCode::OK, Json(pois)).into_response(),
        Err(cityinfo_core::DomainError::NotFound) => {
            tracing::info!("city {city_id} was not found when accessing points of interest");
            errors::json_error(StatusCode::NOT_FOUND, "not_found", "city not found")
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_point_of_interest(
    Extension(services): Extension<Arc<AppServices>>,
    Path((city_id, poi_id)): Path<(CityId, PoiId)>,
) -> axum::response::Response {
    match services.store().get(city_id, poi_id) {
        Ok(Some(poi)) => (StatusCode::OK, Json(poi)).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "point of interest not found",
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_point_of_interest(
    Extension(services): Extension<Arc<AppServices>>,
    Path(city_id): Path<CityId>,
    Json(body): Json<dto::CreatePoiRequest>,
) -> axum::response::Response {
    let draft = PoiDraft::from(body);
    if let Err(e) = draft.validate() {
        return errors::domain_error_to_response(e);
    }

    let poi = match services.store().create(city_id, draft) {
        Ok(poi) => poi,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.store().save() {
        return errors::domain_error_to_response(e);
    }

    let location = format!("/cities/{city_id}/pois/{}", poi.id);
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(poi),
    )
        .into_response()
}

pub async fn replace_point_of_interest(
    Extension(services): Extension<Arc<AppServices>>,
    Path((city_id, poi_id)): Path<(CityId, PoiId)>,
    Json(body): Json<dto::UpdatePoiRequest>,
) -> axum::response::Response {
    let draft = PoiDraft::from(body);
    if let Err(e) = draft.validate() {
        return errors::domain_error_to_response(e);
    }

    match services.store().replace(city_id, poi_id, draft) {
        Ok(()) => match services.store().save() {
            Ok(()) => StatusCode::NO_CONTENT.into_response(),
            Err(e) => errors::domain_error_to_response(e),
        },
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn patch_point_of_interest(
    Extension(services): Extension<Arc<AppServices>>,
    Path((city_id, poi_id)): Path<(CityId, PoiId)>,
    Json(ops): Json<Vec<PatchOperation>>,
) -> axum::response::Response {
    let stored = match services.store().get(city_id, poi_id) {
        Ok(Some(poi)) => poi,
        Ok(None) => {
            return errors::json_error(
                StatusCode::NOT_FOUND,
                "not_found",
                "point of interest not found",
            )
        }
        Err(e) => return errors::domain_error_to_response(e),
    };

    // Apply to a working copy; the stored entity changes only after the
    // whole batch applies and the result validates.
    let mut draft = PoiDraft::from_poi(&stored);
    if let Err(e) = patch::apply(&ops, &mut draft) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = draft.validate() {
        return errors::domain_error_to_response(e);
    }

    match services.store().replace(city_id, poi_id, draft) {
        Ok(()) => match services.store().save() {
            Ok(()) => StatusCode::NO_CONTENT.into_response(),
            Err(e) => errors::domain_error_to_response(e),
        },
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_point_of_interest(
    Extension(services): Extension<Arc<AppServices>>,
    Path((city_id, poi_id)): Path<(CityId, PoiId)>,
) -> axum::response::Response {
    let removed = match services.store().delete(city_id, poi_id) {
        Ok(poi) => poi,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.store().save() {
        return errors::domain_error_to_response(e);
    }

    services.notify_deleted(&removed);
    StatusCode::NO_CONTENT.into_response()
}
