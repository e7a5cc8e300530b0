use axum::Router;

pub mod cities;
pub mod points_of_interest;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new().nest("/cities", cities::router())
}
