use serde::Deserialize;

use cityinfo_core::PoiDraft;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /cities/{cityId}/pois`.
#[derive(Debug, Deserialize)]
pub struct CreatePoiRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Body of `PUT /cities/{cityId}/pois/{poiId}`. The id comes from the path
/// and is immutable.
#[derive(Debug, Deserialize)]
pub struct UpdatePoiRequest {
    pub name: String,
    pub description: Option<String>,
}

impl From<CreatePoiRequest> for PoiDraft {
    fn from(body: CreatePoiRequest) -> Self {
        Self::new(body.name, body.description)
    }
}

impl From<UpdatePoiRequest> for PoiDraft {
    fn from(body: UpdatePoiRequest) -> Self {
        Self::new(body.name, body.description)
    }
}
