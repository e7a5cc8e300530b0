use serde::{Deserialize, Serialize};

use crate::id::{CityId, PoiId};
use crate::poi::PointOfInterest;

/// Top-level owning entity for a geographic area.
///
/// Cities come into existence when the store is initialized (or through a
/// provisioning path outside this crate) and are never deleted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub description: String,
    /// Ordered collection; a point of interest never exists outside one.
    pub points_of_interest: Vec<PointOfInterest>,
}

impl City {
    pub fn new(id: CityId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            points_of_interest: Vec::new(),
        }
    }

    /// Look up a point of interest in this city's collection.
    ///
    /// Ids from other cities do not resolve here.
    pub fn poi(&self, poi_id: PoiId) -> Option<&PointOfInterest> {
        self.points_of_interest.iter().find(|p| p.id == poi_id)
    }

    pub fn poi_mut(&mut self, poi_id: PoiId) -> Option<&mut PointOfInterest> {
        self.points_of_interest.iter_mut().find(|p| p.id == poi_id)
    }

    /// Highest point of interest id currently present, 0 if none.
    pub fn max_poi_id(&self) -> u64 {
        self.points_of_interest
            .iter()
            .map(|p| p.id.value())
            .max()
            .unwrap_or(0)
    }
}
