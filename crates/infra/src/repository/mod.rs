//! Storage contract for the city registry and its points of interest.

mod in_memory;

pub use in_memory::InMemoryCityStore;

use cityinfo_core::{City, CityId, DomainResult, PoiDraft, PoiId, PointOfInterest};

/// Storage-agnostic repository for cities and their points of interest.
///
/// Every point-of-interest operation re-checks city existence before
/// touching the collection, even when a caller already did; city state may
/// have changed between layers.
pub trait CityRepository: Send + Sync {
    /// Whether a city with this id exists.
    fn exists(&self, city_id: CityId) -> DomainResult<bool>;

    /// Look up a city. Absence is not an error.
    fn find(&self, city_id: CityId) -> DomainResult<Option<City>>;

    /// All cities in the registry.
    fn list_cities(&self) -> DomainResult<Vec<City>>;

    /// The city's points of interest, in insertion order.
    ///
    /// `NotFound` if the city is absent; an empty vec if it has none.
    fn list_for_city(&self, city_id: CityId) -> DomainResult<Vec<PointOfInterest>>;

    /// Look up one point of interest within a city.
    ///
    /// `NotFound` if the city is absent. `Ok(None)` if the point of interest
    /// is absent — including when the id belongs to a different city.
    fn get(&self, city_id: CityId, poi_id: PoiId) -> DomainResult<Option<PointOfInterest>>;

    /// Create a point of interest from a validated draft.
    ///
    /// Assigns the next id from the registry-wide sequence and appends to
    /// the city's collection. Returns the materialized entity.
    fn create(&self, city_id: CityId, draft: PoiDraft) -> DomainResult<PointOfInterest>;

    /// Overwrite the editable fields of an existing point of interest.
    ///
    /// `NotFound` if the city or the point of interest is absent. Idempotent.
    fn replace(&self, city_id: CityId, poi_id: PoiId, draft: PoiDraft) -> DomainResult<()>;

    /// Remove a point of interest and return the removed entity.
    fn delete(&self, city_id: CityId, poi_id: PoiId) -> DomainResult<PointOfInterest>;

    /// Unit-of-work commit hook. The in-memory store has nothing to flush;
    /// a persistent implementation commits its pending writes here.
    fn save(&self) -> DomainResult<()>;
}
