use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use cityinfo_core::{City, CityId, DomainError, DomainResult, PoiDraft, PoiId, PointOfInterest};

use super::CityRepository;

#[derive(Debug, Default)]
struct StoreInner {
    cities: Vec<City>,
    /// Highest point of interest id ever assigned or observed. Never
    /// decreases, so deleted ids are not recycled.
    poi_id_high_water: u64,
}

impl StoreInner {
    fn city(&self, city_id: CityId) -> Option<&City> {
        self.cities.iter().find(|c| c.id == city_id)
    }

    fn city_mut(&mut self, city_id: CityId) -> Option<&mut City> {
        self.cities.iter_mut().find(|c| c.id == city_id)
    }

    /// Next id: 1 + max over every city's collection, floored by the
    /// high-water mark.
    fn next_poi_id(&self) -> u64 {
        let global_max = self
            .cities
            .iter()
            .flat_map(|c| &c.points_of_interest)
            .map(|p| p.id.value())
            .max()
            .unwrap_or(0);
        global_max.max(self.poi_id_high_water) + 1
    }
}

/// In-memory city registry.
///
/// The whole registry sits behind one `RwLock`: reads share, every mutation
/// is exclusive. Id assignment happens under the same write lock as the
/// insert, so concurrent creates cannot collide.
///
/// Intended for dev/test and as the reference implementation of
/// [`CityRepository`]. Not optimized for large registries.
#[derive(Debug, Default)]
pub struct InMemoryCityStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryCityStore {
    /// Empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the given cities. The id sequence starts
    /// above the highest pre-existing point of interest id.
    pub fn with_cities(cities: Vec<City>) -> Self {
        let poi_id_high_water = cities
            .iter()
            .flat_map(|c| &c.points_of_interest)
            .map(|p| p.id.value())
            .max()
            .unwrap_or(0);
        Self {
            inner: RwLock::new(StoreInner {
                cities,
                poi_id_high_water,
            }),
        }
    }

    /// Development fixture: four cities with two points of interest each.
    pub fn seeded() -> Self {
        Self::with_cities(seed_cities())
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, StoreInner>> {
        self.inner
            .read()
            .map_err(|_| DomainError::internal("city store lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, StoreInner>> {
        self.inner
            .write()
            .map_err(|_| DomainError::internal("city store lock poisoned"))
    }
}

impl CityRepository for InMemoryCityStore {
    fn exists(&self, city_id: CityId) -> DomainResult<bool> {
        Ok(self.read()?.city(city_id).is_some())
    }

    fn find(&self, city_id: CityId) -> DomainResult<Option<City>> {
        Ok(self.read()?.city(city_id).cloned())
    }

    fn list_cities(&self) -> DomainResult<Vec<City>> {
        Ok(self.read()?.cities.clone())
    }

    fn list_for_city(&self, city_id: CityId) -> DomainResult<Vec<PointOfInterest>> {
        let inner = self.read()?;
        let city = inner.city(city_id).ok_or_else(DomainError::not_found)?;
        Ok(city.points_of_interest.clone())
    }

    fn get(&self, city_id: CityId, poi_id: PoiId) -> DomainResult<Option<PointOfInterest>> {
        let inner = self.read()?;
        let city = inner.city(city_id).ok_or_else(DomainError::not_found)?;
        Ok(city.poi(poi_id).cloned())
    }

    fn create(&self, city_id: CityId, draft: PoiDraft) -> DomainResult<PointOfInterest> {
        let mut inner = self.write()?;
        if inner.city(city_id).is_none() {
            return Err(DomainError::NotFound);
        }

        let next = inner.next_poi_id();
        inner.poi_id_high_water = next;

        let poi = PointOfInterest::materialize(PoiId::new(next), draft);
        let city = inner.city_mut(city_id).ok_or_else(DomainError::not_found)?;
        city.points_of_interest.push(poi.clone());
        Ok(poi)
    }

    fn replace(&self, city_id: CityId, poi_id: PoiId, draft: PoiDraft) -> DomainResult<()> {
        let mut inner = self.write()?;
        let city = inner.city_mut(city_id).ok_or_else(DomainError::not_found)?;
        let poi = city.poi_mut(poi_id).ok_or_else(DomainError::not_found)?;
        poi.apply_draft(draft);
        Ok(())
    }

    fn delete(&self, city_id: CityId, poi_id: PoiId) -> DomainResult<PointOfInterest> {
        let mut inner = self.write()?;
        let city = inner.city_mut(city_id).ok_or_else(DomainError::not_found)?;
        let idx = city
            .points_of_interest
            .iter()
            .position(|p| p.id == poi_id)
            .ok_or_else(DomainError::not_found)?;
        Ok(city.points_of_interest.remove(idx))
    }

    fn save(&self) -> DomainResult<()> {
        // Nothing buffered; writes are visible as soon as the lock drops.
        Ok(())
    }
}

fn seed_cities() -> Vec<City> {
    fn poi(id: u64, name: &str, description: &str) -> PointOfInterest {
        PointOfInterest {
            id: PoiId::new(id),
            name: name.to_string(),
            description: Some(description.to_string()),
        }
    }

    let mut new_york = City::new(CityId::new(1), "New York City", "The one with that big park.");
    new_york.points_of_interest = vec![
        poi(
            1,
            "Central Park",
            "The most visited urban park in the United States.",
        ),
        poi(
            2,
            "Empire State Building",
            "A 102-story skyscraper located in Midtown Manhattan.",
        ),
    ];

    let mut antwerp = City::new(
        CityId::new(2),
        "Antwerp",
        "The one with the cathedral that was never really finished.",
    );
    antwerp.points_of_interest = vec![
        poi(
            3,
            "Cathedral of Our Lady",
            "A Gothic style cathedral, conceived by architects Jan and Pieter Appelmans.",
        ),
        poi(
            4,
            "Antwerp Central Station",
            "The finest example of railway architecture in Belgium.",
        ),
    ];

    let mut paris = City::new(CityId::new(3), "Paris", "The one with that big tower.");
    paris.points_of_interest = vec![
        poi(
            5,
            "Eiffel Tower",
            "A wrought-iron lattice tower on the Champ de Mars.",
        ),
        poi(6, "The Louvre", "The world's largest art museum."),
    ];

    let mut tehran = City::new(
        CityId::new(4),
        "Tehran",
        "The bustling capital with beautiful mountains in the north.",
    );
    tehran.points_of_interest = vec![
        poi(
            7,
            "Milad Tower",
            "A multi-purpose tower in Tehran. It is the sixth-tallest tower.",
        ),
        poi(
            8,
            "Golestan Palace",
            "The oldest of the historic monuments in Tehran, a world heritage site.",
        ),
    ];

    vec![new_york, antwerp, paris, tehran]
}
