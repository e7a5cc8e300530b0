use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use serde_json::json;

use cityinfo_core::{City, CityId, DomainResult, PoiDraft, PoiId, PointOfInterest};
use cityinfo_infra::{CityRepository, InMemoryCityStore, Notifier};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: Arc<dyn CityRepository>, notifier: Arc<dyn Notifier>) -> Self {
        // Build the app (same router as prod), but bind to an ephemeral port.
        let app = cityinfo_api::app::build_app(store, notifier);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Notifier that records every call for collaborator verification.
#[derive(Debug, Default)]
struct RecordingNotifier {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, subject: &str, body: &str) {
        self.calls
            .lock()
            .unwrap()
            .push((subject.to_string(), body.to_string()));
    }
}

/// Repository wrapper that records which operations were invoked.
struct CountingStore {
    inner: InMemoryCityStore,
    calls: Mutex<Vec<&'static str>>,
}

impl CountingStore {
    fn new(inner: InMemoryCityStore) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str) {
        self.calls.lock().unwrap().push(op);
    }
}

impl CityRepository for CountingStore {
    fn exists(&self, city_id: CityId) -> DomainResult<bool> {
        self.record("exists");
        self.inner.exists(city_id)
    }

    fn find(&self, city_id: CityId) -> DomainResult<Option<City>> {
        self.record("find");
        self.inner.find(city_id)
    }

    fn list_cities(&self) -> DomainResult<Vec<City>> {
        self.record("list_cities");
        self.inner.list_cities()
    }

    fn list_for_city(&self, city_id: CityId) -> DomainResult<Vec<PointOfInterest>> {
        self.record("list_for_city");
        self.inner.list_for_city(city_id)
    }

    fn get(&self, city_id: CityId, poi_id: PoiId) -> DomainResult<Option<PointOfInterest>> {
        self.record("get");
        self.inner.get(city_id, poi_id)
    }

    fn create(&self, city_id: CityId, draft: PoiDraft) -> DomainResult<PointOfInterest> {
        self.record("create");
        self.inner.create(city_id, draft)
    }

    fn replace(&self, city_id: CityId, poi_id: PoiId, draft: PoiDraft) -> DomainResult<()> {
        self.record("replace");
        self.inner.replace(city_id, poi_id, draft)
    }

    fn delete(&self, city_id: CityId, poi_id: PoiId) -> DomainResult<PointOfInterest> {
        self.record("delete");
        self.inner.delete(city_id, poi_id)
    }

    fn save(&self) -> DomainResult<()> {
        self.record("save");
        self.inner.save()
    }
}

/// Two cities with two points of interest each, ids 1..=4.
fn fixture_store() -> InMemoryCityStore {
    fn poi(id: u64, name: &str, description: &str) -> PointOfInterest {
        PointOfInterest {
            id: PoiId::new(id),
            name: name.to_string(),
            description: Some(description.to_string()),
        }
    }

    let mut new_york = City::new(CityId::new(1), "New York City", "The one with that big park.");
    new_york.points_of_interest = vec![
        poi(1, "Central Park", "The most visited urban park in the United States."),
        poi(2, "Empire State Building", "A 102-story skyscraper."),
    ];

    let mut antwerp = City::new(CityId::new(2), "Antwerp", "The one with the cathedral.");
    antwerp.points_of_interest = vec![
        poi(3, "Cathedral of Our Lady", "A Gothic style cathedral."),
        poi(4, "Antwerp Central Station", "Railway architecture in Belgium."),
    ];

    InMemoryCityStore::with_cities(vec![new_york, antwerp])
}

async fn spawn_fixture_server() -> (TestServer, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let srv = TestServer::spawn(Arc::new(fixture_store()), notifier.clone()).await;
    (srv, notifier)
}

/// The delete notification is dispatched on a spawned task; poll briefly
/// until it lands.
async fn notifications_eventually(notifier: &RecordingNotifier, count: usize) -> Vec<(String, String)> {
    for _ in 0..50 {
        let calls = notifier.calls();
        if calls.len() >= count {
            return calls;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("notification did not arrive within timeout");
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let (srv, _) = spawn_fixture_server().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_and_get_cities() {
    let (srv, _) = spawn_fixture_server().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/cities", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let cities: serde_json::Value = res.json().await.unwrap();
    assert_eq!(cities.as_array().unwrap().len(), 2);

    let res = client
        .get(format!("{}/cities/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let city: serde_json::Value = res.json().await.unwrap();
    assert_eq!(city["name"], "New York City");
    assert_eq!(city["points_of_interest"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_city_is_404_without_touching_poi_operations() {
    let store = Arc::new(CountingStore::new(fixture_store()));
    let notifier = Arc::new(RecordingNotifier::default());
    let srv = TestServer::spawn(store.clone(), notifier).await;

    let res = reqwest::Client::new()
        .get(format!("{}/cities/999", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Only the registry lookup ran; no POI operation was invoked.
    assert_eq!(store.calls(), vec!["find"]);
}

#[tokio::test]
async fn list_points_of_interest_for_city() {
    let (srv, _) = spawn_fixture_server().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/cities/2/pois", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let pois: serde_json::Value = res.json().await.unwrap();
    assert_eq!(pois.as_array().unwrap().len(), 2);
    assert_eq!(pois[0]["name"], "Cathedral of Our Lady");

    let res = client
        .get(format!("{}/cities/999/pois", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_point_of_interest_is_scoped_to_its_city() {
    let (srv, _) = spawn_fixture_server().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/cities/2/pois/3", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let poi: serde_json::Value = res.json().await.unwrap();
    assert_eq!(poi["id"], 3);
    assert_eq!(poi["name"], "Cathedral of Our Lady");

    // Id 3 belongs to city 2; it must not resolve under city 1.
    let res = client
        .get(format!("{}/cities/1/pois/3", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_point_of_interest_assigns_global_max_plus_one() {
    let (srv, _) = spawn_fixture_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/cities/1/pois", srv.base_url))
        .json(&json!({ "name": "Times Square", "description": "A major commercial intersection." }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        res.headers()[reqwest::header::LOCATION],
        "/cities/1/pois/5"
    );
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["id"], 5);
    assert_eq!(created["name"], "Times Square");

    // The Location target resolves.
    let res = client
        .get(format!("{}/cities/1/pois/5", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_rejects_invalid_bodies() {
    let (srv, _) = spawn_fixture_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/cities/1/pois", srv.base_url))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["violations"][0]["field"], "name");

    // Nothing was created.
    let res = client
        .get(format!("{}/cities/1/pois", srv.base_url))
        .send()
        .await
        .unwrap();
    let pois: serde_json::Value = res.json().await.unwrap();
    assert_eq!(pois.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_in_missing_city_is_404() {
    let (srv, _) = spawn_fixture_server().await;

    let res = reqwest::Client::new()
        .post(format!("{}/cities/999/pois", srv.base_url))
        .json(&json!({ "name": "Nowhere" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn replace_overwrites_both_editable_fields() {
    let (srv, _) = spawn_fixture_server().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/cities/1/pois/2", srv.base_url))
        .json(&json!({ "name": "Updated Building" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let poi: serde_json::Value = client
        .get(format!("{}/cities/1/pois/2", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(poi["id"], 2);
    assert_eq!(poi["name"], "Updated Building");
    assert_eq!(poi["description"], serde_json::Value::Null);

    let res = client
        .put(format!("{}/cities/1/pois/999", srv.base_url))
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_replaces_a_single_field() {
    let (srv, _) = spawn_fixture_server().await;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("{}/cities/1/pois/1", srv.base_url))
        .json(&json!([{ "op": "replace", "path": "/name", "value": "Great Lawn" }]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let poi: serde_json::Value = client
        .get(format!("{}/cities/1/pois/1", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(poi["name"], "Great Lawn");
    // The untouched field is preserved.
    assert_eq!(
        poi["description"],
        "The most visited urban park in the United States."
    );
}

#[tokio::test]
async fn failed_patch_leaves_the_stored_entity_unchanged() {
    let (srv, _) = spawn_fixture_server().await;
    let client = reqwest::Client::new();

    let before: serde_json::Value = client
        .get(format!("{}/cities/1/pois/2", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Post-patch validation failure: emptied name.
    let res = client
        .patch(format!("{}/cities/1/pois/2", srv.base_url))
        .json(&json!([
            { "op": "replace", "path": "/description", "value": "changed" },
            { "op": "replace", "path": "/name", "value": "" }
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["violations"][0]["field"], "name");

    // Malformed patch: unknown path.
    let res = client
        .patch(format!("{}/cities/1/pois/2", srv.base_url))
        .json(&json!([{ "op": "replace", "path": "/id", "value": "9" }]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "malformed_patch");

    // Unsupported op kind.
    let res = client
        .patch(format!("{}/cities/1/pois/2", srv.base_url))
        .json(&json!([{ "op": "copy", "path": "/name", "value": "x" }]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // No attempt changed the stored entity.
    let after: serde_json::Value = client
        .get(format!("{}/cities/1/pois/2", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn patch_missing_poi_is_404() {
    let (srv, _) = spawn_fixture_server().await;

    let res = reqwest::Client::new()
        .patch(format!("{}/cities/1/pois/999", srv.base_url))
        .json(&json!([{ "op": "replace", "path": "/name", "value": "x" }]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_poi_and_notifies_once() {
    let (srv, notifier) = spawn_fixture_server().await;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!("{}/cities/2/pois/3", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Gone, and not resolvable from any city.
    for city in [1, 2] {
        let res = client
            .get(format!("{}/cities/{}/pois/3", srv.base_url, city))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    // The sibling is unaffected.
    let res = client
        .get(format!("{}/cities/2/pois/4", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Exactly one notification, naming the removed entity.
    let calls = notifications_eventually(&notifier, 1).await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Point of interest deleted");
    assert!(calls[0].1.contains("Cathedral of Our Lady"));
    assert!(calls[0].1.contains("3"));

    // Deleting again is a 404 and does not notify again.
    let res = client
        .delete(format!("{}/cities/2/pois/3", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(notifier.calls().len(), 1);
}

#[tokio::test]
async fn deleted_ids_are_not_reassigned() {
    let (srv, _) = spawn_fixture_server().await;
    let client = reqwest::Client::new();

    // Delete the current maximum id.
    let res = client
        .delete(format!("{}/cities/2/pois/4", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .post(format!("{}/cities/2/pois", srv.base_url))
        .json(&json!({ "name": "Rubens House" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["id"], 5);
}
