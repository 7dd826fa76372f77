use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use moodmap_api::{
    error::{AppError, AppResult},
    models::{Coordinates, Mood, Place, PLACEHOLDER_IMAGE},
    routes::{create_router, AppState},
    services::{
        providers::{PlaceProvider, ProviderId, ProviderQuery},
        scoring::UniformScorer,
        PlaceAggregator,
    },
    store::{FeedbackStore, KeyValueStore, MemoryStore, ReviewStore},
};

/// Canned provider so tests never touch the network
struct StubProvider {
    provider_id: ProviderId,
    places: Vec<Place>,
    fail: bool,
}

impl StubProvider {
    fn returning(provider_id: ProviderId, places: Vec<Place>) -> Arc<dyn PlaceProvider> {
        Arc::new(Self {
            provider_id,
            places,
            fail: false,
        })
    }

    fn failing(provider_id: ProviderId) -> Arc<dyn PlaceProvider> {
        Arc::new(Self {
            provider_id,
            places: Vec::new(),
            fail: true,
        })
    }
}

#[async_trait::async_trait]
impl PlaceProvider for StubProvider {
    fn id(&self) -> ProviderId {
        self.provider_id
    }

    async fn search(
        &self,
        _query: ProviderQuery,
        _location: Option<Coordinates>,
        _limit: Option<usize>,
    ) -> AppResult<Vec<Place>> {
        if self.fail {
            Err(AppError::Provider("stubbed provider failure".to_string()))
        } else {
            Ok(self.places.clone())
        }
    }
}

fn make_place(id: &str, name: &str, lat: f64, lon: f64, moods: &[&str]) -> Place {
    Place {
        id: id.to_string(),
        name: name.to_string(),
        category: "Restaurant".to_string(),
        rating: Some(4.2),
        description: format!("{} is an interesting place.", name),
        address: "Calle 84, Barranquilla".to_string(),
        image_url: PLACEHOLDER_IMAGE.to_string(),
        latitude: lat,
        longitude: lon,
        matching_moods: moods.iter().map(|m| Mood::new(m)).collect(),
        match_percentage: None,
        user_feedback: None,
    }
}

fn create_test_server(providers: Vec<Arc<dyn PlaceProvider>>) -> TestServer {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let feedback = FeedbackStore::new(Arc::clone(&store));
    let reviews = ReviewStore::new(Arc::clone(&store));
    let aggregator = Arc::new(PlaceAggregator::new(
        providers,
        Arc::new(UniformScorer),
        feedback.clone(),
    ));

    let state = AppState {
        aggregator,
        feedback,
        reviews,
    };
    TestServer::new(create_router(state)).unwrap()
}

fn single_provider_server(places: Vec<Place>) -> TestServer {
    create_test_server(vec![
        StubProvider::returning(ProviderId::Foursquare, places),
        StubProvider::returning(ProviderId::Geoapify, vec![]),
        StubProvider::returning(ProviderId::OpenCage, vec![]),
    ])
}

#[tokio::test]
async fn test_health_check() {
    let server = single_provider_server(vec![]);
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_search_returns_places() {
    let server = single_provider_server(vec![make_place(
        "abc",
        "El Pibe",
        10.961,
        -74.791,
        &["hungry"],
    )]);

    let response = server
        .get("/api/v1/places/search")
        .add_query_param("q", "el pibe")
        .await;
    response.assert_status_ok();

    let places: Vec<serde_json::Value> = response.json();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0]["id"], "abc");
    assert_eq!(places[0]["name"], "El Pibe");
    assert_eq!(places[0]["rating"], 4.2);
    assert_eq!(places[0]["matchingMoods"], json!(["hungry"]));
}

#[tokio::test]
async fn test_search_rejects_empty_query() {
    let server = single_provider_server(vec![]);
    let response = server
        .get("/api/v1/places/search")
        .add_query_param("q", "  ")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_dedupes_across_providers() {
    let server = create_test_server(vec![
        StubProvider::returning(
            ProviderId::Foursquare,
            vec![make_place("f1", "La Cueva", 10.99311, -74.79992, &["social"])],
        ),
        StubProvider::returning(
            ProviderId::Geoapify,
            vec![make_place("g1", "la cueva", 10.99314, -74.79988, &["social"])],
        ),
        StubProvider::returning(ProviderId::OpenCage, vec![]),
    ]);

    let response = server
        .get("/api/v1/places/search")
        .add_query_param("q", "la cueva")
        .await;
    response.assert_status_ok();

    let places: Vec<serde_json::Value> = response.json();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0]["id"], "f1");
}

#[tokio::test]
async fn test_recommendations_with_feedback_overlay() {
    let server = single_provider_server(vec![
        make_place("p1", "Liked place", 10.96, -74.79, &["hungry"]),
        make_place("p2", "New place", 10.97, -74.80, &["hungry"]),
    ]);

    // Record a reaction first
    let response = server
        .post("/api/v1/feedback")
        .json(&json!({
            "user_id": "u1",
            "place_id": "p1",
            "liked": true
        }))
        .await;
    response.assert_status_ok();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("mood", "hungry")
        .add_query_param("user_id", "u1")
        .add_query_param("lat", "10.96")
        .add_query_param("lon", "-74.79")
        .await;
    response.assert_status_ok();

    let places: Vec<serde_json::Value> = response.json();
    assert_eq!(places.len(), 2);
    assert_eq!(places[0]["userFeedback"], "liked");
    assert_eq!(places[1]["userFeedback"], serde_json::Value::Null);

    for place in &places {
        let score = place["matchPercentage"].as_u64().unwrap();
        assert!((80..=100).contains(&score));
    }
}

#[tokio::test]
async fn test_recommendations_all_providers_down_returns_empty() {
    let server = create_test_server(vec![
        StubProvider::failing(ProviderId::Foursquare),
        StubProvider::failing(ProviderId::Geoapify),
        StubProvider::failing(ProviderId::OpenCage),
    ]);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("mood", "hungry")
        .add_query_param("user_id", "u1")
        .await;
    response.assert_status_ok();

    let places: Vec<serde_json::Value> = response.json();
    assert!(places.is_empty());
}

#[tokio::test]
async fn test_recommendations_require_mood_and_user() {
    let server = single_provider_server(vec![]);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("mood", "")
        .add_query_param("user_id", "u1")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("mood", "hungry")
        .add_query_param("user_id", " ")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_place_by_id_found_and_missing() {
    let server = single_provider_server(vec![make_place(
        "abc",
        "El Pibe",
        10.961,
        -74.791,
        &["hungry"],
    )]);

    let response = server.get("/api/v1/places/abc").await;
    response.assert_status_ok();
    let place: serde_json::Value = response.json();
    assert_eq!(place["id"], "abc");

    let empty_server = single_provider_server(vec![]);
    let response = empty_server.get("/api/v1/places/ghost").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_review_round_trip() {
    let server = single_provider_server(vec![]);

    let response = server
        .post("/api/v1/reviews")
        .json(&json!({
            "place_id": "p1",
            "user_id": "u1",
            "text": "Great arepas",
            "rating": 5
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    assert_eq!(created["placeId"], "p1");
    assert_eq!(created["rating"], 5);
    assert!(created["id"].as_str().unwrap().starts_with("review_"));

    // A review for another place should not appear in p1's list
    server
        .post("/api/v1/reviews")
        .json(&json!({
            "place_id": "p2",
            "user_id": "u1",
            "text": "Too loud",
            "rating": 2
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server.get("/api/v1/places/p1/reviews").await;
    response.assert_status_ok();
    let reviews: Vec<serde_json::Value> = response.json();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["text"], "Great arepas");
}

#[tokio::test]
async fn test_review_rating_validation() {
    let server = single_provider_server(vec![]);

    let response = server
        .post("/api/v1/reviews")
        .json(&json!({
            "place_id": "p1",
            "user_id": "u1",
            "text": "x",
            "rating": 9
        }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_feedback_requires_identifiers() {
    let server = single_provider_server(vec![]);

    let response = server
        .post("/api/v1/feedback")
        .json(&json!({
            "user_id": "",
            "place_id": "p1",
            "liked": true
        }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}
