use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware,
    services::PlaceAggregator,
    store::{FeedbackStore, ReviewStore},
};

pub mod feedback;
pub mod places;
pub mod recommendations;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<PlaceAggregator>,
    pub feedback: FeedbackStore,
    pub reviews: ReviewStore,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::make_span))
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/places/search", get(places::search))
        .route("/places/popular", get(places::popular))
        .route("/places/:id", get(places::by_id))
        .route("/places/:id/reviews", get(feedback::place_reviews))
        .route("/recommendations", get(recommendations::recommend))
        .route("/feedback", post(feedback::submit))
        .route("/reviews", post(feedback::add_review))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
