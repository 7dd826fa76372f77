use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Mood, Place},
};

use super::{places, AppState};

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    mood: String,
    user_id: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Handler for mood-driven recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> AppResult<Json<Vec<Place>>> {
    if params.mood.trim().is_empty() {
        return Err(AppError::InvalidInput("Mood cannot be empty".to_string()));
    }
    if params.user_id.trim().is_empty() {
        return Err(AppError::InvalidInput("User id cannot be empty".to_string()));
    }

    let mood = Mood::new(&params.mood);
    let places = state
        .aggregator
        .recommend(
            &mood,
            params.user_id.trim(),
            places::location(params.lat, params.lon),
        )
        .await;
    Ok(Json(places))
}
