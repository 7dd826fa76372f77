use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Review,
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub user_id: String,
    pub place_id: String,
    pub liked: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub place_id: String,
    pub user_id: String,
    pub text: String,
    pub rating: u8,
}

/// Records a like/dislike for a place.
///
/// Persistence failures surface as errors; silently losing an explicit user
/// action is worse than a visible failure.
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> AppResult<StatusCode> {
    if request.user_id.trim().is_empty() || request.place_id.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "user_id and place_id are required".to_string(),
        ));
    }

    state
        .feedback
        .record(request.user_id.trim(), request.place_id.trim(), request.liked)
        .await?;
    Ok(StatusCode::OK)
}

/// Stores a locally authored review
pub async fn add_review(
    State(state): State<AppState>,
    Json(request): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    if request.user_id.trim().is_empty() || request.place_id.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "user_id and place_id are required".to_string(),
        ));
    }

    let review = state
        .reviews
        .add(
            request.place_id.trim(),
            request.user_id.trim(),
            &request.text,
            request.rating,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Lists the stored reviews for one place
pub async fn place_reviews(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Json<Vec<Review>> {
    Json(state.reviews.for_place(&place_id).await)
}
