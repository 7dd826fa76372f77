use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Coordinates, Place},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct LocationParams {
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Handler for free-text place search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Place>>> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let places = state
        .aggregator
        .search(params.q.trim(), location(params.lat, params.lon))
        .await;
    Ok(Json(places))
}

/// Handler for the generic points-of-interest listing
pub async fn popular(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> Json<Vec<Place>> {
    Json(state.aggregator.popular(location(params.lat, params.lon)).await)
}

/// Handler for single-place lookup
pub async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Place>> {
    let place = state.aggregator.place_by_id(&id).await?;
    Ok(Json(place))
}

/// A location bias is only usable when both coordinates arrived
pub(super) fn location(lat: Option<f64>, lon: Option<f64>) -> Option<Coordinates> {
    match (lat, lon) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_requires_both_coordinates() {
        assert!(location(Some(10.96), None).is_none());
        assert!(location(None, Some(-74.79)).is_none());
        let coords = location(Some(10.96), Some(-74.79)).unwrap();
        assert_eq!(coords.latitude, 10.96);
        assert_eq!(coords.longitude, -74.79);
    }
}
