//! OpenCage geocoding provider
//!
//! OpenCage is a geocoder, not a venue database: no stable place ids, no
//! ratings, no photos, no category vocabulary. It still earns its place in
//! the fan-out because its free-text matching surfaces results the category
//! APIs miss. Ids come from the geohash annotation or are synthesized.

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{
        providers::{OpenCageResponse, OpenCageResult},
        Coordinates, Place, PLACEHOLDER_IMAGE,
    },
    services::{
        moods,
        providers::{self, PlaceProvider, ProviderId, ProviderQuery},
    },
};

const DEFAULT_LIMIT: usize = 20;

#[derive(Clone)]
pub struct OpenCageProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OpenCageProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }

    fn convert_result(&self, raw: OpenCageResult) -> Option<Place> {
        let point = raw.geometry.as_ref()?;
        let components = &raw.components;

        let name = [
            &components.amenity,
            &components.shop,
            &components.tourism,
            &components.road,
            &components.neighbourhood,
        ]
        .into_iter()
        .find_map(|part| part.clone())
        .or_else(|| {
            raw.formatted
                .as_deref()
                .and_then(|f| f.split(',').next())
                .map(|s| s.trim().to_string())
        })
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown place".to_string());

        let id = raw
            .annotations
            .geohash
            .clone()
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| providers::synthesize_id(&name, point.lat, point.lng));

        let mood_tokens: Vec<&str> = [
            &components.category,
            &components.place_type,
            &components.amenity,
            &components.shop,
            &components.tourism,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();

        let category = [
            &components.amenity,
            &components.shop,
            &components.tourism,
            &components.place_type,
            &components.category,
        ]
        .into_iter()
        .find_map(|part| part.clone())
        .unwrap_or_else(|| "Place".to_string());

        let address = raw
            .formatted
            .clone()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| "Address not available".to_string());

        Some(Place {
            id,
            matching_moods: moods::moods_for_categories(ProviderId::OpenCage, mood_tokens),
            name,
            category,
            rating: None,
            // The formatted address doubles as the best available description
            description: address.clone(),
            address,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            latitude: point.lat,
            longitude: point.lng,
            match_percentage: None,
            user_feedback: None,
        })
    }
}

#[async_trait::async_trait]
impl PlaceProvider for OpenCageProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenCage
    }

    async fn search(
        &self,
        query: ProviderQuery,
        location: Option<Coordinates>,
        limit: Option<usize>,
    ) -> AppResult<Vec<Place>> {
        let url = format!("{}/geocode/v1/json", self.api_url);

        let text = match &query {
            ProviderQuery::Text(text) => text.clone(),
            // No category vocabulary; the best rendition is the slugs as text
            ProviderQuery::Categories(slugs) => slugs.join(" "),
        };

        let mut params: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("q", text),
            ("limit", limit.unwrap_or(DEFAULT_LIMIT).to_string()),
            ("no_annotations", "0".to_string()),
        ];
        if let Some(location) = location {
            params.push((
                "proximity",
                format!("{},{}", location.latitude, location.longitude),
            ));
        }

        let response = self.http_client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "OpenCage API returned status {}: {}",
                status, body
            )));
        }

        let search_response: OpenCageResponse = response.json().await?;
        let places: Vec<Place> = search_response
            .results
            .into_iter()
            .filter_map(|raw| self.convert_result(raw))
            .collect();

        tracing::info!(
            results = places.len(),
            provider = "opencage",
            "Place search completed"
        );

        Ok(places)
    }
}
