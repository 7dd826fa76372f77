//! Foursquare Places API provider
//!
//! Searches `/places/search` with API-key header auth. Foursquare is the
//! richest source here: native ids, a 0-10 rating (rescaled to 0-5),
//! descriptions and photos when the venue has them.

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{
        providers::{FsqPlace, FsqSearchResponse},
        Coordinates, Place, PLACEHOLDER_IMAGE,
    },
    services::{
        moods,
        providers::{PlaceProvider, ProviderId, ProviderQuery},
    },
};

const DEFAULT_LIMIT: usize = 10;

#[derive(Clone)]
pub struct FoursquareProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl FoursquareProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }

    /// Maps one raw result into a `Place`, or `None` when the entry is
    /// unusable (no coordinates)
    fn convert_place(&self, raw: FsqPlace) -> Option<Place> {
        let point = raw.geocodes.as_ref()?.main.as_ref()?;

        let name = raw
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                // Fall back to the first segment of the formatted address
                raw.location
                    .as_ref()
                    .and_then(|l| l.formatted_address.as_deref())
                    .and_then(|a| a.split(',').next())
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| "Unknown place".to_string());

        let category = raw
            .categories
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Place".to_string());

        let mood_tokens: Vec<&str> = raw
            .categories
            .iter()
            .flat_map(|c| [c.id.as_str(), c.name.as_str()])
            .collect();

        let address = raw
            .location
            .as_ref()
            .and_then(|l| l.formatted_address.clone())
            .or_else(|| {
                raw.location.as_ref().map(|l| {
                    [&l.address, &l.locality, &l.region, &l.postcode, &l.country]
                        .into_iter()
                        .filter_map(|part| part.as_deref())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
            })
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "Address not available".to_string());

        let description = raw
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| {
                format!("{} is an interesting place in the {} category.", name, category)
            });

        let image_url = raw
            .photos
            .first()
            .map(|p| p.url())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Some(Place {
            id: raw.fsq_id,
            name,
            category,
            // Foursquare rates 0-10, everything downstream expects 0-5
            rating: raw.rating.map(|r| r / 2.0),
            description,
            address,
            image_url,
            latitude: point.latitude,
            longitude: point.longitude,
            matching_moods: moods::moods_for_categories(ProviderId::Foursquare, mood_tokens),
            match_percentage: None,
            user_feedback: None,
        })
    }
}

#[async_trait::async_trait]
impl PlaceProvider for FoursquareProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Foursquare
    }

    async fn search(
        &self,
        query: ProviderQuery,
        location: Option<Coordinates>,
        limit: Option<usize>,
    ) -> AppResult<Vec<Place>> {
        let url = format!("{}/places/search", self.api_url);

        let mut params: Vec<(&str, String)> = match &query {
            ProviderQuery::Text(text) => vec![("query", text.clone())],
            ProviderQuery::Categories(ids) => vec![("categories", ids.join(","))],
        };
        if let Some(location) = location {
            params.push(("ll", format!("{},{}", location.latitude, location.longitude)));
        }
        params.push(("limit", limit.unwrap_or(DEFAULT_LIMIT).to_string()));

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Foursquare API returned status {}: {}",
                status, body
            )));
        }

        let search_response: FsqSearchResponse = response.json().await?;
        let places: Vec<Place> = search_response
            .results
            .into_iter()
            .filter_map(|raw| self.convert_place(raw))
            .collect();

        tracing::info!(
            results = places.len(),
            provider = "foursquare",
            "Place search completed"
        );

        Ok(places)
    }
}
