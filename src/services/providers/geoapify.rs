//! Geoapify Places API provider
//!
//! Searches `/v2/places`, which is category-driven: mood searches send the
//! mood's category slugs, free-text searches send the broad default slugs
//! plus a `name` filter. Geoapify supplies no ratings or photos.

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{
        providers::{GeoapifyFeature, GeoapifyResponse},
        Coordinates, Place, PLACEHOLDER_IMAGE,
    },
    services::{
        moods,
        providers::{self, PlaceProvider, ProviderId, ProviderQuery},
    },
};

const DEFAULT_LIMIT: usize = 20;
const PROXIMITY_RADIUS_METERS: u32 = 5_000;

#[derive(Clone)]
pub struct GeoapifyProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GeoapifyProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }

    fn convert_feature(&self, feature: GeoapifyFeature) -> Option<Place> {
        let properties = feature.properties;
        let (latitude, longitude) = match (properties.lat, properties.lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return None,
        };

        let name = properties
            .name
            .clone()
            .or(properties.address_line1.clone())
            .or_else(|| {
                properties
                    .formatted
                    .as_deref()
                    .and_then(|f| f.split(',').next())
                    .map(|s| s.trim().to_string())
            })
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown place".to_string());

        let id = properties
            .place_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| providers::synthesize_id(&name, latitude, longitude));

        let category = properties
            .categories
            .first()
            .map(|slug| friendly_label(slug))
            .unwrap_or_else(|| "Place".to_string());

        let address = properties
            .formatted
            .clone()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| "Address not available".to_string());

        let matching_moods = moods::moods_for_categories(
            ProviderId::Geoapify,
            properties.categories.iter().map(String::as_str),
        );

        Some(Place {
            id,
            name: name.clone(),
            description: format!("{} is an interesting place in the {} category.", name, category),
            category,
            rating: None,
            address,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            latitude,
            longitude,
            matching_moods,
            match_percentage: None,
            user_feedback: None,
        })
    }
}

/// `catering.restaurant` -> `Restaurant`, `leisure.spa` -> `Spa`
fn friendly_label(slug: &str) -> String {
    let last = slug.rsplit('.').next().unwrap_or(slug);
    let spaced = last.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Place".to_string(),
    }
}

#[async_trait::async_trait]
impl PlaceProvider for GeoapifyProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Geoapify
    }

    async fn search(
        &self,
        query: ProviderQuery,
        location: Option<Coordinates>,
        limit: Option<usize>,
    ) -> AppResult<Vec<Place>> {
        let url = format!("{}/v2/places", self.api_url);

        let mut params: Vec<(&str, String)> = vec![("apiKey", self.api_key.clone())];
        match &query {
            ProviderQuery::Categories(slugs) => {
                params.push(("categories", slugs.join(",")));
            }
            ProviderQuery::Text(text) => {
                params.push(("categories", moods::geoapify_default_categories().join(",")));
                params.push(("name", text.clone()));
            }
        }
        if let Some(location) = location {
            params.push((
                "filter",
                format!(
                    "circle:{},{},{}",
                    location.longitude, location.latitude, PROXIMITY_RADIUS_METERS
                ),
            ));
            params.push((
                "bias",
                format!("proximity:{},{}", location.longitude, location.latitude),
            ));
        }
        params.push(("limit", limit.unwrap_or(DEFAULT_LIMIT).to_string()));

        let response = self.http_client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Geoapify API returned status {}: {}",
                status, body
            )));
        }

        let search_response: GeoapifyResponse = response.json().await?;
        let places: Vec<Place> = search_response
            .features
            .into_iter()
            .filter_map(|feature| self.convert_feature(feature))
            .collect();

        tracing::info!(
            results = places.len(),
            provider = "geoapify",
            "Place search completed"
        );

        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;

    fn create_test_provider() -> GeoapifyProvider {
        GeoapifyProvider::new(
            reqwest::Client::new(),
            "test_key".to_string(),
            "http://test.local".to_string(),
        )
    }

    #[test]
    fn test_convert_feature_full_record() {
        let provider = create_test_provider();
        let feature: GeoapifyFeature = serde_json::from_str(
            r#"{
                "properties": {
                    "place_id": "51abc",
                    "name": "Parque Venezuela",
                    "categories": ["leisure.park"],
                    "formatted": "Parque Venezuela, Barranquilla, Colombia",
                    "lat": 10.9878,
                    "lon": -74.7889
                }
            }"#,
        )
        .unwrap();

        let place = provider.convert_feature(feature).unwrap();
        assert_eq!(place.id, "51abc");
        assert_eq!(place.name, "Parque Venezuela");
        assert_eq!(place.category, "Park");
        assert_eq!(place.rating, None);
        assert_eq!(place.address, "Parque Venezuela, Barranquilla, Colombia");
        assert_eq!(place.image_url, PLACEHOLDER_IMAGE);
        assert!(place.matching_moods.contains(&Mood::new("relaxed")));
    }

    #[test]
    fn test_convert_feature_without_coordinates_is_skipped() {
        let provider = create_test_provider();
        let feature: GeoapifyFeature = serde_json::from_str(
            r#"{"properties": {"place_id": "51abc", "name": "Nowhere"}}"#,
        )
        .unwrap();
        assert!(provider.convert_feature(feature).is_none());
    }

    #[test]
    fn test_convert_feature_synthesizes_id() {
        let provider = create_test_provider();
        let feature: GeoapifyFeature = serde_json::from_str(
            r#"{
                "properties": {
                    "name": "Cafe Macondo",
                    "lat": 10.9937,
                    "lon": -74.7988
                }
            }"#,
        )
        .unwrap();

        let place = provider.convert_feature(feature).unwrap();
        assert_eq!(place.id, "cafe-macondo:10.9937:-74.7988");
    }

    #[test]
    fn test_convert_feature_name_falls_back_to_address_line() {
        let provider = create_test_provider();
        let feature: GeoapifyFeature = serde_json::from_str(
            r#"{
                "properties": {
                    "address_line1": "Carrera 43 #70-10",
                    "lat": 10.99,
                    "lon": -74.80
                }
            }"#,
        )
        .unwrap();

        let place = provider.convert_feature(feature).unwrap();
        assert_eq!(place.name, "Carrera 43 #70-10");
    }

    #[test]
    fn test_friendly_label() {
        assert_eq!(friendly_label("catering.restaurant"), "Restaurant");
        assert_eq!(friendly_label("entertainment.theme_park"), "Theme park");
        assert_eq!(friendly_label("natural"), "Natural");
    }
}
