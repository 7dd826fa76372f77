//! Raw response schemas for the external place-search APIs.
//!
//! Each provider gets an explicit serde schema validated at the boundary;
//! adapters map these into [`Place`](super::Place) and substitute defaults
//! for absent optional fields instead of failing.

use serde::{Deserialize, Deserializer};

// ============================================================================
// Foursquare Places API Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct FsqSearchResponse {
    #[serde(default)]
    pub results: Vec<FsqPlace>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FsqPlace {
    pub fsq_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories: Vec<FsqCategory>,
    /// Foursquare rates on a 0-10 scale
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<FsqLocation>,
    #[serde(default)]
    pub geocodes: Option<FsqGeocodes>,
    #[serde(default)]
    pub photos: Vec<FsqPhoto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FsqCategory {
    /// Numeric in current API responses, string in older ones
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FsqLocation {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FsqGeocodes {
    #[serde(default)]
    pub main: Option<FsqPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FsqPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FsqPhoto {
    pub prefix: String,
    pub suffix: String,
}

impl FsqPhoto {
    /// Foursquare photo URLs are assembled as `{prefix}{size}{suffix}`
    pub fn url(&self) -> String {
        format!("{}original{}", self.prefix, self.suffix)
    }
}

// ============================================================================
// Geoapify Places API Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct GeoapifyResponse {
    #[serde(default)]
    pub features: Vec<GeoapifyFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoapifyFeature {
    pub properties: GeoapifyProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoapifyProperties {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    /// Hierarchical slugs, e.g. `catering.restaurant.pizza`
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub formatted: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

// ============================================================================
// OpenCage Geocoding API Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct OpenCageResponse {
    #[serde(default)]
    pub results: Vec<OpenCageResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenCageResult {
    #[serde(default)]
    pub formatted: Option<String>,
    #[serde(default)]
    pub components: OpenCageComponents,
    #[serde(default)]
    pub geometry: Option<OpenCagePoint>,
    #[serde(default)]
    pub annotations: OpenCageAnnotations,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenCageComponents {
    #[serde(rename = "_category", default)]
    pub category: Option<String>,
    #[serde(rename = "_type", default)]
    pub place_type: Option<String>,
    #[serde(default)]
    pub amenity: Option<String>,
    #[serde(default)]
    pub shop: Option<String>,
    #[serde(default)]
    pub tourism: Option<String>,
    #[serde(default)]
    pub road: Option<String>,
    #[serde(default)]
    pub neighbourhood: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenCagePoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenCageAnnotations {
    #[serde(default)]
    pub geohash: Option<String>,
}

/// Accepts `"13065"` or `13065` for the same field
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::String(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
