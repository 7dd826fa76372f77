//! Place data provider abstraction
//!
//! One adapter per external search API (Foursquare, Geoapify, OpenCage).
//! Adapters are stateless: each call issues a single HTTP request and maps
//! the raw JSON into `Place` records, substituting defaults for absent
//! optional fields. Failures come back as an error value so the aggregator
//! can keep going with the remaining providers.

use crate::{
    error::AppResult,
    models::{Coordinates, Place},
};

pub mod foursquare;
pub mod geoapify;
pub mod opencage;

pub use foursquare::FoursquareProvider;
pub use geoapify::GeoapifyProvider;
pub use opencage::OpenCageProvider;

/// Identifies one of the configured place-search providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderId {
    Foursquare,
    Geoapify,
    OpenCage,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Foursquare => "foursquare",
            ProviderId::Geoapify => "geoapify",
            ProviderId::OpenCage => "opencage",
        }
    }
}

/// What a provider is asked to search for.
///
/// Category vocabularies are not interchangeable across providers, so the
/// mood tables resolve a mood into the variant each provider understands:
/// numeric category codes for Foursquare, hierarchical slugs for Geoapify,
/// free text for OpenCage.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderQuery {
    Text(String),
    Categories(Vec<String>),
}

/// Trait for place-search providers
///
/// `search` returns every mapped result; entries the provider reports
/// without usable coordinates are skipped individually rather than failing
/// the batch.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlaceProvider: Send + Sync {
    /// Which provider this is, for mood-table lookup and logging
    fn id(&self) -> ProviderId;

    /// Run one search against the provider's HTTP API
    async fn search(
        &self,
        query: ProviderQuery,
        location: Option<Coordinates>,
        limit: Option<usize>,
    ) -> AppResult<Vec<Place>>;
}

/// Identifier for providers without a stable native place id
pub(crate) fn synthesize_id(name: &str, latitude: f64, longitude: f64) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("{}:{:.4}:{:.4}", slug, latitude, longitude)
}
