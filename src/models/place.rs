use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Mood;

/// Image substituted when a provider supplies no photo
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/600/92c952";

/// A geographic point, decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Explicit user reaction to a recommended place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Liked,
    Disliked,
}

/// The normalized point-of-interest record every provider adapter maps into.
///
/// `id` is the provider-native identifier when one exists (e.g. a Foursquare
/// `fsq_id`); otherwise a value synthesized from geohash or name+coordinates.
/// Uniqueness is best effort, which is why deduplication also keys on
/// name+position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Normalized to a 0-5 scale; `None` for providers without ratings
    pub rating: Option<f64>,
    pub description: String,
    pub address: String,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Mood tags this place satisfies, from the inverse category mapping
    pub matching_moods: BTreeSet<Mood>,
    /// Synthetic relevance score in [80,100], attached at recommendation time
    pub match_percentage: Option<u8>,
    /// Prior reaction from the requesting user, joined in by place id
    pub user_feedback: Option<Feedback>,
}
