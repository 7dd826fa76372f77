use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A locally authored place review
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
    /// 1-5 stars
    pub rating: u8,
    pub date: DateTime<Utc>,
    pub is_anonymous: bool,
}

impl Review {
    pub fn new(place_id: String, user_id: String, text: String, rating: u8) -> Self {
        Self {
            id: format!("review_{}", Uuid::new_v4()),
            place_id,
            user_id,
            text,
            rating,
            date: Utc::now(),
            is_anonymous: true,
        }
    }
}
