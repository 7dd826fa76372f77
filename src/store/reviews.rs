use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Review,
    store::KeyValueStore,
};

const REVIEWS_KEY: &str = "user_reviews";

/// Locally authored reviews, stored as one JSON array under `user_reviews`.
///
/// Same policy as feedback: reads degrade to an empty list, writes
/// propagate errors.
#[derive(Clone)]
pub struct ReviewStore {
    store: Arc<dyn KeyValueStore>,
}

impl ReviewStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Appends a review and returns the stored record
    pub async fn add(
        &self,
        place_id: &str,
        user_id: &str,
        text: &str,
        rating: u8,
    ) -> AppResult<Review> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::InvalidInput(
                "Review rating must be between 1 and 5".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Review text cannot be empty".to_string(),
            ));
        }

        let mut reviews = match self.store.get(REVIEWS_KEY).await? {
            Some(json) => serde_json::from_str::<Vec<Review>>(&json).unwrap_or_default(),
            None => Vec::new(),
        };

        let review = Review::new(
            place_id.to_string(),
            user_id.to_string(),
            text.trim().to_string(),
            rating,
        );
        reviews.push(review.clone());

        let json = serde_json::to_string(&reviews)
            .map_err(|e| AppError::Internal(format!("Review serialization error: {}", e)))?;
        self.store.set(REVIEWS_KEY, json).await?;

        Ok(review)
    }

    /// All reviews for one place
    pub async fn for_place(&self, place_id: &str) -> Vec<Review> {
        let reviews = match self.store.get(REVIEWS_KEY).await {
            Ok(Some(json)) => serde_json::from_str::<Vec<Review>>(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored reviews are malformed, treating as empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Review read failed, treating as empty");
                Vec::new()
            }
        };

        reviews
            .into_iter()
            .filter(|r| r.place_id == place_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, MockKeyValueStore};

    fn memory_store() -> ReviewStore {
        ReviewStore::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_add_and_filter_by_place() {
        let store = memory_store();
        store.add("p1", "u1", "Great arepas", 5).await.unwrap();
        store.add("p2", "u1", "Too loud", 2).await.unwrap();
        store.add("p1", "u2", "Solid spot", 4).await.unwrap();

        let reviews = store.for_place("p1").await;
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.place_id == "p1"));
    }

    #[tokio::test]
    async fn test_rating_out_of_range_rejected() {
        let store = memory_store();
        assert!(store.add("p1", "u1", "x", 0).await.is_err());
        assert!(store.add("p1", "u1", "x", 6).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let store = memory_store();
        assert!(store.add("p1", "u1", "   ", 3).await.is_err());
    }

    #[tokio::test]
    async fn test_no_reviews_yields_empty() {
        let store = memory_store();
        assert!(store.for_place("p1").await.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_get().returning(|_| Ok(None));
        kv.expect_set()
            .returning(|_, _| Err(AppError::Internal("store offline".to_string())));

        let store = ReviewStore::new(Arc::new(kv));
        assert!(store.add("p1", "u1", "text", 3).await.is_err());
    }
}
