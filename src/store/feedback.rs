use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Feedback,
    store::KeyValueStore,
};

/// Per-user liked/disliked map, stored as one JSON object per user under
/// `feedback_<userId>`.
///
/// Reads degrade to empty (a recommendation without feedback overlay beats
/// no recommendation); writes propagate errors so a lost user action is
/// visible to the caller. Each user owns their own key, so a write never
/// touches another user's data.
#[derive(Clone)]
pub struct FeedbackStore {
    store: Arc<dyn KeyValueStore>,
}

impl FeedbackStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn key(user_id: &str) -> String {
        format!("feedback_{}", user_id)
    }

    /// All stored feedback for one user, keyed by place id
    pub async fn feedback_for(&self, user_id: &str) -> HashMap<String, Feedback> {
        match self.store.get(&Self::key(user_id)).await {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(user_id = %user_id, error = %e, "Stored feedback is malformed, treating as empty");
                HashMap::new()
            }),
            Ok(None) => HashMap::new(),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Feedback read failed, treating as empty");
                HashMap::new()
            }
        }
    }

    /// Records a reaction, replacing any previous one for the same place
    pub async fn record(&self, user_id: &str, place_id: &str, liked: bool) -> AppResult<()> {
        let key = Self::key(user_id);

        let mut feedback: HashMap<String, Feedback> = match self.store.get(&key).await? {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => HashMap::new(),
        };

        feedback.insert(
            place_id.to_string(),
            if liked { Feedback::Liked } else { Feedback::Disliked },
        );

        let json = serde_json::to_string(&feedback)
            .map_err(|e| AppError::Internal(format!("Feedback serialization error: {}", e)))?;
        self.store.set(&key, json).await
    }
}
