//! Aggregation orchestrator
//!
//! Fans a search or recommendation request out to every configured provider,
//! tolerates partial provider failure, collapses duplicates, and annotates
//! the survivors with a match percentage and the requesting user's stored
//! feedback.
//!
//! Providers are queried concurrently but their results are concatenated in
//! the configured order (Foursquare, Geoapify, OpenCage), which is what
//! makes the deduplicator's first-wins tie-break deterministic.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Coordinates, Mood, Place},
    services::{
        dedup,
        moods,
        providers::{PlaceProvider, ProviderQuery},
        scoring::MatchScorer,
    },
    store::FeedbackStore,
};

const RECOMMEND_LIMIT: usize = 10;
const POPULAR_LIMIT: usize = 10;
const POPULAR_QUERY: &str = "points of interest";

pub struct PlaceAggregator {
    providers: Vec<Arc<dyn PlaceProvider>>,
    scorer: Arc<dyn MatchScorer>,
    feedback: FeedbackStore,
}

impl PlaceAggregator {
    pub fn new(
        providers: Vec<Arc<dyn PlaceProvider>>,
        scorer: Arc<dyn MatchScorer>,
        feedback: FeedbackStore,
    ) -> Self {
        Self {
            providers,
            scorer,
            feedback,
        }
    }

    /// Mood-driven recommendations for one user.
    ///
    /// An empty result means either no matches or every provider failed;
    /// callers cannot tell the two apart, so the distinction is logged here.
    pub async fn recommend(
        &self,
        mood: &Mood,
        user_id: &str,
        location: Option<Coordinates>,
    ) -> Vec<Place> {
        let queries: Vec<Option<ProviderQuery>> = self
            .providers
            .iter()
            .map(|provider| moods::mood_query(provider.id(), mood))
            .collect();

        let collected = self.fan_out(queries, location, Some(RECOMMEND_LIMIT)).await;
        let mut places = dedup::dedupe(collected);

        let feedback = self.feedback.feedback_for(user_id).await;
        for place in &mut places {
            place.match_percentage = Some(self.scorer.score(place));
            place.user_feedback = feedback.get(&place.id).copied();
        }

        tracing::info!(
            mood = %mood,
            user_id = %user_id,
            results = places.len(),
            "Recommendations assembled"
        );

        places
    }

    /// Free-text search across all providers, no mood filter
    pub async fn search(&self, query: &str, location: Option<Coordinates>) -> Vec<Place> {
        let places = self.text_fan_out(query, location, None).await;

        tracing::info!(query = %query, results = places.len(), "Place search assembled");

        places
    }

    /// A generic interest search used for the home screen
    pub async fn popular(&self, location: Option<Coordinates>) -> Vec<Place> {
        self.text_fan_out(POPULAR_QUERY, location, Some(POPULAR_LIMIT))
            .await
    }

    /// Best-effort single-place lookup by id or name.
    ///
    /// None of the providers except Foursquare has a details endpoint, so
    /// this searches for the term and takes the top hit.
    pub async fn place_by_id(&self, id: &str) -> AppResult<Place> {
        self.text_fan_out(id, None, Some(1))
            .await
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Place {} not found", id)))
    }

    async fn text_fan_out(
        &self,
        text: &str,
        location: Option<Coordinates>,
        limit: Option<usize>,
    ) -> Vec<Place> {
        let query = ProviderQuery::Text(text.to_string());
        let queries = self.providers.iter().map(|_| Some(query.clone())).collect();
        dedup::dedupe(self.fan_out(queries, location, limit).await)
    }

    /// Issues one search per provider concurrently and concatenates the
    /// successful batches in provider order. A provider with no query for
    /// this request (`None`) is skipped; a failing provider contributes
    /// nothing.
    async fn fan_out(
        &self,
        queries: Vec<Option<ProviderQuery>>,
        location: Option<Coordinates>,
        limit: Option<usize>,
    ) -> Vec<Place> {
        let mut tasks = Vec::with_capacity(self.providers.len());

        for (provider, query) in self.providers.iter().zip(queries) {
            let provider_id = provider.id();
            let Some(query) = query else {
                tracing::debug!(
                    provider = provider_id.as_str(),
                    "No query for this provider, skipping"
                );
                continue;
            };

            let provider = Arc::clone(provider);
            let handle =
                tokio::spawn(async move { provider.search(query, location, limit).await });
            tasks.push((provider_id, handle));
        }

        let mut places = Vec::new();
        let mut failed = 0usize;

        for (provider_id, handle) in tasks {
            match handle.await {
                Ok(Ok(batch)) => places.extend(batch),
                Ok(Err(e)) => {
                    failed += 1;
                    tracing::warn!(
                        provider = provider_id.as_str(),
                        error = %e,
                        "Provider search failed, continuing without it"
                    );
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!(
                        provider = provider_id.as_str(),
                        error = %e,
                        "Provider task failed to complete"
                    );
                }
            }
        }

        if places.is_empty() && failed > 0 {
            tracing::warn!(
                failed_providers = failed,
                "Empty result with provider failures; callers see it as no matches"
            );
        }

        places
    }
}
