use rand::Rng;

use crate::models::Place;

/// Produces the match percentage attached to recommendations.
///
/// The production implementation is an intentional placeholder, not a real
/// relevance signal; keeping it behind a trait lets a future scorer (or a
/// deterministic test double) slot in without touching the aggregator.
pub trait MatchScorer: Send + Sync {
    /// Score in [0,100]
    fn score(&self, place: &Place) -> u8;
}

/// Uniformly random score in [80,100]
pub struct UniformScorer;

impl MatchScorer for UniformScorer {
    fn score(&self, _place: &Place) -> u8 {
        rand::thread_rng().gen_range(80..=100)
    }
}
