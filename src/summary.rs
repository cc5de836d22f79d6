/// Read-only views over a ranked result set.
use crate::models::{Intent, ScoredLead};
use serde::Serialize;

/// Aggregate statistics for a scoring run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Mean score rounded to one decimal; 0 for an empty run.
    pub average_score: f64,
    pub min_score: Option<u8>,
    pub max_score: Option<u8>,
}

impl ResultsSummary {
    pub fn from_results(results: &[ScoredLead]) -> Self {
        let count = |intent: Intent| results.iter().filter(|r| r.intent == intent).count();

        let total_points: u64 = results.iter().map(|r| u64::from(r.score)).sum();
        let average_score = if results.is_empty() {
            0.0
        } else {
            (total_points as f64 / results.len() as f64 * 10.0).round() / 10.0
        };

        Self {
            total: results.len(),
            high: count(Intent::High),
            medium: count(Intent::Medium),
            low: count(Intent::Low),
            average_score,
            min_score: results.iter().map(|r| r.score).min(),
            max_score: results.iter().map(|r| r.score).max(),
        }
    }
}

/// Results with the given final intent, in ranked order.
pub fn filter_by_intent(results: &[ScoredLead], intent: Intent) -> Vec<&ScoredLead> {
    results.iter().filter(|r| r.intent == intent).collect()
}
