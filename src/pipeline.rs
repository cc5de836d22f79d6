/// Scoring pipeline driver and the caller-owned scoring context.
///
/// Workflow per lead, in upload order:
/// 1. Rule scorer
/// 2. Intent classifier
/// 3. Score composer (rule-only when the classifier errors)
///
/// The finished collection is sorted by descending score; ties keep input order.
use crate::classifier::IntentClassifier;
use crate::composer::{compose, compose_rule_only};
use crate::errors::{AppError, ResultExt};
use crate::models::{Lead, Offer, ScoredLead};
use crate::rules::score_lead;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Scores every lead sequentially and returns them ranked.
///
/// Never fails: a classifier error degrades only the affected lead.
pub async fn score_leads<C>(leads: &[Lead], offer: &Offer, classifier: &C) -> Vec<ScoredLead>
where
    C: IntentClassifier + ?Sized,
{
    let mut scored = Vec::with_capacity(leads.len());

    for lead in leads {
        let breakdown = score_lead(lead, offer);

        let classification = classifier
            .classify(lead, offer)
            .await
            .with_context(|| format!("Classifying lead '{}'", lead.name));

        let result = match classification {
            Ok(classification) => compose(lead, &breakdown, classification),
            Err(e) => {
                tracing::warn!("{}; scoring on rules only", e);
                compose_rule_only(lead, &breakdown, &e)
            }
        };

        tracing::debug!(
            "Scored lead '{}': {} ({}, rule {} + ai {})",
            lead.name,
            result.score,
            result.intent,
            result.details.rule_score,
            result.details.ai_score
        );
        scored.push(result);
    }

    rank(&mut scored);
    scored
}

/// Sorts by descending score. Stable, so equal scores keep their input order.
pub fn rank(scored: &mut [ScoredLead]) {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Metadata about the most recent scoring run.
#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub lead_count: usize,
    /// Leads that fell back to rule-only scoring.
    pub ai_failures: usize,
}

/// Offer, leads and latest results for a single tenant.
///
/// Owned by the caller. A new offer or lead set discards stale results;
/// `run` takes `&mut self`, so two runs can never overlap on one context.
#[derive(Debug, Default)]
pub struct ScoringContext {
    offer: Option<Offer>,
    leads: Vec<Lead>,
    results: Vec<ScoredLead>,
    last_run: Option<RunInfo>,
}

impl ScoringContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current offer.
    pub fn set_offer(&mut self, offer: Offer) {
        tracing::info!("Offer set: {}", offer.name);
        self.offer = Some(offer);
        self.clear_results();
    }

    /// Replaces the current lead set.
    pub fn set_leads(&mut self, leads: Vec<Lead>) {
        tracing::info!("Lead set replaced: {} leads", leads.len());
        self.leads = leads;
        self.clear_results();
    }

    pub fn offer(&self) -> Option<&Offer> {
        self.offer.as_ref()
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Results of the latest run, ranked.
    pub fn results(&self) -> &[ScoredLead] {
        &self.results
    }

    pub fn last_run(&self) -> Option<&RunInfo> {
        self.last_run.as_ref()
    }

    /// Runs the pipeline over the current leads, replacing any earlier results.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed` when no offer is set or the lead set is empty.
    pub async fn run<C>(&mut self, classifier: &C) -> Result<&[ScoredLead], AppError>
    where
        C: IntentClassifier + ?Sized,
    {
        let offer = self.offer.as_ref().ok_or_else(|| {
            AppError::PreconditionFailed("No offer defined. Set an offer first".to_string())
        })?;

        if self.leads.is_empty() {
            return Err(AppError::PreconditionFailed(
                "No leads uploaded. Upload leads before scoring".to_string(),
            ));
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        tracing::info!(
            "Scoring run {} started: {} leads against offer '{}'",
            run_id,
            self.leads.len(),
            offer.name
        );

        let results = score_leads(&self.leads, offer, classifier).await;
        let ai_failures = results
            .iter()
            .filter(|r| r.details.error.is_some())
            .count();

        let info = RunInfo {
            run_id,
            started_at,
            completed_at: Utc::now(),
            lead_count: results.len(),
            ai_failures,
        };
        tracing::info!(
            "Scoring run {} completed: {} leads, {} rule-only",
            run_id,
            info.lead_count,
            info.ai_failures
        );

        self.results = results;
        self.last_run = Some(info);
        Ok(&self.results)
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.last_run = None;
    }
}
