use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============ Input Models ============

/// Offer as submitted by the caller, before validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OfferInput {
    pub name: String,
    #[serde(default)]
    pub value_props: Vec<String>,
    #[serde(default)]
    pub ideal_use_cases: Vec<String>,
}

/// Lead row as submitted by the caller, before validation.
///
/// Every field defaults to empty so a partially filled row still deserializes
/// and can be reported with all of its missing fields at once.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeadInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linkedin_bio: Option<String>,
}

// ============ Domain Models ============

/// The product or offer leads are qualified against.
///
/// Immutable once created; a new offer replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Product name.
    pub name: String,
    /// Value propositions, in the order given.
    pub value_props: Vec<String>,
    /// Ideal customer profile entries, in the order given.
    pub ideal_use_cases: Vec<String>,
    /// When the offer was accepted.
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Creates an offer stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        value_props: Vec<String>,
        ideal_use_cases: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value_props,
            ideal_use_cases,
            created_at: Utc::now(),
        }
    }
}

/// A prospect to be scored. Immutable input to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_bio: Option<String>,
}

/// Coarse buying-readiness label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    High,
    Medium,
    Low,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::High => "High",
            Intent::Medium => "Medium",
            Intent::Low => "Low",
        }
    }

    /// Parses an intent label case-insensitively ("high", "Medium", ...).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(Intent::High),
            "medium" => Some(Intent::Medium),
            "low" => Some(Intent::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points and explanation for a single rule criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: u8,
    pub reason: String,
}

/// Per-criterion result of the rule scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Role seniority: 0, 10 or 20.
    pub role: CriterionScore,
    /// Industry fit: 0, 10 or 20.
    pub industry: CriterionScore,
    /// Data completeness: 0 or 10.
    pub completeness: CriterionScore,
}

impl ScoreBreakdown {
    /// Sum of the three criteria, in `[0, 50]`.
    pub fn total(&self) -> u8 {
        self.role.score + self.industry.score + self.completeness.score
    }
}

/// Where a classification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    /// Parsed from the AI service response.
    Ai,
    /// Produced by the local keyword heuristic.
    Fallback,
}

/// Intent label plus free-text reasoning, from either the AI service or the heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierResult {
    pub intent: Intent,
    pub reasoning: String,
    pub source: ClassificationSource,
}

/// Numeric provenance of a final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub rule_score: u8,
    pub ai_score: u8,
    pub ai_intent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_source: Option<ClassificationSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A lead with its final score, intent and explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredLead {
    #[serde(flatten)]
    pub lead: Lead,
    pub intent: Intent,
    /// `details.rule_score + details.ai_score`, in `[0, 100]`.
    pub score: u8,
    pub reasoning: String,
    pub details: ScoreDetails,
}
