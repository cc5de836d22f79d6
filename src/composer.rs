/// Merges rule scores and classifier output into a final `ScoredLead`.
use crate::errors::AppError;
use crate::models::{ClassifierResult, Intent, Lead, ScoreBreakdown, ScoreDetails, ScoredLead};

pub const HIGH_INTENT_POINTS: u8 = 50;
pub const MEDIUM_INTENT_POINTS: u8 = 30;
pub const LOW_INTENT_POINTS: u8 = 10;

pub const HIGH_THRESHOLD: u8 = 70;
pub const MEDIUM_THRESHOLD: u8 = 40;

pub const RULE_ONLY_NOTE: &str = "Rule-based scoring only (AI unavailable).";
pub const UNAVAILABLE_INTENT: &str = "Unavailable";

/// Points for a classifier intent label, matched case-insensitively by substring.
/// Unrecognised labels get the Medium value.
pub fn ai_points(label: &str) -> u8 {
    let lowered = label.to_lowercase();
    if lowered.contains("high") {
        HIGH_INTENT_POINTS
    } else if lowered.contains("medium") {
        MEDIUM_INTENT_POINTS
    } else if lowered.contains("low") {
        LOW_INTENT_POINTS
    } else {
        MEDIUM_INTENT_POINTS
    }
}

/// Final intent band for a score: ≥70 High, ≥40 Medium, otherwise Low.
pub fn intent_for_score(score: u8) -> Intent {
    if score >= HIGH_THRESHOLD {
        Intent::High
    } else if score >= MEDIUM_THRESHOLD {
        Intent::Medium
    } else {
        Intent::Low
    }
}

/// Combines rule breakdown and classification.
///
/// The final intent comes from the combined score, not from the classifier's label.
pub fn compose(
    lead: &Lead,
    breakdown: &ScoreBreakdown,
    classification: ClassifierResult,
) -> ScoredLead {
    let rule_score = breakdown.total();
    let ai_intent = classification.intent.as_str();
    let ai_score = ai_points(ai_intent);
    let score = rule_score + ai_score;

    let reasoning = format!(
        "{} AI Analysis (+{}): {}",
        rule_explanation(breakdown),
        ai_score,
        classification.reasoning
    );

    ScoredLead {
        lead: lead.clone(),
        intent: intent_for_score(score),
        score,
        reasoning,
        details: ScoreDetails {
            rule_score,
            ai_score,
            ai_intent: ai_intent.to_string(),
            classification_source: Some(classification.source),
            error: None,
        },
    }
}

/// Scores a lead on rules alone after the classification path failed.
///
/// Same thresholds as `compose`, applied to the 0–50 rule score, so High is out of reach here.
/// The recorded error is the innermost cause, without context wrappers.
pub fn compose_rule_only(lead: &Lead, breakdown: &ScoreBreakdown, error: &AppError) -> ScoredLead {
    let rule_score = breakdown.total();

    ScoredLead {
        lead: lead.clone(),
        intent: intent_for_score(rule_score),
        score: rule_score,
        reasoning: format!("{} {}", rule_explanation(breakdown), RULE_ONLY_NOTE),
        details: ScoreDetails {
            rule_score,
            ai_score: 0,
            ai_intent: UNAVAILABLE_INTENT.to_string(),
            classification_source: None,
            error: Some(error.root().to_string()),
        },
    }
}

fn rule_explanation(breakdown: &ScoreBreakdown) -> String {
    format!(
        "Role: {} (+{}). Industry: {} (+{}). Completeness: {} (+{}).",
        breakdown.role.reason,
        breakdown.role.score,
        breakdown.industry.reason,
        breakdown.industry.score,
        breakdown.completeness.reason,
        breakdown.completeness.score,
    )
}
