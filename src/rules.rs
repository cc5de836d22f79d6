/// Deterministic rule scorer.
///
/// Scores a lead against an offer on three criteria:
/// 1. Role seniority (0/10/20)
/// 2. Industry fit against the offer's ideal use cases (0/10/20)
/// 3. Profile completeness (0/10)
///
/// Pure: no I/O, no error cases. Missing values score 0 on their criterion.
use crate::models::{CriterionScore, Lead, Offer, ScoreBreakdown};

pub const DECISION_MAKER_KEYWORDS: &[&str] = &[
    "ceo",
    "cto",
    "cfo",
    "coo",
    "president",
    "founder",
    "owner",
    "director",
    "vp",
    "vice president",
    "head of",
    "chief",
    "principal",
    "partner",
    "managing",
];

pub const INFLUENCER_KEYWORDS: &[&str] = &[
    "manager",
    "lead",
    "senior",
    "sr.",
    "coordinator",
    "specialist",
    "supervisor",
    "team lead",
];

pub const ADJACENT_INDUSTRY_KEYWORDS: &[&str] = &["saas", "software", "tech", "b2b", "enterprise"];

pub const DECISION_MAKER_POINTS: u8 = 20;
pub const INFLUENCER_POINTS: u8 = 10;
pub const EXACT_INDUSTRY_POINTS: u8 = 20;
pub const ADJACENT_INDUSTRY_POINTS: u8 = 10;
pub const COMPLETENESS_POINTS: u8 = 10;

/// Score a lead against an offer.
pub fn score_lead(lead: &Lead, offer: &Offer) -> ScoreBreakdown {
    ScoreBreakdown {
        role: score_role(&lead.role),
        industry: score_industry(&lead.industry, &offer.ideal_use_cases),
        completeness: score_completeness(lead),
    }
}

/// Decision makers outrank influencers; the first matching tier wins.
pub fn score_role(role: &str) -> CriterionScore {
    let role = role.trim();
    if role.is_empty() {
        return CriterionScore {
            score: 0,
            reason: "No role provided".to_string(),
        };
    }

    let lowered = role.to_lowercase();

    if contains_any(&lowered, DECISION_MAKER_KEYWORDS) {
        CriterionScore {
            score: DECISION_MAKER_POINTS,
            reason: format!("Decision maker role ({})", role),
        }
    } else if contains_any(&lowered, INFLUENCER_KEYWORDS) {
        CriterionScore {
            score: INFLUENCER_POINTS,
            reason: format!("Influencer role ({})", role),
        }
    } else {
        CriterionScore {
            score: 0,
            reason: format!("Role not identified as decision maker or influencer ({})", role),
        }
    }
}

/// Exact ICP match (substring either way) beats an adjacent-industry keyword.
pub fn score_industry(industry: &str, ideal_use_cases: &[String]) -> CriterionScore {
    let industry = industry.trim();
    if industry.is_empty() {
        return CriterionScore {
            score: 0,
            reason: "No industry provided".to_string(),
        };
    }

    let use_cases: Vec<&str> = ideal_use_cases
        .iter()
        .map(|uc| uc.trim())
        .filter(|uc| !uc.is_empty())
        .collect();
    if use_cases.is_empty() {
        return CriterionScore {
            score: 0,
            reason: "Offer defines no ideal use cases".to_string(),
        };
    }

    let lowered = industry.to_lowercase();

    if let Some(matched) = use_cases
        .iter()
        .find(|uc| cross_contains(&lowered, &uc.to_lowercase()))
    {
        return CriterionScore {
            score: EXACT_INDUSTRY_POINTS,
            reason: format!("Exact ICP match ({} ~ {})", industry, matched),
        };
    }

    let adjacent = contains_any(&lowered, ADJACENT_INDUSTRY_KEYWORDS)
        || use_cases
            .iter()
            .any(|uc| contains_any(&uc.to_lowercase(), ADJACENT_INDUSTRY_KEYWORDS));

    if adjacent {
        CriterionScore {
            score: ADJACENT_INDUSTRY_POINTS,
            reason: format!("Adjacent industry ({})", industry),
        }
    } else {
        CriterionScore {
            score: 0,
            reason: format!("Industry outside ideal customer profile ({})", industry),
        }
    }
}

/// Full credit only when all six fields, `linkedin_bio` included, are filled.
pub fn score_completeness(lead: &Lead) -> CriterionScore {
    let fields = [
        ("name", lead.name.as_str()),
        ("role", lead.role.as_str()),
        ("company", lead.company.as_str()),
        ("industry", lead.industry.as_str()),
        ("location", lead.location.as_str()),
        ("linkedin_bio", lead.linkedin_bio.as_deref().unwrap_or("")),
    ];

    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();

    if missing.is_empty() {
        CriterionScore {
            score: COMPLETENESS_POINTS,
            reason: "All profile fields complete".to_string(),
        }
    } else {
        CriterionScore {
            score: 0,
            reason: format!("Incomplete profile (missing: {})", missing.join(", ")),
        }
    }
}

/// Case-insensitive containment in either direction. Both inputs must already be lowercase.
pub(crate) fn cross_contains(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(role: &str, industry: &str, bio: Option<&str>) -> Lead {
        Lead {
            name: "Ava Patel".to_string(),
            role: role.to_string(),
            company: "FlowMetrics".to_string(),
            industry: industry.to_string(),
            location: "San Francisco".to_string(),
            linkedin_bio: bio.map(str::to_string),
        }
    }

    fn use_cases(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_role_tiers() {
        assert_eq!(score_role("CEO").score, 20);
        assert_eq!(score_role("Head of Growth").score, 20);
        assert_eq!(score_role("Senior Manager").score, 10);
        assert_eq!(score_role("Sr. Engineer").score, 10);
        assert_eq!(score_role("Engineer").score, 0);
        assert_eq!(score_role("  ").score, 0);
    }

    #[test]
    fn test_decision_maker_checked_before_influencer() {
        // "managing" and "director" outrank the "manager"/"lead" influencer keywords
        assert_eq!(score_role("Managing Director").score, 20);
        assert_eq!(score_role("Lead Partner").score, 20);
    }

    #[test]
    fn test_industry_exact_match_either_direction() {
        let ucs = use_cases(&["B2B SaaS mid-market"]);
        assert_eq!(score_industry("B2B SaaS", &ucs).score, 20);
        assert_eq!(score_industry("b2b saas mid-market fintech", &ucs).score, 20);
    }

    #[test]
    fn test_industry_first_match_wins() {
        let ucs = use_cases(&["Healthcare", "Health"]);
        let result = score_industry("Health", &ucs);
        assert_eq!(result.score, 20);
        assert!(result.reason.contains("Healthcare"));
    }

    #[test]
    fn test_industry_adjacent_from_either_side() {
        let ucs = use_cases(&["Logistics"]);
        assert_eq!(score_industry("Enterprise Software", &ucs).score, 10);

        let saas_ucs = use_cases(&["SaaS platforms"]);
        assert_eq!(score_industry("Retail", &saas_ucs).score, 10);
    }

    #[test]
    fn test_industry_no_match() {
        let ucs = use_cases(&["Logistics"]);
        assert_eq!(score_industry("Agriculture", &ucs).score, 0);
    }

    #[test]
    fn test_industry_missing_inputs_score_zero() {
        assert_eq!(score_industry("", &use_cases(&["SaaS"])).score, 0);
        assert_eq!(score_industry("SaaS", &[]).score, 0);
        assert_eq!(score_industry("SaaS", &use_cases(&["  "])).score, 0);
    }

    #[test]
    fn test_completeness_requires_bio() {
        assert_eq!(score_completeness(&lead("CEO", "SaaS", Some("bio"))).score, 10);

        let missing_bio = score_completeness(&lead("CEO", "SaaS", None));
        assert_eq!(missing_bio.score, 0);
        assert!(missing_bio.reason.contains("linkedin_bio"));

        assert_eq!(score_completeness(&lead("CEO", "SaaS", Some(" "))).score, 0);
    }

    #[test]
    fn test_score_lead_totals() {
        let offer = Offer::new("X", vec!["a".into()], use_cases(&["B2B SaaS mid-market"]));
        let breakdown = score_lead(&lead("Head of Growth", "B2B SaaS", Some("bio")), &offer);

        assert_eq!(breakdown.role.score, 20);
        assert_eq!(breakdown.industry.score, 20);
        assert_eq!(breakdown.completeness.score, 10);
        assert_eq!(breakdown.total(), 50);
    }
}
