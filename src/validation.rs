/// Boundary validation for offers and lead rows.
///
/// Everything that reaches the scoring pipeline has passed through here:
/// required fields are trimmed and non-empty, blank optional fields are `None`.
use crate::errors::AppError;
use crate::models::{Lead, LeadInput, Offer, OfferInput};
use serde::Serialize;

/// A lead row rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based position in the submitted batch.
    pub row: usize,
    pub message: String,
}

/// Validate an offer and stamp it with its creation time.
pub fn validate_offer(input: OfferInput) -> Result<Offer, AppError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::ValidationError(
            "Offer name is required".to_string(),
        ));
    }

    let value_props = clean_list(input.value_props);
    if value_props.is_empty() {
        return Err(AppError::ValidationError(
            "Offer must list at least one value proposition".to_string(),
        ));
    }

    let ideal_use_cases = clean_list(input.ideal_use_cases);
    if ideal_use_cases.is_empty() {
        return Err(AppError::ValidationError(
            "Offer must list at least one ideal use case".to_string(),
        ));
    }

    Ok(Offer::new(name, value_props, ideal_use_cases))
}

/// Validate a single lead row.
///
/// The error names every missing field, not just the first.
pub fn validate_lead(input: LeadInput) -> Result<Lead, AppError> {
    let fields = [
        ("name", input.name.trim()),
        ("role", input.role.trim()),
        ("company", input.company.trim()),
        ("industry", input.industry.trim()),
        ("location", input.location.trim()),
    ];

    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();

    if !missing.is_empty() {
        return Err(AppError::ValidationError(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let [name, role, company, industry, location] = fields.map(|(_, value)| value.to_string());

    Ok(Lead {
        name,
        role,
        company,
        industry,
        location,
        linkedin_bio: input
            .linkedin_bio
            .map(|bio| bio.trim().to_string())
            .filter(|bio| !bio.is_empty()),
    })
}

/// Validate a batch of lead rows, keeping the valid ones.
///
/// Invalid rows are skipped and reported; they never fail the whole batch.
pub fn validate_leads(inputs: Vec<LeadInput>) -> (Vec<Lead>, Vec<RowError>) {
    let mut leads = Vec::with_capacity(inputs.len());
    let mut errors = Vec::new();

    for (index, input) in inputs.into_iter().enumerate() {
        match validate_lead(input) {
            Ok(lead) => leads.push(lead),
            Err(e) => {
                let message = match e {
                    AppError::ValidationError(msg) => msg,
                    other => other.to_string(),
                };
                tracing::warn!("Skipping lead row {}: {}", index + 1, message);
                errors.push(RowError {
                    row: index + 1,
                    message,
                });
            }
        }
    }

    (leads, errors)
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, role: &str, bio: Option<&str>) -> LeadInput {
        LeadInput {
            name: name.to_string(),
            role: role.to_string(),
            company: "FlowMetrics".to_string(),
            industry: "SaaS".to_string(),
            location: "Berlin".to_string(),
            linkedin_bio: bio.map(str::to_string),
        }
    }

    #[test]
    fn test_offer_requires_name_and_lists() {
        let missing_name = OfferInput {
            name: "  ".to_string(),
            value_props: vec!["fast".to_string()],
            ideal_use_cases: vec!["B2B SaaS".to_string()],
        };
        assert!(validate_offer(missing_name).is_err());

        let blank_use_cases = OfferInput {
            name: "AI Outreach".to_string(),
            value_props: vec!["fast".to_string()],
            ideal_use_cases: vec![" ".to_string()],
        };
        assert!(validate_offer(blank_use_cases).is_err());
    }

    #[test]
    fn test_offer_entries_are_trimmed() {
        let offer = validate_offer(OfferInput {
            name: " AI Outreach ".to_string(),
            value_props: vec![" 24/7 outreach ".to_string(), "".to_string()],
            ideal_use_cases: vec!["B2B SaaS mid-market ".to_string()],
        })
        .unwrap();

        assert_eq!(offer.name, "AI Outreach");
        assert_eq!(offer.value_props, vec!["24/7 outreach"]);
        assert_eq!(offer.ideal_use_cases, vec!["B2B SaaS mid-market"]);
    }

    #[test]
    fn test_lead_error_lists_all_missing_fields() {
        let input = LeadInput {
            name: "Ava".to_string(),
            ..Default::default()
        };
        let err = validate_lead(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: role, company, industry, location"
        );
    }

    #[test]
    fn test_blank_bio_becomes_none() {
        let lead = validate_lead(row(" Ava ", "CEO", Some("   "))).unwrap();
        assert_eq!(lead.name, "Ava");
        assert_eq!(lead.linkedin_bio, None);
    }

    #[test]
    fn test_batch_skips_invalid_rows() {
        let (leads, errors) = validate_leads(vec![
            row("Ava", "CEO", None),
            row("", "CTO", None),
            row("Ben", "VP Sales", Some("bio")),
        ]);

        assert_eq!(leads.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row, 2);
        assert!(errors[0].message.contains("name"));
    }
}
