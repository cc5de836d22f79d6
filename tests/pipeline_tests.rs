/// Pipeline tests: ranking, composer fallback and context preconditions
use async_trait::async_trait;
use lead_qualifier::classifier::{AiIntentClassifier, IntentClassifier};
use lead_qualifier::composer::RULE_ONLY_NOTE;
use lead_qualifier::errors::AppError;
use lead_qualifier::models::{ClassificationSource, ClassifierResult, Intent, Lead, Offer};
use lead_qualifier::pipeline::{score_leads, ScoringContext};
use std::collections::HashMap;

/// Returns a fixed intent per lead name, or an error for names it doesn't know.
struct ScriptedClassifier {
    intents: HashMap<&'static str, Intent>,
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(&self, lead: &Lead, _offer: &Offer) -> Result<ClassifierResult, AppError> {
        self.intents
            .get(lead.name.as_str())
            .map(|intent| ClassifierResult {
                intent: *intent,
                reasoning: format!("Scripted {} intent.", intent),
                source: ClassificationSource::Ai,
            })
            .ok_or_else(|| AppError::InternalError(format!("no script for {}", lead.name)))
    }
}

/// Fails every classification outright.
struct BrokenClassifier;

#[async_trait]
impl IntentClassifier for BrokenClassifier {
    async fn classify(&self, _lead: &Lead, _offer: &Offer) -> Result<ClassifierResult, AppError> {
        Err(AppError::ExternalApiError("connection reset".to_string()))
    }
}

fn offer() -> Offer {
    Offer::new(
        "X",
        vec!["a".to_string()],
        vec!["B2B SaaS mid-market".to_string()],
    )
}

fn lead(name: &str, role: &str, industry: &str, bio: Option<&str>) -> Lead {
    Lead {
        name: name.to_string(),
        role: role.to_string(),
        company: "F".to_string(),
        industry: industry.to_string(),
        location: "SF".to_string(),
        linkedin_bio: bio.map(str::to_string),
    }
}

fn ava() -> Lead {
    lead("Ava", "Head of Growth", "B2B SaaS", Some("bio"))
}

#[tokio::test]
async fn test_end_to_end_without_ai_key() {
    let classifier = AiIntentClassifier::fallback_only();
    let results = score_leads(&[ava()], &offer(), &classifier).await;

    let scored = &results[0];
    assert_eq!(scored.details.rule_score, 50);
    assert_eq!(scored.details.ai_intent, "High");
    assert_eq!(scored.details.ai_score, 50);
    assert_eq!(scored.score, 100);
    assert_eq!(scored.intent, Intent::High);
    assert_eq!(
        scored.details.classification_source,
        Some(ClassificationSource::Fallback)
    );
}

#[tokio::test]
async fn test_end_to_end_classifier_failure_is_rule_only() {
    let results = score_leads(&[ava()], &offer(), &BrokenClassifier).await;

    let scored = &results[0];
    assert_eq!(scored.details.rule_score, 50);
    assert_eq!(scored.details.ai_score, 0);
    assert_eq!(scored.score, 50);
    // 0-50 scale under the usual thresholds: Medium is the ceiling
    assert_eq!(scored.intent, Intent::Medium);
    assert_eq!(
        scored.details.error.as_deref(),
        Some("External API error: connection reset")
    );
    assert!(scored.reasoning.contains(RULE_ONLY_NOTE));
}

#[tokio::test]
async fn test_ranking_is_stable_descending() {
    // Rule 20 each (role 0, adjacent industry 10, completeness 10)
    let leads = vec![
        lead("first", "Engineer", "Retail", Some("bio")),
        lead("second", "Engineer", "Retail", Some("bio")),
        lead("third", "Engineer", "Retail", Some("bio")),
        lead("fourth", "Engineer", "Retail", Some("bio")),
    ];
    let classifier = ScriptedClassifier {
        intents: HashMap::from([
            ("first", Intent::High),  // 70
            ("second", Intent::Low),  // 30
            ("third", Intent::High),  // 70
            ("fourth", Intent::Low),  // 30
        ]),
    };

    let results = score_leads(&leads, &offer(), &classifier).await;

    let order: Vec<(&str, u8)> = results
        .iter()
        .map(|r| (r.lead.name.as_str(), r.score))
        .collect();
    assert_eq!(
        order,
        vec![("first", 70), ("third", 70), ("second", 30), ("fourth", 30)]
    );
}

#[tokio::test]
async fn test_one_failure_does_not_abort_run() {
    let leads = vec![
        lead("known", "CEO", "B2B SaaS", Some("bio")),
        lead("unknown", "CEO", "B2B SaaS", Some("bio")),
    ];
    let classifier = ScriptedClassifier {
        intents: HashMap::from([("known", Intent::Low)]),
    };

    let results = score_leads(&leads, &offer(), &classifier).await;

    assert_eq!(results.len(), 2);
    let known = results.iter().find(|r| r.lead.name == "known").unwrap();
    let unknown = results.iter().find(|r| r.lead.name == "unknown").unwrap();
    assert_eq!(known.score, 60);
    assert!(known.details.error.is_none());
    assert_eq!(unknown.score, 50);
    assert!(unknown.details.error.is_some());
}

#[tokio::test]
async fn test_context_requires_offer_and_leads() {
    let classifier = AiIntentClassifier::fallback_only();
    let mut context = ScoringContext::new();

    context.set_leads(vec![ava()]);
    let err = context.run(&classifier).await.unwrap_err();
    assert!(matches!(err, AppError::PreconditionFailed(_)));

    let mut context = ScoringContext::new();
    context.set_offer(offer());
    let err = context.run(&classifier).await.unwrap_err();
    assert!(matches!(err, AppError::PreconditionFailed(_)));
}

#[tokio::test]
async fn test_context_run_replaces_results() {
    let classifier = AiIntentClassifier::fallback_only();
    let mut context = ScoringContext::new();
    context.set_offer(offer());
    context.set_leads(vec![ava(), lead("Ben", "Engineer", "Retail", None)]);

    assert_eq!(context.offer().map(|o| o.name.as_str()), Some("X"));
    assert_eq!(context.leads().len(), 2);

    context.run(&classifier).await.unwrap();
    assert_eq!(context.results().len(), 2);
    let first_run = context.last_run().unwrap().run_id;

    context.set_leads(vec![ava()]);
    assert!(context.results().is_empty());
    assert!(context.last_run().is_none());

    context.run(&classifier).await.unwrap();
    assert_eq!(context.results().len(), 1);
    assert_ne!(context.last_run().unwrap().run_id, first_run);
}

#[tokio::test]
async fn test_context_counts_rule_only_leads() {
    let mut context = ScoringContext::new();
    context.set_offer(offer());
    context.set_leads(vec![ava(), lead("Ben", "Engineer", "Retail", None)]);

    context.run(&BrokenClassifier).await.unwrap();

    let info = context.last_run().unwrap();
    assert_eq!(info.lead_count, 2);
    assert_eq!(info.ai_failures, 2);
}

#[tokio::test]
async fn test_dyn_classifier_is_accepted() {
    let classifier: Box<dyn IntentClassifier> = Box::new(AiIntentClassifier::fallback_only());
    let results = score_leads(&[ava()], &offer(), classifier.as_ref()).await;
    assert_eq!(results.len(), 1);
}
