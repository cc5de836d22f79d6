/// Intent classification for leads.
///
/// The production classifier asks an external AI text-completion service for
/// a two-line `Intent:` / `Reasoning:` answer. When no credential is configured,
/// when the call fails, or while the optional circuit breaker is open, a local keyword
/// heuristic produces the same `ClassifierResult` shape instead.
use crate::ai_client::AiClient;
use crate::circuit_breaker::{ai_circuit_breaker_from_threshold, AiCircuitBreaker};
use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::models::{ClassificationSource, ClassifierResult, Intent, Lead, Offer};
use crate::response_cache::ClassificationCache;
use crate::rules::{contains_any, cross_contains};
use async_trait::async_trait;
use failsafe::CircuitBreaker;
use regex::Regex;
use std::sync::OnceLock;

pub const SYSTEM_INSTRUCTION: &str = "You are a B2B sales qualification expert. \
Provide concise, accurate lead intent classifications in the exact format requested.";

pub const PLACEHOLDER_REASONING: &str = "Unable to determine fit.";

const SENIOR_KEYWORDS: &[&str] = &["ceo", "cto", "founder", "vp", "director", "head"];
const MANAGEMENT_KEYWORDS: &[&str] = &["manager", "lead"];

/// Anything that can assign an intent to a lead.
///
/// An `Err` means the classification path failed outright; the pipeline
/// then scores the lead on rules alone and records the error.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, lead: &Lead, offer: &Offer) -> Result<ClassifierResult, AppError>;
}

/// AI-backed classifier with heuristic fallback.
pub struct AiIntentClassifier {
    client: Option<AiClient>,
    breaker: Option<AiCircuitBreaker>,
    cache: Option<ClassificationCache>,
}

impl AiIntentClassifier {
    /// Builds the classifier from configuration.
    ///
    /// A missing API key is not an error: every lead then goes through the heuristic.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = match &config.ai_api_key {
            Some(key) => {
                let client = AiClient::new(config, key.clone())
                    .context("Failed to initialise AI classifier")?;
                tracing::info!(
                    "AI classifier initialized: {} ({})",
                    config.ai_base_url,
                    config.ai_model
                );
                Some(client)
            }
            None => {
                tracing::info!("AI classifier disabled, using fallback heuristic");
                None
            }
        };

        Ok(Self {
            client,
            breaker: ai_circuit_breaker_from_threshold(config.ai_failure_threshold),
            cache: ClassificationCache::from_ttl(config.ai_cache_ttl_secs),
        })
    }

    /// A classifier that never calls out.
    pub fn fallback_only() -> Self {
        Self {
            client: None,
            breaker: None,
            cache: None,
        }
    }

    pub fn is_ai_enabled(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl IntentClassifier for AiIntentClassifier {
    async fn classify(&self, lead: &Lead, offer: &Offer) -> Result<ClassifierResult, AppError> {
        let Some(client) = &self.client else {
            return Ok(fallback_classification(lead, offer));
        };

        if let Some(breaker) = &self.breaker {
            if !breaker.is_call_permitted() {
                tracing::warn!(
                    "AI circuit open, classifying lead '{}' with fallback heuristic",
                    lead.name
                );
                return Ok(fallback_classification(lead, offer));
            }
        }

        let prompt = build_prompt(lead, offer);

        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&prompt).await {
                tracing::debug!("Classification cache HIT for lead '{}'", lead.name);
                return Ok(cached);
            }
        }

        let outcome = client.complete(SYSTEM_INSTRUCTION, &prompt).await;
        let outcome = match &self.breaker {
            Some(breaker) => breaker.call(|| outcome),
            None => outcome.map_err(failsafe::Error::Inner),
        };

        match outcome {
            Ok(text) => {
                let result = parse_response(&text);
                tracing::debug!(
                    "AI classified lead '{}' as {}",
                    lead.name,
                    result.intent
                );
                if let Some(cache) = &self.cache {
                    cache.insert(&prompt, result.clone()).await;
                }
                Ok(result)
            }
            Err(failsafe::Error::Inner(e)) => {
                tracing::warn!(
                    "AI classification failed for lead '{}', using fallback: {}",
                    lead.name,
                    e
                );
                Ok(fallback_classification(lead, offer))
            }
            Err(failsafe::Error::Rejected) => {
                tracing::warn!(
                    "AI circuit rejected call for lead '{}', using fallback",
                    lead.name
                );
                Ok(fallback_classification(lead, offer))
            }
        }
    }
}

/// Builds the user prompt for one lead. Deterministic for a given lead and offer.
pub fn build_prompt(lead: &Lead, offer: &Offer) -> String {
    let bio = lead
        .linkedin_bio
        .as_deref()
        .map(str::trim)
        .filter(|bio| !bio.is_empty())
        .unwrap_or("Not provided");

    format!(
        "Analyze this B2B sales lead and classify their buying intent for our product.

PRODUCT/OFFER:
Name: {offer_name}
Value Propositions: {value_props}
Ideal Use Cases: {use_cases}

LEAD:
Name: {name}
Role: {role}
Company: {company}
Industry: {industry}
Location: {location}
LinkedIn Bio: {bio}

Classify the lead's buying intent as High, Medium, or Low based on how well they match \
the ideal customer profile and how likely they are to purchase.

Respond in exactly this format:
Intent: <High|Medium|Low>
Reasoning: <1-2 sentences explaining the classification>",
        offer_name = offer.name,
        value_props = offer.value_props.join(", "),
        use_cases = offer.ideal_use_cases.join(", "),
        name = lead.name,
        role = lead.role,
        company = lead.company,
        industry = lead.industry,
        location = lead.location,
        bio = bio,
    )
}

fn intent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(high|medium|low)\b").unwrap())
}

/// Strips an ASCII prefix case-insensitively.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.get(..label.len())
        .filter(|head| head.eq_ignore_ascii_case(label))
        .map(|_| &line[label.len()..])
}

/// Parses the two-line `Intent:` / `Reasoning:` answer.
///
/// - Unknown or missing intent → `Medium`.
/// - Missing or short (<10 chars) reasoning → the following line, if longer than 10 chars.
/// - Still nothing → `PLACEHOLDER_REASONING`.
pub fn parse_response(text: &str) -> ClassifierResult {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let mut intent = None;
    let mut reasoning: Option<String> = None;
    let mut reasoning_line = None;

    for (index, line) in lines.iter().enumerate() {
        if let Some(rest) = strip_label(line, "intent:") {
            if intent.is_none() {
                intent = intent_pattern()
                    .captures(rest)
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| Intent::from_label(m.as_str()));
            }
        } else if let Some(rest) = strip_label(line, "reasoning:") {
            if reasoning_line.is_none() {
                reasoning = Some(rest.trim().to_string());
                reasoning_line = Some(index);
            }
        }
    }

    let too_short = reasoning
        .as_deref()
        .map_or(true, |r| r.chars().count() < 10);

    if too_short {
        if let Some(next) = reasoning_line
            .and_then(|index| lines.get(index + 1))
            .filter(|next| next.chars().count() > 10)
        {
            reasoning = Some(next.to_string());
        }
    }

    ClassifierResult {
        intent: intent.unwrap_or(Intent::Medium),
        reasoning: reasoning
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_REASONING.to_string()),
        source: ClassificationSource::Ai,
    }
}

/// Local keyword heuristic used when the AI service is unavailable.
///
/// Senior role +2, else management role +1; industry/ICP overlap +2.
/// Total ≥3 → High, ≥1 → Medium, otherwise Low.
pub fn fallback_classification(lead: &Lead, offer: &Offer) -> ClassifierResult {
    let role = lead.role.to_lowercase();
    let industry = lead.industry.trim().to_lowercase();

    let mut score = 0u8;
    let mut signals = Vec::new();

    if contains_any(&role, SENIOR_KEYWORDS) {
        score += 2;
        signals.push("senior decision-making role");
    } else if contains_any(&role, MANAGEMENT_KEYWORDS) {
        score += 1;
        signals.push("management-level role");
    }

    let industry_match = !industry.is_empty()
        && offer
            .ideal_use_cases
            .iter()
            .map(|uc| uc.trim().to_lowercase())
            .filter(|uc| !uc.is_empty())
            .any(|uc| cross_contains(&industry, &uc));

    if industry_match {
        score += 2;
        signals.push("industry aligns with ideal use cases");
    }

    let intent = match score {
        s if s >= 3 => Intent::High,
        s if s >= 1 => Intent::Medium,
        _ => Intent::Low,
    };

    let reasoning = if signals.is_empty() {
        "Fallback classification: limited fit signals from role and industry.".to_string()
    } else {
        format!("Fallback classification: {}.", signals.join("; "))
    };

    ClassifierResult {
        intent,
        reasoning,
        source: ClassificationSource::Fallback,
    }
}
