use anyhow::Context;
use lead_qualifier::classifier::AiIntentClassifier;
use lead_qualifier::config::Config;
use lead_qualifier::models::{Intent, LeadInput, OfferInput};
use lead_qualifier::pipeline::ScoringContext;
use lead_qualifier::summary::{filter_by_intent, ResultsSummary};
use lead_qualifier::validation::{validate_leads, validate_offer};
use serde::Deserialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "Usage: lead-qualifier <batch.json> [high|medium|low]";

/// Input file layout: one offer plus the lead rows to score against it.
#[derive(Debug, Deserialize)]
struct Batch {
    offer: OfferInput,
    #[serde(default)]
    leads: Vec<LeadInput>,
}

/// Main entry point for the application.
///
/// This function:
/// - Initializes logging and tracing (stderr).
/// - Loads configuration.
/// - Reads and validates the batch file.
/// - Runs the scoring pipeline.
/// - Prints the summary and ranked results as JSON (stdout).
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the batch was scored, or an error if input or setup fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_qualifier=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or_else(|| anyhow::anyhow!(USAGE))?;
    let intent_filter = args
        .next()
        .map(|label| {
            Intent::from_label(&label)
                .ok_or_else(|| anyhow::anyhow!("Unknown intent filter '{}'. {}", label, USAGE))
        })
        .transpose()?;

    // Load configuration
    let config = Config::from_env()?;

    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read batch file {}", path))?;
    let batch: Batch =
        serde_json::from_str(&raw).with_context(|| format!("Invalid batch file {}", path))?;

    let offer = validate_offer(batch.offer)?;
    let (leads, rejected) = validate_leads(batch.leads);
    if !rejected.is_empty() {
        tracing::warn!("{} lead rows rejected by validation", rejected.len());
    }

    let classifier = AiIntentClassifier::from_config(&config)?;

    let mut context = ScoringContext::new();
    context.set_offer(offer);
    context.set_leads(leads);

    context.run(&classifier).await?;
    let results = context.results();
    let summary = ResultsSummary::from_results(results);

    let selected: Vec<_> = match intent_filter {
        Some(intent) => filter_by_intent(results, intent),
        None => results.iter().collect(),
    };

    let output = json!({
        "run": context.last_run(),
        "summary": summary,
        "rejected": rejected,
        "results": selected,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
