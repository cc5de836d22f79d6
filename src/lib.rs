//! Lead Qualifier Library
//!
//! This library scores sales leads against a product offer, combining a
//! deterministic rule score with an AI-derived intent classification into a
//! 0–100 fit score and a High/Medium/Low label.
//!
//! # Modules
//!
//! - `core`: Scoring pipeline (rules, classifier, composer, driver).
//! - `integrations`: External service integrations.
//! - `ai_client`: Chat-completions client for the AI service.
//! - `circuit_breaker`: Circuit breaker guarding AI calls.
//! - `classifier`: Intent classification with heuristic fallback.
//! - `composer`: Merges rule and AI scores.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `models`: Core data models.
//! - `pipeline`: Pipeline driver and scoring context.
//! - `response_cache`: Prompt-keyed classification cache.
//! - `rules`: Rule-based scorer.
//! - `summary`: Result filtering and aggregate statistics.
//! - `validation`: Offer and lead input validation.

pub mod core;
pub mod integrations;

pub mod ai_client;
pub mod circuit_breaker;
pub mod classifier;
pub mod composer;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod response_cache;
pub mod rules;
pub mod summary;
pub mod validation;
