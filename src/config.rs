use serde::Deserialize;

pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_AI_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub ai_api_key: Option<String>, // Absent means fallback classification only
    pub ai_base_url: String,
    pub ai_model: String,
    pub ai_temperature: f32,
    pub ai_max_tokens: u32,
    pub ai_timeout_secs: u64,
    pub ai_failure_threshold: u32, // 0 disables the circuit breaker
    pub ai_cache_ttl_secs: u64, // 0 disables the classification cache
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_api_key: None,
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            ai_temperature: 0.3,
            ai_max_tokens: 150,
            ai_timeout_secs: 30,
            ai_failure_threshold: 0,
            ai_cache_ttl_secs: 0,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            ai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            ai_base_url: std::env::var("AI_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("AI_BASE_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })
                .transpose()?
                .unwrap_or(defaults.ai_base_url),
            ai_model: std::env::var("AI_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.ai_model),
            ai_temperature: parse_var("AI_TEMPERATURE", defaults.ai_temperature)
                .and_then(|t| {
                    if !(0.0..=2.0).contains(&t) {
                        anyhow::bail!("AI_TEMPERATURE must be between 0.0 and 2.0");
                    }
                    Ok(t)
                })?,
            ai_max_tokens: parse_var("AI_MAX_TOKENS", defaults.ai_max_tokens)?,
            ai_timeout_secs: parse_var("AI_TIMEOUT_SECS", defaults.ai_timeout_secs).and_then(
                |secs| {
                    if secs == 0 {
                        anyhow::bail!("AI_TIMEOUT_SECS must be greater than 0");
                    }
                    Ok(secs)
                },
            )?,
            ai_failure_threshold: parse_var("AI_FAILURE_THRESHOLD", defaults.ai_failure_threshold)?,
            ai_cache_ttl_secs: parse_var("AI_CACHE_TTL_SECS", defaults.ai_cache_ttl_secs)?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        if config.ai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set, leads will be classified by fallback heuristic");
        }
        tracing::debug!("AI Base URL: {}", config.ai_base_url);
        tracing::debug!("AI Model: {}", config.ai_model);
        tracing::debug!(
            "AI timeout: {}s, failure threshold: {}, cache TTL: {}s",
            config.ai_timeout_secs,
            config.ai_failure_threshold,
            config.ai_cache_ttl_secs
        );

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", name, raw)),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_disable_ai_cache_and_breaker() {
        let config = Config::default();
        assert!(config.ai_api_key.is_none());
        assert_eq!(config.ai_base_url, DEFAULT_AI_BASE_URL);
        assert_eq!(config.ai_cache_ttl_secs, 0);
        assert_eq!(config.ai_failure_threshold, 0);
    }

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let value: u64 = parse_var("LEAD_QUALIFIER_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
