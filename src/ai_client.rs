use crate::config::Config;
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct AiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl AiClient {
    /// Creates a new `AiClient`.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, model and timeout settings.
    /// * `api_key` - The bearer credential for the AI service.
    pub fn new(config: &Config, api_key: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create AI client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.ai_base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.ai_model.clone(),
            temperature: config.ai_temperature,
            max_tokens: config.ai_max_tokens,
        })
    }

    /// Sends a system instruction and a user prompt, returning the completion text.
    ///
    /// # Returns
    ///
    /// * `Result<String, AppError>` - The first choice's message content.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("Requesting completion from {} (model {})", url, self.model);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("AI request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "AI service returned {}: {}",
                status, error_text
            )));
        }

        let data: ChatResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse AI response: {}", e))
        })?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AppError::ExternalApiError("AI response contained no completion".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_strips_trailing_slash() {
        let config = Config {
            ai_base_url: "https://example.com/v1/".to_string(),
            ..Config::default()
        };
        let client = AiClient::new(&config, "key".to_string()).unwrap();
        assert_eq!(client.base_url, "https://example.com/v1");
    }
}
