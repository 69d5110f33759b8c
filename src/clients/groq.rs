use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::clients::ModelClient;
use crate::config::KeyFromEnv;
use crate::error::{AIError, GroqError};

pub mod models;
pub use models::GroqModel;

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: String,
}

/// Configuration for the Groq client
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: GroqModel,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: GroqModel::default(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Groq chat-completions client (OpenAI-compatible wire format).
#[derive(Debug, Clone)]
pub struct GroqClient {
    config: GroqConfig,
    client: Client,
}

impl KeyFromEnv for GroqClient {
    const KEY_NAME: &'static str = "GROQ_API_KEY";
}

impl Default for GroqClient {
    fn default() -> Self {
        let api_key = Self::find_key_with_user();
        let config = GroqConfig { api_key, ..GroqConfig::default() };
        Self::new(config)
    }
}

impl GroqClient {
    /// Create a new Groq client with full configuration
    pub fn new(config: GroqConfig) -> Self {
        info!(model = %config.model.id(), "Creating new Groq client");
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ModelClient for GroqClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len(), model = %self.config.model.id()))]
    async fn invoke(&self, prompt: String) -> Result<String, AIError> {
        let request = GroqRequest {
            model: self.config.model.id().to_string(),
            messages: vec![GroqMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending request to Groq API");
        let response = self
            .client
            .post("https://api.groq.com/openai/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                AIError::Groq(GroqError::Http(e.to_string()))
            })?;

        debug!(status = %response.status(), "Received response from Groq API");

        if response.status() == 429 {
            warn!("Groq API rate limit exceeded");
            return Err(AIError::Groq(GroqError::RateLimit));
        }

        if response.status() == 401 {
            error!("Groq API authentication failed");
            return Err(AIError::Groq(GroqError::Authentication));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Groq API error");
            return Err(AIError::Groq(GroqError::Api(error_text)));
        }

        let groq_response: GroqResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse Groq response JSON");
            AIError::Groq(GroqError::Http(e.to_string()))
        })?;

        let result = groq_response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                error!("No choices in Groq response");
                AIError::Groq(GroqError::Api("No choices in response".to_string()))
            });

        match &result {
            Ok(text) => info!(response_len = text.len(), "Successfully received Groq response"),
            Err(e) => error!(error = %e, "Failed to extract content from Groq response"),
        }

        result
    }

    fn clone_box(&self) -> Box<dyn ModelClient> {
        Box::new(self.clone())
    }
}
