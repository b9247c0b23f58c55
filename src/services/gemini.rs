use crate::config::GeneratorSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when calling the text-generation model
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Gemini API error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Response was blocked: {0}")]
    Blocked(String),

    #[error("Response contained no text")]
    Empty,

    #[error("No API key configured for the summary model")]
    MissingApiKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one text prompt
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
                role: None,
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, with all of its parts concatenated
    pub fn text(&self) -> Result<String, GeneratorError> {
        let Some(candidate) = self.candidates.first() else {
            return match self.prompt_feedback.as_ref().and_then(|f| f.block_reason.clone()) {
                Some(reason) => Err(GeneratorError::Blocked(reason)),
                None => Err(GeneratorError::Empty),
            };
        };

        let text: String = candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .map(|part| part.text.as_str())
            .collect();

        if !text.is_empty() {
            return Ok(text);
        }

        match candidate.finish_reason.as_deref() {
            Some(reason) if reason != "STOP" => Err(GeneratorError::Blocked(reason.to_string())),
            _ => Err(GeneratorError::Empty),
        }
    }
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client from the generator settings
    ///
    /// Fails when no API key was supplied through config or environment.
    pub fn from_settings(settings: &GeneratorSettings) -> Result<Self, GeneratorError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(GeneratorError::MissingApiKey)?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_key,
            client: builder.build()?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt and return the generated text
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeneratorError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        tracing::debug!("Generating content with {} ({} chars of prompt)", self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) if !envelope.error.message.is_empty() => {
                    if envelope.error.status.is_empty() {
                        envelope.error.message
                    } else {
                        format!("{} ({})", envelope.error.message, envelope.error.status)
                    }
                }
                _ => format!("{} {}", status, body.trim()).trim().to_string(),
            };
            return Err(GeneratorError::ApiError(message));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GeneratorError::InvalidResponse(format!("Failed to parse generation: {}", e)))?;

        parsed.text()
    }
}
