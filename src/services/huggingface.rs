use crate::config::ClassifierSettings;
use crate::core::{parse_star_rating, top_label};
use crate::models::LabelScore;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when calling the classification model
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Inference API error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Unexpected sentiment label: {0:?}")]
    InvalidLabel(String),
}

/// Classifier output is nested per input for single-string requests,
/// but some deployments return the flat list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceOutput {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceOutput {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            InferenceOutput::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            InferenceOutput::Flat(scores) => scores,
        }
    }
}

/// Hugging Face Inference API client for star-rating sentiment models
///
/// Built once at startup and shared by every worker.
pub struct HuggingFaceClient {
    base_url: String,
    model: String,
    api_token: Option<String>,
    wait_for_model: bool,
    client: Client,
}

impl HuggingFaceClient {
    /// Create a client from the classifier settings
    pub fn from_settings(settings: &ClassifierSettings) -> Result<Self, ClassifierError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_token: settings.api_token.clone(),
            wait_for_model: settings.wait_for_model,
            client: builder.build()?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run the classifier and return every label/score pair
    pub async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        let url = format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        tracing::debug!("Classifying {} chars with {}", text.len(), self.model);

        let mut request = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "inputs": text }));

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        if self.wait_for_model {
            request = request.header("x-wait-for-model", "true");
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClassifierError::ApiError(api_error_message(status, &body)));
        }

        let output: InferenceOutput = serde_json::from_str(&body)
            .map_err(|e| ClassifierError::InvalidResponse(format!("Failed to parse classification: {}", e)))?;

        Ok(output.into_scores())
    }

    /// Score text on a 1-5 scale using the top label's leading digit
    pub async fn analyze(&self, text: &str) -> Result<u8, ClassifierError> {
        let scores = self.classify(text).await?;

        let top = top_label(&scores)
            .ok_or_else(|| ClassifierError::InvalidResponse("Classifier returned no labels".into()))?;

        tracing::debug!("Top label {:?} (score {:.3})", top.label, top.score);

        parse_star_rating(&top.label).ok_or_else(|| ClassifierError::InvalidLabel(top.label.clone()))
    }
}

/// Extract the `error` field of an Inference API failure body
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| match json.get("error") {
            Some(Value::String(message)) => Some(message.clone()),
            Some(Value::Array(messages)) => Some(
                messages
                    .iter()
                    .filter_map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        });

    match message {
        Some(message) if !message.is_empty() => message,
        _ => format!("{} {}", status, body.trim()).trim().to_string(),
    }
}
