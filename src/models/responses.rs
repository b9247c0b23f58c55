use serde::{Deserialize, Serialize};

/// Response for the sentiment endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResponse {
    pub sentiment_score: u8,
}

/// Response for the summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
