//! Comment Insights - sentiment scoring and conversation summaries
//!
//! Two independent HTTP services built from this library:
//! `sentiment-service` scores text on a 1-5 scale with a hosted classifier,
//! `summary-service` summarizes a list of messages with a hosted LLM.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod startup;

// Re-export commonly used types
pub use crate::core::{build_summary_prompt, parse_star_rating};
pub use error::ApiError;
pub use models::{AnalyzeSentimentRequest, SentimentResponse, SummarizeRequest, SummaryResponse};
