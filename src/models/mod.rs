// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::LabelScore;
pub use requests::{AnalyzeSentimentRequest, SummarizeRequest};
pub use responses::{ErrorResponse, HealthResponse, SentimentResponse, SummaryResponse};
