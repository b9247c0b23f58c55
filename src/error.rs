use crate::models::ErrorResponse;
use crate::services::{ClassifierError, GeneratorError};
use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

pub const NO_TEXT_PROVIDED: &str = "No text provided";
pub const NO_MESSAGES_PROVIDED: &str = "No messages provided";

/// Errors surfaced to HTTP clients as `{"error": message}`
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or empty input (400)
    #[error("{0}")]
    Validation(String),

    /// Any other failure, including unreadable bodies (500)
    #[error("{0}")]
    Upstream(String),
}

impl From<ClassifierError> for ApiError {
    fn from(err: ClassifierError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<GeneratorError> for ApiError {
    fn from(err: GeneratorError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Handle JSON payload errors
///
/// Only a missing or empty field is a client error. An unreadable body
/// (bad JSON, wrong field type, not an object, wrong content type) is a 500.
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::error!("JSON payload error on {}: {}", req.path(), err);
    ApiError::Upstream(err.to_string()).into()
}

/// JSON extractor config that reports malformed bodies in the error envelope
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}
