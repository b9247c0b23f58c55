use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::error::{ApiError, NO_TEXT_PROVIDED};
use crate::models::{AnalyzeSentimentRequest, SentimentResponse};
use crate::services::HuggingFaceClient;
use std::sync::Arc;

/// State shared across sentiment handlers
#[derive(Clone)]
pub struct SentimentState {
    pub classifier: Arc<HuggingFaceClient>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/analyze_sentiment", web::post().to(analyze_sentiment));
}

/// Score text sentiment
///
/// POST /analyze_sentiment
///
/// Request body:
/// ```json
/// { "text": "I love this" }
/// ```
///
/// Responds with `{"sentiment_score": 1..5}`.
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn analyze_sentiment(
    state: web::Data<SentimentState>,
    req: web::Json<AnalyzeSentimentRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Rejected sentiment request: {}", errors);
        return Err(ApiError::Validation(NO_TEXT_PROVIDED.to_string()));
    }

    let text = req.into_inner().text.unwrap_or_default();

    let score = state.classifier.analyze(&text).await.map_err(|e| {
        tracing::error!("Sentiment classification failed: {}", e);
        ApiError::from(e)
    })?;

    tracing::info!("Scored {} chars of text: {}", text.len(), score);

    Ok(HttpResponse::Ok().json(SentimentResponse { sentiment_score: score }))
}
