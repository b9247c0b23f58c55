use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::build_summary_prompt;
use crate::error::{ApiError, NO_MESSAGES_PROVIDED};
use crate::models::{SummarizeRequest, SummaryResponse};
use crate::services::GeminiClient;
use std::sync::Arc;

/// State shared across summary handlers
#[derive(Clone)]
pub struct SummaryState {
    pub generator: Arc<GeminiClient>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/summarize", web::post().to(summarize));
}

/// Summarize a conversation from the users' perspective
///
/// POST /summarize
///
/// Request body:
/// ```json
/// { "messages": ["string"] }
/// ```
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn summarize(
    state: web::Data<SummaryState>,
    req: web::Json<SummarizeRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Rejected summary request: {}", errors);
        return Err(ApiError::Validation(NO_MESSAGES_PROVIDED.to_string()));
    }

    let messages = req.into_inner().messages.unwrap_or_default();
    let prompt = build_summary_prompt(&messages);

    let summary = state.generator.generate_content(&prompt).await.map_err(|e| {
        tracing::error!("Summary generation failed: {}", e);
        ApiError::from(e)
    })?;

    tracing::info!(
        "Summarized {} messages into {} chars",
        messages.len(),
        summary.len()
    );

    Ok(HttpResponse::Ok().json(SummaryResponse { summary }))
}
