use actix_web::{HttpResponse, Responder};
use crate::models::HealthResponse;

/// Liveness only; upstream models are not probed
fn health(service: &str) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: service.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

pub async fn sentiment_health() -> impl Responder {
    health("sentiment")
}

pub async fn summary_health() -> impl Responder {
    health("summary")
}
