// Route exports
pub mod health;
pub mod sentiment;
pub mod summary;

use actix_web::web;

pub use sentiment::SentimentState;
pub use summary::SummaryState;

pub fn configure_sentiment_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::sentiment_health))
        .configure(sentiment::configure);
}

pub fn configure_summary_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::summary_health))
        .configure(summary::configure);
}
