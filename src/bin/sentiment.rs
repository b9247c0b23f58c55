use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use comment_insights::error::json_config;
use comment_insights::routes::{self, SentimentState};
use comment_insights::services::HuggingFaceClient;
use comment_insights::startup;
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = startup::bootstrap("sentiment service")?;
    let classifier_settings = &settings.sentiment.classifier;

    let classifier = HuggingFaceClient::from_settings(classifier_settings).map_err(|e| {
        error!("Failed to create classifier client: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    if classifier_settings.api_token.is_none() {
        info!("No HF_API_TOKEN set, calling the Inference API anonymously");
    }
    info!("Classifier initialized with model {}", classifier.model());

    let state = SentimentState {
        classifier: Arc::new(classifier),
    };

    let (host, port, workers) = startup::bind_target(&settings.sentiment.server);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_sentiment_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
