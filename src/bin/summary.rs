use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use comment_insights::error::json_config;
use comment_insights::routes::{self, SummaryState};
use comment_insights::services::GeminiClient;
use comment_insights::startup;
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = startup::bootstrap("summary service")?;

    // Refuse to start without a key; set GEMINI_API_KEY or GOOGLE_API_KEY
    let generator = GeminiClient::from_settings(&settings.summary.generator).map_err(|e| {
        error!("Failed to create generator client: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    info!("Generator initialized with model {}", generator.model());

    let state = SummaryState {
        generator: Arc::new(generator),
    };

    let (host, port, workers) = startup::bind_target(&settings.summary.server);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_summary_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
