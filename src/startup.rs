use crate::config::{LoggingSettings, ServerSettings, Settings};
use crate::logging;
use std::io;
use tracing::{error, info};

pub const DEFAULT_WORKERS: usize = 4;

/// Load `.env`, configuration and logging for a service binary
pub fn bootstrap(service: &str) -> io::Result<Settings> {
    dotenv::dotenv().ok();

    let settings = Settings::load();
    match &settings {
        Ok(s) => logging::init(&s.logging),
        Err(_) => logging::init(&LoggingSettings::default()),
    }

    info!("Starting {}...", service);

    settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, format!("Configuration error: {}", e))
    })
}

/// Host, port and worker count for `HttpServer`
pub fn bind_target(server: &ServerSettings) -> (String, u16, usize) {
    (
        server.host.clone(),
        server.port,
        server.workers.unwrap_or(DEFAULT_WORKERS),
    )
}
