use actix_cors::Cors;
use actix_web::{web, HttpServer};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use crate::app::AppError;
use crate::{config, controllers, App};

#[derive(Debug, Error)]
pub enum StartServerError {
    #[error("Failed to load configuration")]
    Config(#[from] config::ParseError),
    #[error("Failed to initialize the application")]
    App(#[from] AppError),
    #[error("Failed to bind the HTTP listener")]
    Io(#[from] std::io::Error),
}

/// Builds the CORS layer for the configured frontend origin; without
/// one, anything goes (development mode).
fn cors_layer(client_origin: Option<&str>) -> Cors {
    match client_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials(),
        None => Cors::permissive(),
    }
}

pub async fn run(config: config::Server) -> Result<(), StartServerError> {
    let addr = (config.ip, config.port);
    let workers = config.workers;

    let app = App::new(config).await?;
    let data = web::Data::new(app);

    tracing::info!(address = %addr.0, port = addr.1, "starting HTTP server");
    HttpServer::new(move || {
        let cors = cors_layer(data.config.client_origin.as_deref());
        actix_web::App::new()
            .app_data(data.clone())
            .wrap(cors)
            .wrap(TracingLogger::default())
            .configure(controllers::configure)
    })
    .workers(workers)
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
