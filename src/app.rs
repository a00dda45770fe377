use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::{config, database};

/// Shared per-process state handed to every request handler.
#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    pub db: database::Pool,
    pub http: reqwest::Client,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to open the user store")]
    Database(#[from] sqlx::Error),
    #[error("Failed to build the HTTP client")]
    Http(#[from] reqwest::Error),
}

impl App {
    /// Default timeout for outbound provider calls. The upstream APIs
    /// occasionally hang; a stuck fetch should degrade to fallback
    /// data instead of pinning the request.
    const PROVIDER_TIMEOUT_SECS: u64 = 10;

    #[tracing::instrument(skip_all)]
    pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
        let db = database::Pool::connect(&cfg.db).await?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::PROVIDER_TIMEOUT_SECS))
            .user_agent(cfg.feed.reddit.user_agent.clone())
            .build()?;

        Ok(Self {
            config: Arc::new(cfg),
            db,
            http,
        })
    }
}
