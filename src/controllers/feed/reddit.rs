use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::ApiError;
use crate::feed;
use crate::App;

#[derive(Debug, Deserialize)]
pub struct GetQuery {
    /// Opaque continuation cursor from the previous page.
    pub after: Option<String>,
}

#[tracing::instrument(skip(app))]
pub async fn get(
    app: web::Data<App>,
    query: web::Query<GetQuery>,
) -> Result<HttpResponse, ApiError> {
    let cfg = &app.config.feed;
    let page = feed::reddit::fetch_page(
        &app.http,
        &cfg.reddit,
        query.after.as_deref(),
        &cfg.fallback_dir,
    )
    .await?;

    Ok(HttpResponse::Ok().json(page))
}
