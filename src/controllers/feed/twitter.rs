use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::feed;
use crate::App;

#[tracing::instrument(skip(app))]
pub async fn get(app: web::Data<App>) -> Result<HttpResponse, ApiError> {
    let cfg = &app.config.feed;
    let posts = feed::twitter::fetch(&app.http, &cfg.twitter, &cfg.fallback_dir).await?;
    Ok(HttpResponse::Ok().json(posts))
}
