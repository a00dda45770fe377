use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::Jwt;
use crate::error::ApiError;
use crate::models::{Post, PostSnapshot};
use crate::{ledger, App};

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub post: Post,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub saved_posts: Vec<PostSnapshot>,
    pub credits: i64,
}

#[tracing::instrument(skip(app, jwt, request))]
pub async fn post(
    app: web::Data<App>,
    jwt: Jwt,
    request: web::Json<PostRequest>,
) -> Result<HttpResponse, ApiError> {
    let (saved_posts, credits) =
        ledger::save_post(&app.db, &jwt.sub, &request.post, Utc::now()).await?;

    Ok(HttpResponse::Ok().json(PostResponse {
        saved_posts,
        credits,
    }))
}
