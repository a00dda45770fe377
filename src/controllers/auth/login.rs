use actix_web::{web, HttpResponse};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{auth, error::ApiError, ledger, App};

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub token: String,
}

#[tracing::instrument(skip(app, request))]
pub async fn post(
    app: web::Data<App>,
    request: web::Json<PostRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let user = ledger::find_by_username(&app.db, &request.username)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let password = request.password;
    let hash = user.password_hash.clone();
    let matched = web::block(move || auth::verify_password(&password, &hash))
        .await
        .map_err(ApiError::internal)??;

    if !matched {
        return Err(ApiError::InvalidCredential);
    }

    // Daily login bonus; a no-op if already granted today.
    ledger::apply_daily_bonus(&app.db, &user.id, Local::now().date_naive()).await?;

    let token = auth::Jwt::issue(&user, &app.config.jwt)?;
    Ok(HttpResponse::Ok().json(PostResponse { token }))
}
