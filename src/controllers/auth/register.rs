use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{auth, error::ApiError, ledger, models::Role, App};

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub username: String,
    pub password: String,
}

#[tracing::instrument(skip(app, request))]
pub async fn post(
    app: web::Data<App>,
    request: web::Json<PostRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let username = request.username.trim().to_owned();
    if username.is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation(
            "username and password are required".into(),
        ));
    }

    // Argon2 is deliberately slow; keep it off the async executor.
    let password = request.password;
    let password_hash = web::block(move || auth::hash_password(&password))
        .await
        .map_err(ApiError::internal)??;

    ledger::create_user(&app.db, &username, &password_hash, Role::User).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": format!("User registered with username {username}"),
    })))
}
