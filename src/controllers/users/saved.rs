use actix_web::{web, HttpResponse};

use crate::auth::Jwt;
use crate::error::ApiError;
use crate::{ledger, App};

/// Full save history, oldest first.
#[tracing::instrument(skip(app, jwt))]
pub async fn get(app: web::Data<App>, jwt: Jwt) -> Result<HttpResponse, ApiError> {
    let user = ledger::find_by_id(&app.db, &jwt.sub)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(user.saved_posts))
}
