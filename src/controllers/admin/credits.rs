use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AdminJwt;
use crate::error::ApiError;
use crate::{ledger, App};

#[derive(Debug, Deserialize)]
pub struct PutRequest {
    pub credits: i64,
}

/// Absolute credit overwrite; ledger rules do not apply here.
#[tracing::instrument(skip(app, _admin, request))]
pub async fn put(
    app: web::Data<App>,
    _admin: AdminJwt,
    path: web::Path<String>,
    request: web::Json<PutRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    ledger::set_credits(&app.db, &user_id, request.credits).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Credits updated successfully",
    })))
}
