use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Jwt;
use crate::error::ApiError;
use crate::models::ProfileField;
use crate::{ledger, App};

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub field: String,
    pub value: String,
}

#[tracing::instrument(skip(app, jwt, request))]
pub async fn post(
    app: web::Data<App>,
    jwt: Jwt,
    request: web::Json<PostRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let field = ProfileField::parse(&request.field)
        .ok_or_else(|| ApiError::UnknownField(request.field.clone()))?;

    let credits = ledger::update_profile_field(&app.db, &jwt.sub, field, &request.value).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{} updated successfully.", request.field),
        "credits": credits,
    })))
}
