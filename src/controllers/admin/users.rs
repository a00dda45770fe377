use actix_web::{web, HttpResponse};

use crate::auth::AdminJwt;
use crate::error::ApiError;
use crate::{ledger, App};

/// Full roster for the admin panel.
#[tracing::instrument(skip(app, _admin))]
pub async fn get(app: web::Data<App>, _admin: AdminJwt) -> Result<HttpResponse, ApiError> {
    let users = ledger::list_users(&app.db).await?;
    Ok(HttpResponse::Ok().json(users))
}
