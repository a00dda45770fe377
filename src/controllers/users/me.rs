use actix_web::{web, HttpResponse};
use chrono::Local;
use serde::Serialize;

use crate::auth::Jwt;
use crate::error::ApiError;
use crate::ledger::{self, Analytics};
use crate::models::{PostSnapshot, Profile, Role};
use crate::App;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResponse {
    pub username: String,
    pub role: Role,
    pub profile: Profile,
    pub credits: i64,
    pub daily_bonus_given: bool,
    pub saved_posts: Vec<PostSnapshot>,
    pub reported_posts: Vec<PostSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Analytics>,
}

/// Dashboard view. Visiting it runs the same daily-bonus check as
/// login, so whichever happens first that day pays the bonus.
#[tracing::instrument(skip(app, jwt))]
pub async fn get(app: web::Data<App>, jwt: Jwt) -> Result<HttpResponse, ApiError> {
    let daily_bonus_given =
        ledger::apply_daily_bonus(&app.db, &jwt.sub, Local::now().date_naive()).await?;

    let user = ledger::find_by_id(&app.db, &jwt.sub)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let analytics = if jwt.role == Role::Admin {
        Some(ledger::analytics(&app.db).await?)
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(GetResponse {
        username: user.username,
        role: user.role,
        profile: user.profile,
        credits: user.credits,
        daily_bonus_given,
        saved_posts: last_five(&user.saved_posts),
        reported_posts: last_five(&user.reported_posts),
        analytics,
    }))
}

/// The arrays are append-only, so the five newest are the last five,
/// reversed.
fn last_five(posts: &[PostSnapshot]) -> Vec<PostSnapshot> {
    posts.iter().rev().take(5).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;
    use chrono::Utc;

    #[test]
    fn last_five_is_newest_first() {
        let posts: Vec<PostSnapshot> = (0..7)
            .map(|i| PostSnapshot {
                id: format!("p{i}"),
                platform: Platform::Reddit,
                title: String::new(),
                content: String::new(),
                url: String::new(),
                date: Utc::now(),
            })
            .collect();

        let recent = last_five(&posts);
        let ids: Vec<&str> = recent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p6", "p5", "p4", "p3", "p2"]);
    }
}
