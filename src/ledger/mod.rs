//! Credit ledger on top of the user document store.
//!
//! Every mutation here is one SQL statement over one user row, with
//! the award conditions folded into the statement itself. That keeps
//! the "award once" invariants intact even when two requests for the
//! same user race: the store, not the application, decides who wins.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::types::Json;
use uuid::Uuid;

use crate::database::Pool;
use crate::error::ApiError;
use crate::models::{
    CompletedFields, Post, PostSnapshot, Profile, ProfileField, Role, User, UserSummary,
};

/// Credits granted once per calendar day on login or profile view.
pub const DAILY_BONUS: i64 = 5;
/// Credits granted for saving a post (first save of that post only).
pub const SAVE_BONUS: i64 = 2;
/// Credits granted for reporting a post.
pub const REPORT_BONUS: i64 = 1;

/// Admin-only aggregate counters over the whole roster.
#[derive(Debug, Clone, Copy, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_users: i64,
    pub total_saved: i64,
    pub total_reported: i64,
}

#[tracing::instrument(skip(db, password_hash))]
pub async fn create_user(
    db: &Pool,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<User, ApiError> {
    let profile = serde_json::to_string(&Profile::default()).map_err(ApiError::internal)?;
    let completed = serde_json::to_string(&CompletedFields::default()).map_err(ApiError::internal)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, password_hash, role, profile, completed_fields)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .bind(profile)
    .bind(completed)
    .fetch_one(db.inner())
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApiError::DuplicateUsername
        }
        _ => e.into(),
    })?;

    Ok(user)
}

pub async fn find_by_username(db: &Pool, username: &str) -> Result<Option<User>, ApiError> {
    Ok(
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(db.inner())
            .await?,
    )
}

pub async fn find_by_id(db: &Pool, id: &str) -> Result<Option<User>, ApiError> {
    Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?1")
        .bind(id)
        .fetch_optional(db.inner())
        .await?)
}

/// Awards the daily login bonus if `today` differs from the stored
/// last-login date. Calendar-day equality, not a 24-hour window, and
/// the comparison happens inside the update so repeated calls within
/// one day award exactly once.
///
/// Returns whether the bonus was granted by this call.
#[tracing::instrument(skip(db))]
pub async fn apply_daily_bonus(db: &Pool, user_id: &str, today: NaiveDate) -> Result<bool, ApiError> {
    let result = sqlx::query(
        r#"
        UPDATE users SET
            credits = credits + ?3,
            last_login = ?2,
            updated_at = datetime('now')
        WHERE id = ?1 AND (last_login IS NULL OR last_login <> ?2)
        "#,
    )
    .bind(user_id)
    .bind(today)
    .bind(DAILY_BONUS)
    .execute(db.inner())
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Writes `profile[field] = value` unconditionally and pays the
/// field's completion bonus if and only if the field has never been
/// completed before. Returns the credit balance after the update.
#[tracing::instrument(skip(db, value))]
pub async fn update_profile_field(
    db: &Pool,
    user_id: &str,
    field: ProfileField,
    value: &str,
) -> Result<i64, ApiError> {
    let credits = sqlx::query_as::<_, (i64,)>(
        r#"
        UPDATE users SET
            profile = json_set(profile, ?2, ?3),
            credits = credits + (CASE WHEN json_extract(completed_fields, ?2) THEN 0 ELSE ?4 END),
            completed_fields = json_set(completed_fields, ?2, json('true')),
            updated_at = datetime('now')
        WHERE id = ?1
        RETURNING credits
        "#,
    )
    .bind(user_id)
    .bind(field.json_path())
    .bind(value)
    .bind(field.bonus())
    .fetch_optional(db.inner())
    .await?
    .ok_or(ApiError::UserNotFound)?;

    Ok(credits.0)
}

/// Appends a snapshot to `saved_posts` and credits the save bonus,
/// unless a snapshot with the same `(id, platform)` is already there.
#[tracing::instrument(skip(db, post))]
pub async fn save_post(
    db: &Pool,
    user_id: &str,
    post: &Post,
    now: DateTime<Utc>,
) -> Result<(Vec<PostSnapshot>, i64), ApiError> {
    let snapshot = PostSnapshot::of(post, now);
    let snapshot = serde_json::to_string(&snapshot).map_err(ApiError::internal)?;

    let row = sqlx::query_as::<_, (Json<Vec<PostSnapshot>>, i64)>(
        r#"
        UPDATE users SET
            saved_posts = json_insert(saved_posts, '$[#]', json(?2)),
            credits = credits + ?5,
            updated_at = datetime('now')
        WHERE id = ?1 AND NOT EXISTS (
            SELECT 1 FROM json_each(users.saved_posts)
            WHERE json_extract(json_each.value, '$.id') = ?3
              AND json_extract(json_each.value, '$.platform') = ?4
        )
        RETURNING saved_posts, credits
        "#,
    )
    .bind(user_id)
    .bind(&snapshot)
    .bind(&post.id)
    .bind(post.platform.as_str())
    .bind(SAVE_BONUS)
    .fetch_optional(db.inner())
    .await?;

    match row {
        Some((posts, credits)) => Ok((posts.0, credits)),
        // Zero rows means either the user is gone or the guard fired.
        None => match find_by_id(db, user_id).await? {
            Some(..) => Err(ApiError::AlreadySaved),
            None => Err(ApiError::UserNotFound),
        },
    }
}

/// Appends a snapshot to `reported_posts` and credits the report
/// bonus. Reports are deliberately not deduplicated; reporting the
/// same post twice pays twice (reference behavior, kept as-is).
#[tracing::instrument(skip(db, post))]
pub async fn report_post(
    db: &Pool,
    user_id: &str,
    post: &Post,
    now: DateTime<Utc>,
) -> Result<(Vec<PostSnapshot>, i64), ApiError> {
    let snapshot = PostSnapshot::of(post, now);
    let snapshot = serde_json::to_string(&snapshot).map_err(ApiError::internal)?;

    let row = sqlx::query_as::<_, (Json<Vec<PostSnapshot>>, i64)>(
        r#"
        UPDATE users SET
            reported_posts = json_insert(reported_posts, '$[#]', json(?2)),
            credits = credits + ?3,
            updated_at = datetime('now')
        WHERE id = ?1
        RETURNING reported_posts, credits
        "#,
    )
    .bind(user_id)
    .bind(&snapshot)
    .bind(REPORT_BONUS)
    .fetch_optional(db.inner())
    .await?;

    match row {
        Some((posts, credits)) => Ok((posts.0, credits)),
        None => Err(ApiError::UserNotFound),
    }
}

pub async fn list_users(db: &Pool) -> Result<Vec<UserSummary>, ApiError> {
    Ok(sqlx::query_as::<_, UserSummary>(
        "SELECT id, username, credits, role FROM users ORDER BY created_at",
    )
    .fetch_all(db.inner())
    .await?)
}

/// Absolute overwrite of a user's credit balance. Bypasses every
/// ledger rule; any integer is accepted, negatives included.
#[tracing::instrument(skip(db))]
pub async fn set_credits(db: &Pool, user_id: &str, credits: i64) -> Result<(), ApiError> {
    let result =
        sqlx::query("UPDATE users SET credits = ?2, updated_at = datetime('now') WHERE id = ?1")
            .bind(user_id)
            .bind(credits)
            .execute(db.inner())
            .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::UserNotFound);
    }
    Ok(())
}

pub async fn analytics(db: &Pool) -> Result<Analytics, ApiError> {
    Ok(sqlx::query_as::<_, Analytics>(
        r#"
        SELECT count(*) AS total_users,
               COALESCE(SUM(json_array_length(saved_posts)), 0) AS total_saved,
               COALESCE(SUM(json_array_length(reported_posts)), 0) AS total_reported
        FROM users
        "#,
    )
    .fetch_one(db.inner())
    .await?)
}
