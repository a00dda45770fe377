use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::{load_fallback, ProviderError};
use crate::config::TwitterFeed;
use crate::error::ApiError;
use crate::models::{Metrics, Platform, Post};

pub const FALLBACK_FILE: &str = "sample_twitter.json";
const DEFAULT_AVATAR: &str = "/default-avatar.png";

/// Single-shot recent search for the configured query. No pagination;
/// the author expansion map resolves display names and avatars. Live
/// failures degrade to the bundled sample dataset.
#[tracing::instrument(skip(http, cfg, fallback_dir))]
pub async fn fetch(
    http: &reqwest::Client,
    cfg: &TwitterFeed,
    fallback_dir: &Path,
) -> Result<Vec<Post>, ApiError> {
    match fetch_live(http, cfg).await {
        Ok(posts) => Ok(posts),
        Err(error) => {
            tracing::warn!(%error, "Twitter fetch failed, serving sample dataset");
            load_fallback(fallback_dir, FALLBACK_FILE).await
        }
    }
}

async fn fetch_live(
    http: &reqwest::Client,
    cfg: &TwitterFeed,
) -> Result<Vec<Post>, ProviderError> {
    let bearer = cfg
        .bearer_token
        .as_ref()
        .ok_or(ProviderError::MissingCredentials)?;

    let response: SearchResponse = http
        .get(format!("{}/2/tweets/search/recent", cfg.api_url))
        .bearer_auth(bearer)
        .query(&[
            ("query", cfg.query.as_str()),
            ("max_results", &cfg.max_results.to_string()),
            ("tweet.fields", "created_at,public_metrics"),
            ("expansions", "author_id"),
            ("user.fields", "username,name,profile_image_url"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let tweets = response
        .data
        .ok_or(ProviderError::Malformed("no tweets in response"))?;

    let users: HashMap<&str, &RawUser> = response
        .includes
        .as_ref()
        .map(|inc| inc.users.iter().map(|u| (u.id.as_str(), u)).collect())
        .unwrap_or_default();

    Ok(tweets
        .into_iter()
        .map(|tweet| normalize(tweet, &users))
        .collect())
}

fn normalize(tweet: RawTweet, users: &HashMap<&str, &RawUser>) -> Post {
    let user = tweet
        .author_id
        .as_deref()
        .and_then(|id| users.get(id).copied());

    let author = user
        .and_then(|u| u.name.clone().or_else(|| u.username.clone()))
        .unwrap_or_else(|| "Unknown".to_owned());

    let avatar_url = user
        .and_then(|u| u.profile_image_url.clone())
        .unwrap_or_else(|| DEFAULT_AVATAR.to_owned());

    Post {
        url: format!("https://twitter.com/i/web/status/{}", tweet.id),
        id: tweet.id,
        platform: Platform::Twitter,
        author,
        title: None,
        content: tweet.text,
        created_at: tweet.created_at,
        avatar_url: Some(avatar_url),
        metrics: Metrics::Twitter {
            like_count: tweet.public_metrics.like_count,
            reply_count: tweet.public_metrics.reply_count,
            retweet_count: tweet.public_metrics.retweet_count,
        },
    }
}

// Wire shape of the v2 recent-search response, reduced to what we use.

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<RawTweet>>,
    #[serde(default)]
    includes: Option<Includes>,
}

#[derive(Debug, Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawTweet {
    id: String,
    text: String,
    #[serde(default)]
    author_id: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    public_metrics: RawMetrics,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetrics {
    #[serde(default)]
    like_count: i64,
    #[serde(default)]
    reply_count: i64,
    #[serde(default)]
    retweet_count: i64,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    profile_image_url: Option<String>,
}
