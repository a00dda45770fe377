//! Aggregation of the two external post providers.
//!
//! Both fetchers follow the same policy: try the live API, and on any
//! failure at all (missing credentials, network, auth, malformed
//! payload) log a warning and serve the bundled sample dataset
//! instead. A provider outage is never an error for the caller.

use rand::seq::SliceRandom;
use std::path::Path;
use thiserror::Error;

use crate::config::FeedOrdering;
use crate::error::ApiError;
use crate::models::Post;

pub mod reddit;
pub mod twitter;

pub use reddit::RedditPage;

/// Why a live provider fetch was abandoned. Only ever logged; the
/// caller sees fallback data instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider credentials are not configured")]
    MissingCredentials,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected provider payload: {0}")]
    Malformed(&'static str),
}

/// Combines posts from both providers under the configured ordering.
/// `recency` sorts newest-first (stable, so same-timestamp posts keep
/// their arrival order); `shuffle` randomizes.
pub fn merge_feed(mut posts: Vec<Post>, ordering: FeedOrdering) -> Vec<Post> {
    match ordering {
        FeedOrdering::Recency => {
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        FeedOrdering::Shuffle => {
            posts.shuffle(&mut rand::thread_rng());
        }
    }
    posts
}

async fn load_fallback<T: serde::de::DeserializeOwned>(
    dir: &Path,
    file: &str,
) -> Result<T, ApiError> {
    let path = dir.join(file);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "fallback dataset unreadable");
        ApiError::internal(e)
    })?;
    serde_json::from_slice(&bytes).map_err(ApiError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Metrics, Platform};
    use chrono::{Duration, Utc};

    fn post(id: &str, age_secs: i64) -> Post {
        Post {
            id: id.into(),
            platform: Platform::Reddit,
            author: "a".into(),
            title: None,
            content: String::new(),
            created_at: Utc::now() - Duration::seconds(age_secs),
            url: String::new(),
            avatar_url: None,
            metrics: Metrics::Reddit {
                score: 0,
                comments: 0,
            },
        }
    }

    #[test]
    fn recency_sorts_newest_first() {
        let merged = merge_feed(
            vec![post("old", 300), post("new", 10), post("mid", 60)],
            FeedOrdering::Recency,
        );
        let ids: Vec<&str> = merged.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[test]
    fn shuffle_keeps_every_post() {
        let merged = merge_feed(
            vec![post("a", 1), post("b", 2), post("c", 3)],
            FeedOrdering::Shuffle,
        );
        let mut ids: Vec<&str> = merged.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
