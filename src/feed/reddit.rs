use chrono::DateTime;
use reqwest::header;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{load_fallback, ProviderError};
use crate::config::RedditFeed;
use crate::error::ApiError;
use crate::models::{Metrics, Platform, Post};

pub const FALLBACK_FILE: &str = "sample_reddit.json";

/// One page of the "top" listing plus the opaque continuation cursor.
/// `after` is `None` on the last page and always `None` for fallback
/// data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPage {
    pub posts: Vec<Post>,
    pub after: Option<String>,
}

/// Fetches one page of top posts, continuing from `after` when given.
///
/// A fresh client-credentials token is obtained per call; tokens are
/// deliberately not cached across requests. Any live failure degrades
/// to the bundled sample dataset.
#[tracing::instrument(skip(http, cfg, fallback_dir))]
pub async fn fetch_page(
    http: &reqwest::Client,
    cfg: &RedditFeed,
    after: Option<&str>,
    fallback_dir: &Path,
) -> Result<RedditPage, ApiError> {
    match fetch_live(http, cfg, after).await {
        Ok(page) => Ok(page),
        Err(error) => {
            tracing::warn!(%error, "Reddit fetch failed, serving sample dataset");
            load_fallback(fallback_dir, FALLBACK_FILE).await
        }
    }
}

async fn fetch_live(
    http: &reqwest::Client,
    cfg: &RedditFeed,
    after: Option<&str>,
) -> Result<RedditPage, ProviderError> {
    let (client_id, client_secret) = match (&cfg.client_id, &cfg.client_secret) {
        (Some(id), Some(secret)) => (id, secret),
        _ => return Err(ProviderError::MissingCredentials),
    };

    let token: AccessToken = http
        .post(&cfg.token_url)
        .basic_auth(client_id, Some(client_secret))
        .header(header::USER_AGENT, &cfg.user_agent)
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let mut request = http
        .get(format!("{}/r/all/top", cfg.api_url))
        .bearer_auth(&token.access_token)
        .header(header::USER_AGENT, &cfg.user_agent)
        .query(&[("limit", cfg.page_size.to_string())]);

    if let Some(after) = after {
        request = request.query(&[("after", after)]);
    }

    let listing: Listing = request.send().await?.error_for_status()?.json().await?;
    Ok(normalize(listing))
}

fn normalize(listing: Listing) -> RedditPage {
    let posts = listing
        .data
        .children
        .into_iter()
        .map(|child| {
            let raw = child.data;
            Post {
                url: format!("https://www.reddit.com{}", raw.permalink),
                id: raw.id,
                platform: Platform::Reddit,
                author: raw.author,
                title: Some(raw.title),
                content: raw.selftext,
                created_at: DateTime::from_timestamp(raw.created_utc as i64, 0)
                    .unwrap_or_default(),
                avatar_url: raw
                    .thumbnail
                    .filter(|thumb| thumb.starts_with("http")),
                metrics: Metrics::Reddit {
                    score: raw.score,
                    comments: raw.num_comments,
                },
            }
        })
        .collect();

    RedditPage {
        posts,
        after: listing.data.after,
    }
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
}

// Wire shape of a Reddit listing, reduced to the fields we keep.

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
    #[serde(default)]
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: RawPost,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    id: String,
    title: String,
    #[serde(default)]
    selftext: String,
    author: String,
    permalink: String,
    #[serde(default)]
    thumbnail: Option<String>,
    created_utc: f64,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "after": "t3_next",
            "children": [
                {
                    "kind": "t3",
                    "data": {
                        "id": "1abcd",
                        "title": "An interesting title",
                        "selftext": "Some body text",
                        "author": "rustacean",
                        "permalink": "/r/rust/comments/1abcd/an_interesting_title/",
                        "thumbnail": "https://b.thumbs.example/abc.jpg",
                        "created_utc": 1700000000.0,
                        "score": 512,
                        "num_comments": 37
                    }
                },
                {
                    "kind": "t3",
                    "data": {
                        "id": "1efgh",
                        "title": "Link only",
                        "selftext": "",
                        "author": "lurker",
                        "permalink": "/r/all/comments/1efgh/link_only/",
                        "thumbnail": "self",
                        "created_utc": 1700000500.0,
                        "score": 3,
                        "num_comments": 0
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn normalizes_a_raw_listing() {
        let listing: Listing = serde_json::from_str(SAMPLE_LISTING).unwrap();
        let page = normalize(listing);

        assert_eq!(page.after.as_deref(), Some("t3_next"));
        assert_eq!(page.posts.len(), 2);

        let first = &page.posts[0];
        assert_eq!(first.id, "1abcd");
        assert_eq!(first.platform, Platform::Reddit);
        assert_eq!(first.author, "rustacean");
        assert_eq!(first.title.as_deref(), Some("An interesting title"));
        assert_eq!(
            first.url,
            "https://www.reddit.com/r/rust/comments/1abcd/an_interesting_title/"
        );
        assert_eq!(first.created_at.timestamp(), 1_700_000_000);
        assert_eq!(
            first.metrics,
            Metrics::Reddit {
                score: 512,
                comments: 37
            }
        );
        assert_eq!(
            first.avatar_url.as_deref(),
            Some("https://b.thumbs.example/abc.jpg")
        );

        // "self"/"default" thumbnails are not URLs and are dropped.
        assert_eq!(page.posts[1].avatar_url, None);
    }

    #[tokio::test]
    async fn missing_credentials_fail_over_to_the_sample_dataset() {
        let http = reqwest::Client::new();
        let cfg = RedditFeed::default();
        assert!(cfg.client_id.is_none());

        let page = fetch_page(&http, &cfg, None, Path::new("data")).await.unwrap();
        assert!(!page.posts.is_empty());
        assert!(page.after.is_none());
        assert!(page.posts.iter().all(|p| p.platform == Platform::Reddit));
    }

    #[tokio::test]
    async fn unreachable_provider_fails_over_to_the_sample_dataset() {
        let http = reqwest::Client::new();
        let cfg = RedditFeed {
            client_id: Some("id".into()),
            client_secret: Some("secret".into()),
            token_url: "http://127.0.0.1:9/token".into(),
            api_url: "http://127.0.0.1:9".into(),
            ..RedditFeed::default()
        };

        let page = fetch_page(&http, &cfg, None, Path::new("data")).await.unwrap();
        let expected: RedditPage = serde_json::from_slice(
            &std::fs::read(Path::new("data").join(FALLBACK_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(page.posts, expected.posts);
    }

    #[tokio::test]
    async fn a_missing_fallback_file_is_the_only_hard_failure() {
        let http = reqwest::Client::new();
        let cfg = RedditFeed::default();
        let dir = tempfile::tempdir().unwrap();

        let err = fetch_page(&http, &cfg, None, dir.path()).await.unwrap_err();
        assert!(matches!(err, ApiError::Internal(..)));
    }
}
