use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Reddit,
    Twitter,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reddit => "Reddit",
            Self::Twitter => "Twitter",
        }
    }
}

/// Per-platform engagement counters. Serialized untagged so the wire
/// shape stays the plain map each provider already produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metrics {
    Reddit {
        score: i64,
        comments: i64,
    },
    Twitter {
        like_count: i64,
        reply_count: i64,
        retweet_count: i64,
    },
}

/// A feed item normalized from either provider. Transient: never
/// persisted except as a [`PostSnapshot`] when saved or reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub platform: Platform,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub metrics: Metrics,
}

/// What a user keeps when saving or reporting a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSnapshot {
    pub id: String,
    pub platform: Platform,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    pub date: DateTime<Utc>,
}

impl PostSnapshot {
    pub fn of(post: &Post, date: DateTime<Utc>) -> Self {
        Self {
            id: post.id.clone(),
            platform: post.platform,
            title: post.title.clone().unwrap_or_default(),
            content: post.content.clone(),
            url: post.url.clone(),
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_deserialize_by_shape() {
        let reddit: Metrics = serde_json::from_str(r#"{"score": 120, "comments": 4}"#).unwrap();
        assert_eq!(
            reddit,
            Metrics::Reddit {
                score: 120,
                comments: 4
            }
        );

        // Twitter's public_metrics carries extra counters we ignore.
        let twitter: Metrics = serde_json::from_str(
            r#"{"like_count": 9, "reply_count": 1, "retweet_count": 3, "quote_count": 0}"#,
        )
        .unwrap();
        assert_eq!(
            twitter,
            Metrics::Twitter {
                like_count: 9,
                reply_count: 1,
                retweet_count: 3
            }
        );
    }

    #[test]
    fn snapshot_drops_feed_only_fields() {
        let post = Post {
            id: "abc".into(),
            platform: Platform::Reddit,
            author: "someone".into(),
            title: Some("hello".into()),
            content: "body".into(),
            created_at: Utc::now(),
            url: "https://www.reddit.com/r/all/abc".into(),
            avatar_url: None,
            metrics: Metrics::Reddit {
                score: 1,
                comments: 0,
            },
        };

        let now = Utc::now();
        let snapshot = PostSnapshot::of(&post, now);
        assert_eq!(snapshot.id, "abc");
        assert_eq!(snapshot.platform, Platform::Reddit);
        assert_eq!(snapshot.title, "hello");
        assert_eq!(snapshot.date, now);
    }
}
