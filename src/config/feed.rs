use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Feed {
    pub reddit: RedditFeed,
    pub twitter: TwitterFeed,
    /// Directory holding the bundled sample datasets served when a
    /// live provider call fails.
    pub fallback_dir: PathBuf,
    /// How the combined feed is ordered after merging both providers.
    pub ordering: FeedOrdering,
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            reddit: RedditFeed::default(),
            twitter: TwitterFeed::default(),
            fallback_dir: PathBuf::from("data"),
            ordering: FeedOrdering::default(),
        }
    }
}

/// Ordering policy for the merged feed. The frontend historically
/// flipped between shuffling and sorting by recency, so both stay
/// supported behind configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedOrdering {
    #[default]
    Recency,
    Shuffle,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RedditFeed {
    /// OAuth application credentials for the client-credentials
    /// exchange. Leaving them unset makes every live fetch fail over
    /// to the sample dataset, which is handy in development.
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub user_agent: String,
    pub token_url: String,
    pub api_url: String,
    pub page_size: u32,
}

impl Default for RedditFeed {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            user_agent: "web:creddash:v1.0.0".to_owned(),
            token_url: "https://www.reddit.com/api/v1/access_token".to_owned(),
            api_url: "https://oauth.reddit.com".to_owned(),
            page_size: 10,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TwitterFeed {
    pub bearer_token: Option<String>,
    /// Fixed search term for the recent-search endpoint.
    pub query: String,
    pub api_url: String,
    pub max_results: u32,
}

impl Default for TwitterFeed {
    fn default() -> Self {
        Self {
            bearer_token: None,
            query: "elon musk".to_owned(),
            api_url: "https://api.twitter.com".to_owned(),
            max_results: 10,
        }
    }
}
