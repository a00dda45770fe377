use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

use super::ParseError;

#[derive(Debug, Deserialize)]
pub struct Server {
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    #[serde(default = "Server::default_port")]
    pub port: u16,
    #[serde(default = "Server::default_workers")]
    pub workers: usize,
    /// Frontend origin allowed by the CORS layer. Absent means any
    /// origin is accepted (development mode).
    #[serde(default)]
    pub client_origin: Option<String>,
    pub jwt: Auth,
    #[serde(default)]
    pub db: Database,
    #[serde(default)]
    pub feed: super::Feed,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    /// Secret key for signing session tokens.
    ///
    /// **Environment variables**:
    /// - `CREDDASH_JWT_SECRET`
    pub secret: String,
    /// Token lifetime in seconds.
    ///
    /// **Environment variables**:
    /// - `CREDDASH_JWT_EXPIRY_SECS`
    #[serde(default = "Auth::default_expiry_secs")]
    pub expiry_secs: u64,
}

impl Auth {
    const DEFAULT_EXPIRY_SECS: u64 = 3600;

    // Required by serde
    const fn default_expiry_secs() -> u64 {
        Self::DEFAULT_EXPIRY_SECS
    }
}

#[derive(Debug, Deserialize)]
pub struct Database {
    /// SQLite connection URL.
    ///
    /// **Environment variables**:
    /// - `CREDDASH_DB_URL` or `DATABASE_URL`
    #[serde(default = "Database::default_url")]
    pub url: String,
}

impl Database {
    fn default_url() -> String {
        "sqlite://creddash.db".to_owned()
    }
}

impl Default for Database {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
        }
    }
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();
        Ok(Self::figment().extract::<Self>()?)
    }

    const fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    }

    const fn default_port() -> u16 {
        5000
    }

    fn default_workers() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "creddash.toml";

    /// Creates the default [`figment::Figment`] used to load server
    /// configuration. Split out from [`Server::load`] for testing.
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            // The env provider cannot tell a key separator from an
            // underscore inside a field name, so nested fields with
            // underscores are mapped by hand.
            .merge(Env::prefixed("CREDDASH_").map(|v| match v.as_str() {
                "JWT_SECRET" => "jwt.secret".into(),
                "JWT_EXPIRY_SECS" => "jwt.expiry_secs".into(),

                "CLIENT_ORIGIN" => "client_origin".into(),
                "DB_URL" => "db.url".into(),

                "REDDIT_CLIENT_ID" => "feed.reddit.client_id".into(),
                "REDDIT_CLIENT_SECRET" => "feed.reddit.client_secret".into(),
                "REDDIT_USER_AGENT" => "feed.reddit.user_agent".into(),

                "TWITTER_BEARER_TOKEN" => "feed.twitter.bearer_token".into(),
                "TWITTER_QUERY" => "feed.twitter.query".into(),

                "FEED_FALLBACK_DIR" => "feed.fallback_dir".into(),
                "FEED_ORDERING" => "feed.ordering".into(),

                _ => v.as_str().replace('_', ".").into(),
            }))
            // Environment variable aliases
            .merge(Env::raw().map(|v| match v.as_str() {
                "DATABASE_URL" => "db.url".into(),
                _ => v.into(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedOrdering;
    use figment::Jail;

    #[test]
    fn env_aliases() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "sqlite://elsewhere.db");
            jail.set_env("CREDDASH_JWT_SECRET", "super-secret-signing-key");
            jail.set_env("CREDDASH_JWT_EXPIRY_SECS", "120");
            jail.set_env("CREDDASH_PORT", "8080");
            jail.set_env("CREDDASH_CLIENT_ORIGIN", "http://localhost:5173");
            jail.set_env("CREDDASH_REDDIT_CLIENT_ID", "id");
            jail.set_env("CREDDASH_REDDIT_CLIENT_SECRET", "secret");
            jail.set_env("CREDDASH_TWITTER_BEARER_TOKEN", "bearer");
            jail.set_env("CREDDASH_FEED_ORDERING", "shuffle");

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.db.url, "sqlite://elsewhere.db");
            assert_eq!(config.jwt.secret, "super-secret-signing-key");
            assert_eq!(config.jwt.expiry_secs, 120);
            assert_eq!(config.port, 8080);
            assert_eq!(
                config.client_origin.as_deref(),
                Some("http://localhost:5173")
            );
            assert_eq!(config.feed.reddit.client_id.as_deref(), Some("id"));
            assert_eq!(config.feed.twitter.bearer_token.as_deref(), Some("bearer"));
            assert_eq!(config.feed.ordering, FeedOrdering::Shuffle);
            Ok(())
        });
    }

    #[test]
    fn defaults_apply_without_a_file() {
        Jail::expect_with(|jail| {
            jail.set_env("CREDDASH_JWT_SECRET", "super-secret-signing-key");

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.port, 5000);
            assert_eq!(config.jwt.expiry_secs, 3600);
            assert_eq!(config.db.url, "sqlite://creddash.db");
            assert_eq!(config.feed.ordering, FeedOrdering::Recency);
            assert!(config.feed.reddit.client_id.is_none());
            Ok(())
        });
    }
}
