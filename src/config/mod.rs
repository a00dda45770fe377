use thiserror::Error;

mod feed;
mod server;

pub use feed::{Feed, FeedOrdering, RedditFeed, TwitterFeed};
pub use server::{Auth, Database, Server};

#[derive(Debug, Error)]
#[error("Failed to load configuration: {0}")]
pub struct ParseError(#[from] figment::Error);
