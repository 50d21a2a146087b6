pub mod api;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Identity of a post's author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub handle: String,
}

impl Author {
    pub fn display(&self) -> String {
        format!("{} (@{})", self.name, self.handle)
    }
}

/// A single post as fetched from the platform. Immutable after fetch;
/// the pipeline only ever reads it.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub author: Author,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// True when the post is a retweet (or a retweet of a retweet).
    pub retweet: bool,
}

/// Supplies a user's most recent non-retweet posts.
#[async_trait]
pub trait TimelineSource: Send + Sync {
    async fn recent_posts(&self, username: &str, limit: usize) -> Result<Vec<Post>>;
}

/// Finds posts whose text approximately matches a query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Post>>;
}
