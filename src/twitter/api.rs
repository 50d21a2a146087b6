use super::{Author, Post, SearchProvider, TimelineSource};
use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from the Twitter API v2 client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Twitter API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("user @{0} not found")]
    UserNotFound(String),
}

/// Twitter API v2 client. One instance per run; implements both the
/// timeline and search capabilities the pipeline consumes.
pub struct TwitterApi {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

const TWEET_FIELDS: &str = "id,text,author_id,created_at,referenced_tweets";
const USER_FIELDS: &str = "id,name,username";

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    includes: Option<Includes>,
}

#[derive(Debug, Default, Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<ApiUser>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiUser {
    id: String,
    name: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: String,
    text: String,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    referenced_tweets: Option<Vec<ReferencedTweet>>,
}

#[derive(Debug, Deserialize)]
struct ReferencedTweet {
    #[serde(rename = "type")]
    ref_type: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl TwitterApi {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("copycatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "twitter api request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: ApiErrorBody = response.json().await.unwrap_or(ApiErrorBody {
                title: None,
                detail: None,
            });
            let message = body
                .detail
                .or(body.title)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    async fn user_id(&self, username: &str) -> Result<String, ApiError> {
        let response: ApiResponse<ApiUser> = self
            .get(&format!("/2/users/by/username/{}", username), &[])
            .await?;

        response
            .data
            .map(|user| user.id)
            .ok_or_else(|| ApiError::UserNotFound(username.to_string()))
    }
}

/// Join tweets against the `includes.users` expansion. Tweets whose author
/// or timestamp the API did not return are skipped with a warning.
fn into_posts(response: ApiResponse<Vec<ApiTweet>>) -> Vec<Post> {
    let authors: HashMap<String, Author> = response
        .includes
        .unwrap_or_default()
        .users
        .into_iter()
        .map(|u| {
            (
                u.id,
                Author {
                    name: u.name,
                    handle: u.username,
                },
            )
        })
        .collect();

    response
        .data
        .unwrap_or_default()
        .into_iter()
        .filter_map(|tweet| {
            let author = tweet.author_id.as_ref().and_then(|id| authors.get(id));
            let Some(author) = author else {
                warn!(id = %tweet.id, "tweet without resolvable author, skipping");
                return None;
            };
            let Some(created_at) = tweet.created_at else {
                warn!(id = %tweet.id, "tweet without created_at, skipping");
                return None;
            };

            let retweet = tweet
                .referenced_tweets
                .as_deref()
                .unwrap_or_default()
                .iter()
                .any(|r| r.ref_type == "retweeted");

            Some(Post {
                id: tweet.id,
                author: author.clone(),
                text: tweet.text,
                created_at,
                retweet,
            })
        })
        .collect()
}

#[async_trait]
impl TimelineSource for TwitterApi {
    async fn recent_posts(&self, username: &str, limit: usize) -> Result<Vec<Post>> {
        let user_id = self.user_id(username).await?;

        // The timeline endpoint accepts 5..=100 results per page.
        let max_results = limit.clamp(5, 100);
        let params = [
            ("tweet.fields", TWEET_FIELDS.to_string()),
            ("expansions", "author_id".to_string()),
            ("user.fields", USER_FIELDS.to_string()),
            ("exclude", "retweets".to_string()),
            ("max_results", max_results.to_string()),
        ];

        let response: ApiResponse<Vec<ApiTweet>> = self
            .get(&format!("/2/users/{}/tweets", user_id), &params)
            .await?;

        let mut posts = into_posts(response);
        posts.truncate(limit);
        Ok(posts)
    }
}

#[async_trait]
impl SearchProvider for TwitterApi {
    async fn search(&self, query: &str) -> Result<Vec<Post>> {
        let params = [
            ("query", query.to_string()),
            ("tweet.fields", TWEET_FIELDS.to_string()),
            ("expansions", "author_id".to_string()),
            ("user.fields", USER_FIELDS.to_string()),
            ("max_results", "100".to_string()),
        ];

        let response: ApiResponse<Vec<ApiTweet>> =
            self.get("/2/tweets/search/recent", &params).await?;

        Ok(into_posts(response))
    }
}
