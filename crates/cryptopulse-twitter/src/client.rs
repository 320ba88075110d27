//! HTTP client for the Twitter v2 REST API.
//!
//! Wraps `reqwest` with bearer-token auth, typed status handling and
//! retry on transient failures. A `200` whose body carries only an
//! `errors` array is surfaced as [`TwitterError::ApiError`].

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::TwitterError;
use crate::retry::retry_with_backoff;
use crate::types::{ApiErrorItem, Tweet, TweetsResponse, TwitterUser, UserResponse};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";
const USER_AGENT: &str = "CryptoSentimentBot/1.0";
const TWEET_FIELDS: &str = "created_at,text,public_metrics";
const EXCLUDE: &str = "retweets,replies";

/// Smallest page size the timeline endpoint accepts.
pub const MAX_RESULTS_FLOOR: u32 = 5;
/// Largest page size the timeline endpoint accepts.
pub const MAX_RESULTS_CEILING: u32 = 100;

/// Client for the Twitter v2 REST API.
///
/// Use [`TwitterClient::new`] for production or [`TwitterClient::with_base_url`]
/// to point at a mock server in tests.
pub struct TwitterClient {
    client: Client,
    bearer_token: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl TwitterClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`TwitterError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        bearer_token: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, TwitterError> {
        Self::with_base_url(
            bearer_token,
            timeout_secs,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TwitterError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`TwitterError::InvalidBaseUrl`] if `base_url` does not
    /// parse as a hierarchical URL.
    pub fn with_base_url(
        bearer_token: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, TwitterError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| TwitterError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(TwitterError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            bearer_token: bearer_token.to_owned(),
            base_url: parsed,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Looks up a user by handle.
    ///
    /// # Errors
    ///
    /// - [`TwitterError::ApiError`] if the API answers with `errors` and no user.
    /// - [`TwitterError::Unauthorized`], [`TwitterError::NotFound`],
    ///   [`TwitterError::RateLimited`] or [`TwitterError::UnexpectedStatus`]
    ///   for non-2xx responses (after retries where applicable).
    /// - [`TwitterError::Http`] on network failure.
    /// - [`TwitterError::Deserialize`] if the body does not match the expected shape.
    pub async fn get_user_id(&self, username: &str) -> Result<TwitterUser, TwitterError> {
        let url = self.endpoint(&["2", "users", "by", "username", username], &[]);
        let envelope: UserResponse = self
            .get_json(&url, &format!("user lookup for {username}"))
            .await?;

        envelope
            .data
            .ok_or_else(|| api_error(&envelope.errors, &format!("no user data for {username}")))
    }

    /// Fetches a user's most recent original posts (retweets and replies excluded).
    ///
    /// `max_results` is clamped to [`MAX_RESULTS_FLOOR`]`..=`[`MAX_RESULTS_CEILING`].
    /// A timeline with no posts yields an empty vector.
    ///
    /// # Errors
    ///
    /// Same as [`TwitterClient::get_user_id`]; an `errors` array without
    /// `data` is reported as [`TwitterError::ApiError`].
    pub async fn fetch_user_tweets(
        &self,
        user_id: &str,
        max_results: u32,
    ) -> Result<Vec<Tweet>, TwitterError> {
        let max_results = clamp_max_results(max_results).to_string();
        let url = self.endpoint(
            &["2", "users", user_id, "tweets"],
            &[
                ("max_results", &max_results),
                ("tweet.fields", TWEET_FIELDS),
                ("exclude", EXCLUDE),
            ],
        );
        let envelope: TweetsResponse = self
            .get_json(&url, &format!("timeline for user {user_id}"))
            .await?;

        match envelope.data {
            Some(tweets) => Ok(tweets),
            None if envelope.errors.is_empty() => Ok(Vec::new()),
            None => Err(api_error(&envelope.errors, "")),
        }
    }

    /// Appends path segments (percent-encoded) and query pairs to the base URL.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends an authenticated GET, maps non-2xx statuses to typed errors and
    /// parses the body, retrying transient failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, TwitterError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url.clone())
                .bearer_auth(&self.bearer_token)
                .send()
                .await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(TwitterError::RateLimited { retry_after_secs });
            }

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(TwitterError::Unauthorized {
                    status: status.as_u16(),
                });
            }

            if status == StatusCode::NOT_FOUND {
                return Err(TwitterError::NotFound {
                    url: url.to_string(),
                });
            }

            if !status.is_success() {
                return Err(TwitterError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str::<T>(&body).map_err(|e| TwitterError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }
}

fn clamp_max_results(requested: u32) -> u32 {
    requested.clamp(MAX_RESULTS_FLOOR, MAX_RESULTS_CEILING)
}

fn api_error(errors: &[ApiErrorItem], fallback: &str) -> TwitterError {
    if errors.is_empty() {
        return TwitterError::ApiError(fallback.to_owned());
    }
    let message = errors
        .iter()
        .map(ApiErrorItem::describe)
        .collect::<Vec<_>>()
        .join("; ");
    TwitterError::ApiError(message)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
