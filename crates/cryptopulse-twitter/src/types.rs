//! Twitter v2 API response types.
//!
//! Both endpoints answer with `{"data": ..., "errors": [...], "meta": {...}}`.
//! `data` is absent when a lookup fails or a timeline is empty, so it is
//! always optional here.

use cryptopulse_core::{CreatedAt, RawRecord};
use serde::{Deserialize, Serialize};

/// Envelope for `GET 2/users/by/username/{username}`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    #[serde(default)]
    pub data: Option<TwitterUser>,
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
}

/// Envelope for `GET 2/users/{id}/tweets`.
#[derive(Debug, Deserialize)]
pub(crate) struct TweetsResponse {
    #[serde(default)]
    pub data: Option<Vec<Tweet>>,
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
}

/// One entry of the `errors` array. Twitter fills `detail` for lookups and
/// `message` for some older error shapes.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorItem {
    pub(crate) fn describe(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.message.as_deref())
            .or(self.title.as_deref())
            .unwrap_or("unknown error")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub quote_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    #[serde(default)]
    pub text: String,
    /// RFC 3339 string as sent by the API; only present when requested.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub public_metrics: Option<PublicMetrics>,
}

impl Tweet {
    /// Convert into the pipeline's input record, attributing it to `author`.
    #[must_use]
    pub fn into_raw_record(self, author: &str) -> RawRecord {
        RawRecord {
            text: self.text,
            created_at: CreatedAt::from(self.created_at),
            author: author.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tweets_response_without_data_is_empty() {
        let parsed: TweetsResponse =
            serde_json::from_str(r#"{"meta":{"result_count":0}}"#).unwrap();
        assert!(parsed.data.is_none());
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn tweet_parses_metrics_and_timestamp() {
        let tweet: Tweet = serde_json::from_str(
            r#"{
                "id": "1",
                "text": "gm",
                "created_at": "2024-01-01T00:00:00.000Z",
                "public_metrics": {"retweet_count": 2, "like_count": 10}
            }"#,
        )
        .unwrap();
        let metrics = tweet.public_metrics.clone().unwrap();
        assert_eq!(metrics.like_count, 10);
        assert_eq!(metrics.reply_count, 0);

        let record = tweet.into_raw_record("jack");
        assert_eq!(record.author, "jack");
        assert_eq!(record.text, "gm");
        assert!(matches!(record.created_at, CreatedAt::Parsed(_)));
    }

    #[test]
    fn tweet_without_timestamp_becomes_missing() {
        let tweet: Tweet = serde_json::from_str(r#"{"id": "2", "text": "hi"}"#).unwrap();
        assert_eq!(tweet.into_raw_record("jack").created_at, CreatedAt::Missing);
    }

    #[test]
    fn error_item_prefers_detail() {
        let item: ApiErrorItem = serde_json::from_str(
            r#"{"title": "Not Found Error", "detail": "Could not find user with username: [nobody]."}"#,
        )
        .unwrap();
        assert_eq!(
            item.describe(),
            "Could not find user with username: [nobody]."
        );
    }
}
