//! Raw post records handed from the retrieval layer to the sentiment pipeline.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Creation timestamp of a post as reported by the upstream API.
///
/// Timestamps that cannot be parsed are carried through verbatim rather than
/// rejected, so one malformed field never aborts a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum CreatedAt {
    Parsed(DateTime<Utc>),
    /// The original string, kept for diagnostics.
    Unparseable(String),
    Missing,
}

impl CreatedAt {
    /// Parse an upstream timestamp string.
    ///
    /// Accepts RFC 3339 (the Twitter v2 format), `YYYY-MM-DD HH:MM:SS` and
    /// bare `YYYY-MM-DD` (both read as UTC). Blank input is [`CreatedAt::Missing`];
    /// anything else is [`CreatedAt::Unparseable`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Parsed(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return Self::Parsed(naive.and_utc());
        }
        if let Some(naive) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Self::Parsed(naive.and_utc());
        }

        Self::Unparseable(raw.to_string())
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Parsed(dt) => Some(*dt),
            Self::Unparseable(_) | Self::Missing => None,
        }
    }

    /// RFC 3339 rendering for tabular export; `None` for unparseable or missing values.
    #[must_use]
    pub fn to_rfc3339(&self) -> Option<String> {
        self.as_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl From<Option<String>> for CreatedAt {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, |s| Self::parse(&s))
    }
}

impl From<CreatedAt> for Option<String> {
    fn from(value: CreatedAt) -> Self {
        match value {
            CreatedAt::Parsed(dt) => Some(dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            CreatedAt::Unparseable(raw) => Some(raw),
            CreatedAt::Missing => None,
        }
    }
}

/// One retrieved post, exactly as the retrieval layer produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Post body. A JSON `null` deserializes to the empty string.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default = "missing_created_at")]
    pub created_at: CreatedAt,
    /// Account username the post was fetched for.
    pub author: String,
}

impl RawRecord {
    #[must_use]
    pub fn new(text: impl Into<String>, created_at: &str, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: CreatedAt::parse(created_at),
            author: author.into(),
        }
    }
}

fn missing_created_at() -> CreatedAt {
    CreatedAt::Missing
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
