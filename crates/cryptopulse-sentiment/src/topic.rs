//! Crypto-topic relevance tagging.
//!
//! Matching is a plain case-insensitive substring test with no word
//! boundaries, so short keywords over-match: "eth" hits "something" and
//! "Ethan", "moon" hits "honeymoon". Callers that need word-boundary
//! matching must filter the tagged records themselves.

use std::sync::LazyLock;

/// Keywords marking a post as crypto-related.
pub const CRYPTO_KEYWORDS: &[&str] = &[
    "bitcoin",
    "btc",
    "crypto",
    "cryptocurrency",
    "eth",
    "ethereum",
    "blockchain",
    "defi",
    "nft",
    "altcoin",
    "hodl",
    "moon",
    "pump",
    "dump",
];

static DEFAULT_TAGGER: LazyLock<TopicTagger> = LazyLock::new(TopicTagger::default);

/// `true` if `text` contains any of [`CRYPTO_KEYWORDS`], ignoring case.
#[must_use]
pub fn is_relevant(text: &str) -> bool {
    DEFAULT_TAGGER.is_relevant(text)
}

/// Substring matcher over a fixed keyword set.
#[derive(Debug, Clone)]
pub struct TopicTagger {
    keywords: Vec<String>,
}

impl Default for TopicTagger {
    fn default() -> Self {
        Self::new(CRYPTO_KEYWORDS)
    }
}

impl TopicTagger {
    /// Keywords are lowercased; blank ones are ignored.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn is_relevant(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}
