//! Sentiment pipeline for CryptoPulse.
//!
//! Turns raw posts into labeled records: strips links, mentions, tags and
//! punctuation, drops posts that are too short to judge, scores the rest
//! with a VADER-style lexicon engine, buckets the compound score into a
//! category and flags crypto-related posts. Every stage is a pure function
//! over owned records; nothing here performs I/O except optional lexicon
//! file loading.

pub mod classify;
pub mod clean;
pub mod error;
pub mod filter;
pub mod lexicon;
pub mod pipeline;
pub mod scorer;
pub mod summary;
pub mod topic;
pub mod types;

pub use classify::{classify, CategoryThresholds, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
pub use clean::clean;
pub use error::LexiconError;
pub use filter::{filter_short, DEFAULT_MIN_LENGTH};
pub use lexicon::Lexicon;
pub use pipeline::{process, Pipeline, PipelineConfig};
pub use scorer::{score, SentimentAnalyzer};
pub use summary::{summarize, Summary};
pub use topic::{is_relevant, TopicTagger, CRYPTO_KEYWORDS};
pub use types::{Category, ClassifiedRecord, CleanedRecord, ScoredRecord, SentimentScores};
