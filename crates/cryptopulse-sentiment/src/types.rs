//! Record types produced by each pipeline stage.
//!
//! Each stage wraps the previous stage's record by value, so a
//! [`ClassifiedRecord`] still carries the untouched [`RawRecord`] it came from.
//! All types serialize flat, one field per export column.

use cryptopulse_core::{CreatedAt, RawRecord};
use serde::Serialize;

/// Discrete sentiment label derived from the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Positive,
    Negative,
    Neutral,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Positive, Category::Negative, Category::Neutral];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Positive => "Positive",
            Category::Negative => "Negative",
            Category::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity scores for one text.
///
/// `positive`, `negative` and `neutral` are proportions in `[0, 1]` that sum
/// to roughly 1; `compound` is the normalized overall polarity in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScores {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentScores {
    /// Scores for text with no sentiment-bearing content.
    pub const NEUTRAL: SentimentScores = SentimentScores {
        compound: 0.0,
        positive: 0.0,
        negative: 0.0,
        neutral: 1.0,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedRecord {
    #[serde(flatten)]
    pub raw: RawRecord,
    pub cleaned_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub cleaned: CleanedRecord,
    #[serde(flatten)]
    pub scores: SentimentScores,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub scored: ScoredRecord,
    pub category: Category,
    pub topic_relevant: bool,
}

impl ClassifiedRecord {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.scored.cleaned.raw.text
    }

    #[must_use]
    pub fn cleaned_text(&self) -> &str {
        &self.scored.cleaned.cleaned_text
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.scored.cleaned.raw.author
    }

    #[must_use]
    pub fn created_at(&self) -> &CreatedAt {
        &self.scored.cleaned.raw.created_at
    }

    #[must_use]
    pub fn scores(&self) -> &SentimentScores {
        &self.scored.scores
    }

    #[must_use]
    pub fn compound(&self) -> f64 {
        self.scored.scores.compound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classified_record_serializes_flat() {
        let record = ClassifiedRecord {
            scored: ScoredRecord {
                cleaned: CleanedRecord {
                    raw: RawRecord::new("Great day!", "2024-01-01T00:00:00Z", "alice"),
                    cleaned_text: "Great day".to_string(),
                },
                scores: SentimentScores {
                    compound: 0.6249,
                    positive: 0.672,
                    negative: 0.0,
                    neutral: 0.328,
                },
            },
            category: Category::Positive,
            topic_relevant: false,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["text"], "Great day!");
        assert_eq!(json["cleaned_text"], "Great day");
        assert_eq!(json["author"], "alice");
        assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");
        assert_eq!(json["compound"], 0.6249);
        assert_eq!(json["category"], "Positive");
        assert_eq!(json["topic_relevant"], false);
    }

    #[test]
    fn category_display_matches_label() {
        assert_eq!(Category::Negative.to_string(), "Negative");
        assert_eq!(Category::ALL.len(), 3);
    }
}
