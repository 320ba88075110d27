//! Sentiment pipeline orchestration.

use cryptopulse_core::RawRecord;

use crate::classify::CategoryThresholds;
use crate::clean::clean;
use crate::filter::{filter_short, is_long_enough, DEFAULT_MIN_LENGTH};
use crate::scorer::SentimentAnalyzer;
use crate::topic::{TopicTagger, CRYPTO_KEYWORDS};
use crate::types::{ClassifiedRecord, CleanedRecord, ScoredRecord};

/// Tunables for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Cleaned texts with this many characters or fewer are dropped.
    pub min_length: usize,
    pub thresholds: CategoryThresholds,
    pub keywords: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            thresholds: CategoryThresholds::default(),
            keywords: CRYPTO_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// Clean → filter → score → classify → tag, over owned records.
#[derive(Debug, Clone)]
pub struct Pipeline {
    min_length: usize,
    thresholds: CategoryThresholds,
    tagger: TopicTagger,
    analyzer: SentimentAnalyzer,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default(), SentimentAnalyzer::default())
    }
}

impl Pipeline {
    #[must_use]
    pub fn new(config: PipelineConfig, analyzer: SentimentAnalyzer) -> Self {
        Self {
            min_length: config.min_length,
            thresholds: config.thresholds,
            tagger: TopicTagger::new(&config.keywords),
            analyzer,
        }
    }

    /// Run every stage over a batch.
    ///
    /// Output order follows input order of the surviving records. Records
    /// whose cleaned text is too short are dropped; nothing else can remove
    /// or fail a record. Empty input yields empty output.
    pub fn process(&self, raw: impl IntoIterator<Item = RawRecord>) -> Vec<ClassifiedRecord> {
        let mut received = 0_usize;
        let min_length = self.min_length;

        let cleaned = raw
            .into_iter()
            .inspect(|_| received += 1)
            .map(clean_record)
            .inspect(|record| {
                if !is_long_enough(&record.cleaned_text, min_length) {
                    tracing::debug!(
                        author = %record.raw.author,
                        cleaned_len = record.cleaned_text.chars().count(),
                        min_length,
                        "dropping short post"
                    );
                }
            });

        let classified: Vec<ClassifiedRecord> = filter_short(cleaned, min_length)
            .map(|record| self.score_record(record))
            .map(|record| self.classify_record(record))
            .collect();

        let relevant = classified.iter().filter(|r| r.topic_relevant).count();
        tracing::info!(
            received,
            kept = classified.len(),
            dropped = received - classified.len(),
            relevant,
            "sentiment pipeline complete"
        );

        classified
    }

    #[must_use]
    pub fn score_record(&self, record: CleanedRecord) -> ScoredRecord {
        let scores = self.analyzer.polarity_scores(&record.cleaned_text);
        ScoredRecord {
            cleaned: record,
            scores,
        }
    }

    #[must_use]
    pub fn classify_record(&self, record: ScoredRecord) -> ClassifiedRecord {
        let category = self.thresholds.classify(record.scores.compound);
        let topic_relevant = self.tagger.is_relevant(&record.cleaned.cleaned_text);
        ClassifiedRecord {
            scored: record,
            category,
            topic_relevant,
        }
    }
}

#[must_use]
pub fn clean_record(raw: RawRecord) -> CleanedRecord {
    let cleaned_text = clean(&raw.text);
    CleanedRecord { raw, cleaned_text }
}

/// Run the pipeline with default configuration and the built-in lexicon.
pub fn process(raw: impl IntoIterator<Item = RawRecord>) -> Vec<ClassifiedRecord> {
    Pipeline::default().process(raw)
}
