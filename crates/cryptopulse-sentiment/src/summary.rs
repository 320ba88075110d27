//! Read-only aggregates over a classified batch.
//!
//! Everything here is derived from `&[ClassifiedRecord]` and nothing is
//! rendered; the binary turns a [`Summary`] into markdown tables.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Category, ClassifiedRecord};

/// Number of equal-width bins spanning the compound range `[-1, 1]`.
pub const HISTOGRAM_BINS: usize = 20;

/// How many of the most positive and most negative relevant posts to keep.
pub const HIGHLIGHT_COUNT: usize = 3;

/// Highlight texts are cut to this many characters.
pub const HIGHLIGHT_TEXT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
    /// Share of the batch in percent, `0.0` for an empty batch.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorStats {
    pub author: String,
    pub count: usize,
    pub mean_compound: f64,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub created_at: DateTime<Utc>,
    pub author: String,
    pub compound: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub author: String,
    pub compound: f64,
    /// Cleaned text, truncated to [`HIGHLIGHT_TEXT_CHARS`] characters.
    pub text: String,
    pub truncated: bool,
}

/// Aggregates over the topic-relevant subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevantSummary {
    pub count: usize,
    pub mean_compound: Option<f64>,
    /// Per-author mean compound, ascending.
    pub authors: Vec<AuthorStats>,
    pub most_positive: Vec<Highlight>,
    pub most_negative: Vec<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    /// One entry per category, in [`Category::ALL`] order.
    pub categories: Vec<CategoryCount>,
    /// Per-author stats sorted by mean compound ascending, then by name.
    pub authors: Vec<AuthorStats>,
    pub histogram: Vec<HistogramBin>,
    /// Records with a parsed timestamp, oldest first.
    pub timeline: Vec<TimelinePoint>,
    pub mean_compound: Option<f64>,
    /// Sample standard deviation; `None` with fewer than two records.
    pub std_dev_compound: Option<f64>,
    pub relevant: RelevantSummary,
    pub date_range: Option<DateRange>,
}

/// Build every aggregate for a classified batch.
#[must_use]
pub fn summarize(records: &[ClassifiedRecord]) -> Summary {
    let compounds: Vec<f64> = records.iter().map(ClassifiedRecord::compound).collect();
    let timeline = timeline(records);
    let date_range = match (timeline.first(), timeline.last()) {
        (Some(first), Some(last)) => Some(DateRange {
            earliest: first.created_at,
            latest: last.created_at,
        }),
        _ => None,
    };

    let relevant: Vec<&ClassifiedRecord> = records.iter().filter(|r| r.topic_relevant).collect();

    Summary {
        total: records.len(),
        categories: category_counts(records),
        authors: author_stats(records.iter()),
        histogram: histogram(&compounds),
        timeline,
        mean_compound: mean(&compounds),
        std_dev_compound: sample_std_dev(&compounds),
        relevant: relevant_summary(&relevant),
        date_range,
    }
}

#[allow(clippy::cast_precision_loss)]
fn category_counts(records: &[ClassifiedRecord]) -> Vec<CategoryCount> {
    Category::ALL
        .iter()
        .map(|&category| {
            let count = records.iter().filter(|r| r.category == category).count();
            let percentage = if records.is_empty() {
                0.0
            } else {
                count as f64 * 100.0 / records.len() as f64
            };
            CategoryCount {
                category,
                count,
                percentage,
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn author_stats<'a>(records: impl Iterator<Item = &'a ClassifiedRecord>) -> Vec<AuthorStats> {
    let mut by_author: BTreeMap<&str, AuthorStats> = BTreeMap::new();
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();

    for record in records {
        let stats = by_author
            .entry(record.author())
            .or_insert_with(|| AuthorStats {
                author: record.author().to_string(),
                count: 0,
                mean_compound: 0.0,
                positive: 0,
                negative: 0,
                neutral: 0,
            });
        stats.count += 1;
        match record.category {
            Category::Positive => stats.positive += 1,
            Category::Negative => stats.negative += 1,
            Category::Neutral => stats.neutral += 1,
        }
        *sums.entry(record.author()).or_insert(0.0) += record.compound();
    }

    let mut stats: Vec<AuthorStats> = by_author
        .into_iter()
        .map(|(author, mut stats)| {
            let sum = sums.get(author).copied().unwrap_or_default();
            stats.mean_compound = sum / stats.count as f64;
            stats
        })
        .collect();
    stats.sort_by(|a, b| {
        a.mean_compound
            .total_cmp(&b.mean_compound)
            .then_with(|| a.author.cmp(&b.author))
    });
    stats
}

#[allow(clippy::cast_precision_loss)]
fn histogram(compounds: &[f64]) -> Vec<HistogramBin> {
    let width = 2.0 / HISTOGRAM_BINS as f64;
    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            lower: -1.0 + i as f64 * width,
            upper: -1.0 + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &compound in compounds.iter().filter(|c| c.is_finite()) {
        bins[bin_index(compound, width)].count += 1;
    }
    bins
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bin_index(compound: f64, width: f64) -> usize {
    let offset = (compound.clamp(-1.0, 1.0) + 1.0) / width;
    // The top edge (compound == 1.0) belongs to the last bin.
    (offset.floor() as usize).min(HISTOGRAM_BINS - 1)
}

fn timeline(records: &[ClassifiedRecord]) -> Vec<TimelinePoint> {
    let mut points: Vec<TimelinePoint> = records
        .iter()
        .filter_map(|r| {
            r.created_at().as_datetime().map(|created_at| TimelinePoint {
                created_at,
                author: r.author().to_string(),
                compound: r.compound(),
            })
        })
        .collect();
    points.sort_by_key(|p| p.created_at);
    points
}

fn relevant_summary(relevant: &[&ClassifiedRecord]) -> RelevantSummary {
    let compounds: Vec<f64> = relevant.iter().map(|r| r.compound()).collect();

    let mut ranked: Vec<&ClassifiedRecord> = relevant.to_vec();
    ranked.sort_by(|a, b| b.compound().total_cmp(&a.compound()));
    let most_positive = ranked.iter().take(HIGHLIGHT_COUNT).map(|r| highlight(r)).collect();
    let most_negative = ranked
        .iter()
        .rev()
        .take(HIGHLIGHT_COUNT)
        .map(|r| highlight(r))
        .collect();

    RelevantSummary {
        count: relevant.len(),
        mean_compound: mean(&compounds),
        authors: author_stats(relevant.iter().copied()),
        most_positive,
        most_negative,
    }
}

fn highlight(record: &ClassifiedRecord) -> Highlight {
    let cleaned = record.cleaned_text();
    let truncated = cleaned.chars().count() > HIGHLIGHT_TEXT_CHARS;
    Highlight {
        author: record.author().to_string(),
        compound: record.compound(),
        text: cleaned.chars().take(HIGHLIGHT_TEXT_CHARS).collect(),
        truncated,
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[allow(clippy::cast_precision_loss)]
fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((squared / (values.len() - 1) as f64).sqrt())
}
