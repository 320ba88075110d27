//! Flat file export of classified records and JSON persistence of raw ones.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use cryptopulse_core::RawRecord;
use cryptopulse_sentiment::ClassifiedRecord;
use serde::Serialize;

/// Export column order. Always written, even for an empty batch.
pub(crate) const CSV_COLUMNS: [&str; 10] = [
    "text",
    "cleaned_text",
    "created_at",
    "username",
    "compound_sentiment",
    "positive_sentiment",
    "negative_sentiment",
    "neutral_sentiment",
    "sentiment_category",
    "crypto_related",
];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    text: &'a str,
    cleaned_text: &'a str,
    /// RFC 3339 when parsed, the original string when not, empty when absent.
    created_at: Option<String>,
    username: &'a str,
    compound_sentiment: f64,
    positive_sentiment: f64,
    negative_sentiment: f64,
    neutral_sentiment: f64,
    sentiment_category: &'static str,
    crypto_related: bool,
}

impl<'a> From<&'a ClassifiedRecord> for CsvRow<'a> {
    fn from(record: &'a ClassifiedRecord) -> Self {
        let scores = record.scores();
        Self {
            text: record.text(),
            cleaned_text: record.cleaned_text(),
            created_at: record.created_at().clone().into(),
            username: record.author(),
            compound_sentiment: scores.compound,
            positive_sentiment: scores.positive,
            negative_sentiment: scores.negative,
            neutral_sentiment: scores.neutral,
            sentiment_category: record.category.as_str(),
            crypto_related: record.topic_relevant,
        }
    }
}

/// Write records as CSV to `path`, returning the number of data rows.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row cannot be written.
pub(crate) fn write_csv<'a>(
    records: impl IntoIterator<Item = &'a ClassifiedRecord>,
    path: &Path,
) -> anyhow::Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("failed to create CSV file {}", path.display()))?;
    write_csv_to(records, BufWriter::new(file))
        .with_context(|| format!("failed to write CSV file {}", path.display()))
}

/// Write the header row followed by one row per record.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub(crate) fn write_csv_to<'a, W: Write>(
    records: impl IntoIterator<Item = &'a ClassifiedRecord>,
    writer: W,
) -> anyhow::Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_COLUMNS)?;

    let mut rows = 0;
    for record in records {
        csv_writer.serialize(CsvRow::from(record))?;
        rows += 1;
    }
    csv_writer.flush()?;
    Ok(rows)
}

/// Load raw records previously saved with [`save_raw_records`].
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a JSON array of records.
pub(crate) fn load_raw_records(path: &Path) -> anyhow::Result<Vec<RawRecord>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let records: Vec<RawRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse raw records from {}", path.display()))?;
    tracing::info!(path = %path.display(), count = records.len(), "loaded raw records");
    Ok(records)
}

/// Save raw records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn save_raw_records(records: &[RawRecord], path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .with_context(|| format!("failed to write raw records to {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
