use thiserror::Error;

/// Errors raised while loading an external lexicon file.
///
/// Scoring itself never fails; only reading a replacement lexicon can.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lexicon entry on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
