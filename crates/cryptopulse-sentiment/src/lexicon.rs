//! Word valences and modifier tables for the sentiment engine.
//!
//! Valences use the VADER scale: roughly `-4.0` (extremely negative) to
//! `+4.0` (extremely positive). The built-in lexicon is a VADER-format word
//! list embedded at compile time with crypto-market slang layered on top;
//! the complete `vader_lexicon.txt` can replace it via
//! [`Lexicon::from_vader_file`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::LexiconError;

/// General English sentiment vocabulary in VADER file format.
const GENERAL_LEXICON: &str = include_str!("../data/general_lexicon.txt");

/// Crypto-market slang, applied over the general vocabulary.
const CRYPTO_SLANG: &[(&str, f64)] = &[
    ("adoption", 1.4),
    ("ath", 1.5),
    ("bearish", -2.0),
    ("bullish", 2.2),
    ("crashing", -2.2),
    ("dip", -0.8),
    ("dump", -1.6),
    ("dumping", -1.8),
    ("fud", -1.8),
    ("gains", 1.8),
    ("hodl", 1.2),
    ("lambo", 1.8),
    ("moon", 2.0),
    ("mooning", 2.2),
    ("plunge", -2.0),
    ("ponzi", -3.0),
    ("pump", 0.8),
    ("rally", 2.0),
    ("rekt", -2.5),
    ("rugpull", -3.0),
    ("rugged", -2.4),
    ("scammer", -3.0),
    ("soar", 2.0),
    ("surge", 1.7),
    ("wagmi", 2.1),
];

static BUILTIN: LazyLock<Lexicon> = LazyLock::new(|| {
    let mut lexicon =
        Lexicon::parse_vader(GENERAL_LEXICON).expect("embedded lexicon is well-formed");
    lexicon.extend(CRYPTO_SLANG.iter().copied());
    lexicon
});

/// Intensity added by a booster word.
pub(crate) const B_INCR: f64 = 0.293;
/// Intensity removed by a dampener word.
pub(crate) const B_DECR: f64 = -0.293;

/// Degree modifiers: boosters carry [`B_INCR`], dampeners [`B_DECR`].
/// Multi-word entries are matched as n-grams by the idiom check.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("amazingly", B_INCR),
    ("awfully", B_INCR),
    ("completely", B_INCR),
    ("considerably", B_INCR),
    ("decidedly", B_INCR),
    ("deeply", B_INCR),
    ("effing", B_INCR),
    ("enormously", B_INCR),
    ("entirely", B_INCR),
    ("especially", B_INCR),
    ("exceptionally", B_INCR),
    ("extremely", B_INCR),
    ("fabulously", B_INCR),
    ("flipping", B_INCR),
    ("flippin", B_INCR),
    ("fricking", B_INCR),
    ("frickin", B_INCR),
    ("frigging", B_INCR),
    ("friggin", B_INCR),
    ("fully", B_INCR),
    ("fucking", B_INCR),
    ("greatly", B_INCR),
    ("hella", B_INCR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("intensely", B_INCR),
    ("majorly", B_INCR),
    ("more", B_INCR),
    ("most", B_INCR),
    ("particularly", B_INCR),
    ("purely", B_INCR),
    ("quite", B_INCR),
    ("really", B_INCR),
    ("remarkably", B_INCR),
    ("so", B_INCR),
    ("substantially", B_INCR),
    ("thoroughly", B_INCR),
    ("totally", B_INCR),
    ("tremendously", B_INCR),
    ("uber", B_INCR),
    ("unbelievably", B_INCR),
    ("unusually", B_INCR),
    ("utterly", B_INCR),
    ("very", B_INCR),
    ("almost", B_DECR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("just enough", B_DECR),
    ("kind of", B_DECR),
    ("kinda", B_DECR),
    ("kindof", B_DECR),
    ("kind-of", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("marginal", B_DECR),
    ("marginally", B_DECR),
    ("occasionally", B_DECR),
    ("partly", B_DECR),
    ("scarcely", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
    ("sort of", B_DECR),
    ("sorta", B_DECR),
    ("sortof", B_DECR),
    ("sort-of", B_DECR),
];

/// Words that flip the polarity of a following sentiment word.
const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

/// Multi-word expressions whose valence overrides their parts.
const IDIOMS: &[(&str, f64)] = &[
    ("the shit", 3.0),
    ("the bomb", 3.0),
    ("bad ass", 1.5),
    ("badass", 1.5),
    ("bus stop", 0.0),
    ("yeah right", -2.0),
    ("kiss of death", -1.5),
    ("to die for", 3.0),
    ("beating heart", 3.1),
    ("broken heart", -2.9),
    ("to the moon", 3.0),
    ("buy the dip", 1.5),
];

pub(crate) fn booster(word_lower: &str) -> Option<f64> {
    BOOSTERS
        .iter()
        .find(|(w, _)| *w == word_lower)
        .map(|&(_, v)| v)
}

pub(crate) fn idiom(sequence_lower: &str) -> Option<f64> {
    IDIOMS
        .iter()
        .find(|(w, _)| *w == sequence_lower)
        .map(|&(_, v)| v)
}

/// `true` if the lowercase token is a negation word or contains `n't`.
pub(crate) fn is_negation(word_lower: &str) -> bool {
    NEGATIONS.contains(&word_lower) || word_lower.contains("n't")
}

/// Lowercase word → valence table.
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    /// The embedded general vocabulary plus crypto slang.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Build a lexicon from `(word, valence)` pairs. Words are lowercased;
    /// later duplicates win.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let valences = entries
            .into_iter()
            .map(|(w, v)| (w.as_ref().to_lowercase(), v))
            .collect();
        Self { valences }
    }

    /// Load a lexicon in the VADER distribution format: one entry per line,
    /// `token<TAB>mean<TAB>std<TAB>[ratings]`. Only the first two columns are read.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Io`] if the file cannot be read and
    /// [`LexiconError::Parse`] on a malformed line.
    pub fn from_vader_file(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path).map_err(|e| LexiconError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let lexicon = Self::parse_vader(&content)?;
        tracing::info!(
            path = %path.display(),
            entries = lexicon.len(),
            "loaded sentiment lexicon"
        );
        Ok(lexicon)
    }

    /// Parse VADER-format lexicon text. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Parse`] when a line lacks a numeric mean column.
    pub fn parse_vader(content: &str) -> Result<Self, LexiconError> {
        let mut valences = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            let mut columns = line.split('\t');
            let word = columns.next().unwrap_or_default().trim();
            if word.is_empty() {
                return Err(LexiconError::Parse {
                    line: line_no,
                    reason: "empty token".to_string(),
                });
            }
            let mean = columns.next().ok_or_else(|| LexiconError::Parse {
                line: line_no,
                reason: format!("missing valence for '{word}'"),
            })?;
            let valence = mean.trim().parse::<f64>().map_err(|e| LexiconError::Parse {
                line: line_no,
                reason: format!("invalid valence '{}' for '{word}': {e}", mean.trim()),
            })?;
            valences.insert(word.to_lowercase(), valence);
        }
        Ok(Self { valences })
    }

    /// Add or override entries.
    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        self.valences.extend(
            entries
                .into_iter()
                .map(|(w, v)| (w.as_ref().to_lowercase(), v)),
        );
    }

    /// Valence of an already-lowercased token.
    #[must_use]
    pub fn valence(&self, word_lower: &str) -> Option<f64> {
        self.valences.get(word_lower).copied()
    }

    #[must_use]
    pub fn contains(&self, word_lower: &str) -> bool {
        self.valences.contains_key(word_lower)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}
