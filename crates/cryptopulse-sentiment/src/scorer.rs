//! VADER-style rule-based sentiment scorer.
//!
//! Each token takes its valence from the [`Lexicon`], then the rule set
//! adjusts it for degree modifiers, ALL-CAPS emphasis, nearby negation,
//! idioms, "least" and "but" constructions, and `!`/`?` emphasis. The summed
//! valence is squashed into a compound score in `[-1, 1]`; the per-token
//! signs give the positive/negative/neutral proportions.

use std::sync::LazyLock;

use crate::lexicon::{self, Lexicon};
use crate::types::SentimentScores;

/// Emphasis added when a sentiment word is ALL CAPS amid mixed-case text.
const C_INCR: f64 = 0.733;
/// Factor applied to a valence under negation.
const N_SCALAR: f64 = -0.74;
/// Normalization constant approximating the maximum expected raw sum.
const NORMALIZE_ALPHA: f64 = 15.0;
/// Emphasis per exclamation mark, counted up to [`MAX_EXCLAMATIONS`].
const EXCLAMATION_WEIGHT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// Emphasis per question mark when there are two or three of them.
const QUESTION_WEIGHT: f64 = 0.18;
/// Emphasis for more than three question marks.
const QUESTION_CAP: f64 = 0.96;

static DEFAULT_ANALYZER: LazyLock<SentimentAnalyzer> = LazyLock::new(SentimentAnalyzer::default);

/// Score `text` with the built-in lexicon.
///
/// Empty or sentiment-free text scores `compound = 0`, `neutral = 1`.
#[must_use]
pub fn score(text: &str) -> SentimentScores {
    DEFAULT_ANALYZER.polarity_scores(text)
}

/// Sentiment engine bound to one lexicon.
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer {
    lexicon: Lexicon,
}

impl SentimentAnalyzer {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Compute `{compound, positive, negative, neutral}` for `text`.
    ///
    /// Deterministic for a given lexicon. Unknown tokens contribute zero.
    #[must_use]
    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        let tokens = Tokens::new(text);
        if tokens.is_empty() {
            return SentimentScores::NEUTRAL;
        }

        let mut sentiments = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let lower = tokens.lower(i);
            let is_modifier = lexicon::booster(lower).is_some()
                || (lower == "kind" && tokens.lower_at(i + 1) == Some("of"));
            if is_modifier {
                sentiments.push(0.0);
            } else {
                sentiments.push(self.token_valence(&tokens, i));
            }
        }

        apply_but_contrast(&tokens, &mut sentiments);
        score_valence(&sentiments, text)
    }

    fn token_valence(&self, tokens: &Tokens<'_>, i: usize) -> f64 {
        let lower = tokens.lower(i);
        let Some(base) = self.lexicon.valence(lower) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before another sentiment word acts as a negator, not a word.
        if lower == "no"
            && tokens
                .lower_at(i + 1)
                .is_some_and(|next| self.lexicon.contains(next))
        {
            valence = 0.0;
        }
        let preceded_by_no = (i > 0 && tokens.lower(i - 1) == "no")
            || (i > 1 && tokens.lower(i - 2) == "no")
            || (i > 2
                && tokens.lower(i - 3) == "no"
                && matches!(tokens.lower(i - 1), "or" | "nor"));
        if preceded_by_no {
            valence = base * N_SCALAR;
        }

        if tokens.is_shouting(i) {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for distance in 0..3 {
            if i <= distance {
                break;
            }
            let prev = i - (distance + 1);
            if self.lexicon.contains(tokens.lower(prev)) {
                continue;
            }
            let mut scalar = booster_scalar(tokens, prev, valence);
            if scalar != 0.0 {
                scalar *= match distance {
                    1 => 0.95,
                    2 => 0.9,
                    _ => 1.0,
                };
            }
            valence += scalar;
            valence = negation_check(tokens, valence, distance, i);
            if distance == 2 {
                valence = idiom_check(tokens, valence, i);
            }
        }

        least_check(tokens, &self.lexicon, valence, i)
    }
}

/// Whitespace tokens with surrounding ASCII punctuation stripped from
/// words longer than two characters, plus their lowercase forms.
struct Tokens<'a> {
    words: Vec<&'a str>,
    lowered: Vec<String>,
    /// Some but not all tokens are ALL CAPS.
    cap_differential: bool,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let words: Vec<&str> = text.split_whitespace().map(strip_punctuation).collect();
        let lowered = words.iter().map(|w| w.to_lowercase()).collect();
        let caps = words.iter().filter(|w| is_all_caps(w)).count();
        let cap_differential = caps > 0 && caps < words.len();
        Self {
            words,
            lowered,
            cap_differential,
        }
    }

    fn len(&self) -> usize {
        self.words.len()
    }

    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn lower(&self, i: usize) -> &str {
        &self.lowered[i]
    }

    fn lower_at(&self, i: usize) -> Option<&str> {
        self.lowered.get(i).map(String::as_str)
    }

    fn is_shouting(&self, i: usize) -> bool {
        self.cap_differential && is_all_caps(self.words[i])
    }
}

fn strip_punctuation(token: &str) -> &str {
    let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
    if stripped.chars().count() <= 2 {
        token
    } else {
        stripped
    }
}

/// At least one cased character, and no lowercase ones.
fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// Intensity contributed by a booster/dampener at `idx`, signed to follow `valence`.
fn booster_scalar(tokens: &Tokens<'_>, idx: usize, valence: f64) -> f64 {
    let Some(mut scalar) = lexicon::booster(tokens.lower(idx)) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if tokens.is_shouting(idx) {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

fn negation_check(tokens: &Tokens<'_>, valence: f64, distance: usize, i: usize) -> f64 {
    let w = |back: usize| tokens.lower(i - back);
    let is_so_or_this = |s: &str| s == "so" || s == "this";
    match distance {
        0 => {
            if lexicon::is_negation(w(1)) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
        1 => {
            if w(2) == "never" && is_so_or_this(w(1)) {
                valence * 1.25
            } else if w(2) == "without" && w(1) == "doubt" {
                valence
            } else if lexicon::is_negation(w(2)) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
        _ => {
            if w(3) == "never" && (is_so_or_this(w(2)) || is_so_or_this(w(1))) {
                valence * 1.25
            } else if w(3) == "without" && (w(2) == "doubt" || w(1) == "doubt") {
                valence
            } else if lexicon::is_negation(w(3)) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
    }
}

/// Idioms override the valence; booster n-grams ("kind of", "sort of")
/// preceding the word adjust it. Requires `i >= 3`.
fn idiom_check(tokens: &Tokens<'_>, mut valence: f64, i: usize) -> f64 {
    let w = |idx: usize| tokens.lower(idx);
    let one_zero = format!("{} {}", w(i - 1), w(i));
    let two_one_zero = format!("{} {} {}", w(i - 2), w(i - 1), w(i));
    let two_one = format!("{} {}", w(i - 2), w(i - 1));
    let three_two_one = format!("{} {} {}", w(i - 3), w(i - 2), w(i - 1));
    let three_two = format!("{} {}", w(i - 3), w(i - 2));

    for seq in [&one_zero, &two_one_zero, &two_one, &three_two_one, &three_two] {
        if let Some(v) = lexicon::idiom(seq) {
            valence = v;
            break;
        }
    }

    if let Some(next) = tokens.lower_at(i + 1) {
        if let Some(v) = lexicon::idiom(&format!("{} {next}", w(i))) {
            valence = v;
        }
        if let Some(after) = tokens.lower_at(i + 2) {
            if let Some(v) = lexicon::idiom(&format!("{} {next} {after}", w(i))) {
                valence = v;
            }
        }
    }

    for n_gram in [&three_two_one, &three_two, &two_one] {
        if let Some(b) = lexicon::booster(n_gram) {
            valence += b;
        }
    }

    valence
}

/// "least X" negates X unless it reads "at least" or "very least".
fn least_check(tokens: &Tokens<'_>, lexicon: &Lexicon, valence: f64, i: usize) -> f64 {
    if i == 0 {
        return valence;
    }
    let prev = tokens.lower(i - 1);
    if prev != "least" || lexicon.contains(prev) {
        return valence;
    }
    if i > 1 && matches!(tokens.lower(i - 2), "at" | "very") {
        valence
    } else {
        valence * N_SCALAR
    }
}

/// Sentiment before the first "but" is halved; sentiment after it gains half again.
fn apply_but_contrast(tokens: &Tokens<'_>, sentiments: &mut [f64]) {
    let Some(but_idx) = tokens.lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (idx, sentiment) in sentiments.iter_mut().enumerate() {
        if idx < but_idx {
            *sentiment *= 0.5;
        } else if idx > but_idx {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    #[allow(clippy::cast_precision_loss)]
    let ep = exclamations as f64 * EXCLAMATION_WEIGHT;

    let questions = text.matches('?').count();
    #[allow(clippy::cast_precision_loss)]
    let qm = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_WEIGHT,
        _ => QUESTION_CAP,
    };

    ep + qm
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

fn score_valence(sentiments: &[f64], text: &str) -> SentimentScores {
    let emphasis = punctuation_emphasis(text);

    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    if total <= 0.0 {
        return SentimentScores::NEUTRAL;
    }

    SentimentScores {
        compound: round_to(compound, 4),
        positive: round_to((pos_sum / total).abs(), 3),
        negative: round_to((neg_sum / total).abs(), 3),
        neutral: round_to((neu_count / total).abs(), 3),
    }
}
