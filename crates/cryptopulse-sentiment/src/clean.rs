//! Post text cleaning.

use std::sync::LazyLock;

use regex::Regex;

/// Links (`scheme://…` or any `http`-prefixed run), `@mentions` and `#tags`.
static NOISE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9+.\-]*://\S*|http\S+|@\S+|#\S+").expect("valid regex")
});

/// Anything that is neither a word character nor whitespace (Unicode classes).
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// `http` runs that only became contiguous once punctuation was removed,
/// e.g. `ht-tp.example` → `httpexample`.
static HTTP_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+").expect("valid regex"));

/// Strip links, mentions, tags and punctuation from post text, then trim.
///
/// Total and idempotent: `clean(&clean(t)) == clean(t)` for every `t`.
/// Empty input yields an empty string. Emoji and other symbols count as
/// punctuation and are removed.
#[must_use]
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let without_tokens = NOISE_TOKEN_RE.replace_all(text, "");
    let word_only = NON_WORD_RE.replace_all(&without_tokens, "");
    let without_links = HTTP_RUN_RE.replace_all(&word_only, "");
    without_links.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_noise(cleaned: &str) {
        assert!(!cleaned.contains("://"), "URL left in {cleaned:?}");
        assert!(!cleaned.contains('@'), "mention left in {cleaned:?}");
        assert!(!cleaned.contains('#'), "tag left in {cleaned:?}");
        assert!(!HTTP_RUN_RE.is_match(cleaned), "http run left in {cleaned:?}");
        assert!(!NON_WORD_RE.is_match(cleaned), "punctuation left in {cleaned:?}");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(clean(""), "");
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(clean(" \t\n "), "");
    }

    #[test]
    fn strips_url_emoji_and_punctuation() {
        assert_eq!(
            clean("Bitcoin to the moon!!! 🚀 https://x.co/abc"),
            "Bitcoin to the moon"
        );
    }

    #[test]
    fn strips_mentions_and_tags() {
        assert_eq!(
            clean("@saylor says #BTC is digital gold"),
            "says  is digital gold"
        );
    }

    #[test]
    fn strips_non_http_schemes() {
        assert_eq!(clean("mirror at ftp://files.example/x ok"), "mirror at  ok");
    }

    #[test]
    fn strips_bare_http_prefixed_runs() {
        assert_eq!(clean("see httpbin.org/get now"), "see  now");
    }

    #[test]
    fn keeps_lone_http_word() {
        assert_eq!(clean("the http protocol"), "the http protocol");
    }

    #[test]
    fn keeps_unicode_letters_and_digits() {
        assert_eq!(clean("Café prices: 42€ today!"), "Café prices 42 today");
    }

    #[test]
    fn keeps_underscores_as_word_characters() {
        assert_eq!(clean("snake_case rocks."), "snake_case rocks");
    }

    #[test]
    fn result_has_no_noise_patterns() {
        let samples = [
            "RT @elonmusk: Doge!!! https://t.co/xyz #doge",
            "email me@example.com or visit www.example.com",
            "ht-tp.example and h.t.t.p.s://weird",
            "#",
            "@",
            "multiple   spaces\tand\nnewlines",
            "😀😀😀",
        ];
        for sample in samples {
            assert_no_noise(&clean(sample));
        }
    }

    #[test]
    fn clean_is_idempotent() {
        let samples = [
            "Bitcoin to the moon!!! 🚀 https://x.co/abc",
            "ht-tp.example and h.t.t.p.s://weird",
            "  leading and trailing  ",
            "@a #b c",
            "x@y.z http",
            "plain text",
            "",
        ];
        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "not idempotent for {sample:?}");
        }
    }
}
