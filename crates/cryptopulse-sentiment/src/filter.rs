use crate::types::CleanedRecord;

/// Cleaned texts of this many characters or fewer are dropped.
pub const DEFAULT_MIN_LENGTH: usize = 10;

/// Keep records whose cleaned text is strictly longer than `min_length` characters.
///
/// Length counts Unicode scalar values, not bytes. Order is preserved.
pub fn filter_short(
    records: impl IntoIterator<Item = CleanedRecord>,
    min_length: usize,
) -> impl Iterator<Item = CleanedRecord> {
    records
        .into_iter()
        .filter(move |record| is_long_enough(&record.cleaned_text, min_length))
}

pub(crate) fn is_long_enough(cleaned_text: &str, min_length: usize) -> bool {
    cleaned_text.chars().count() > min_length
}

#[cfg(test)]
mod tests {
    use cryptopulse_core::RawRecord;

    use super::*;

    fn cleaned(text: &str) -> CleanedRecord {
        CleanedRecord {
            raw: RawRecord::new(text, "", "tester"),
            cleaned_text: text.to_string(),
        }
    }

    #[test]
    fn eleven_characters_are_kept() {
        assert!(is_long_enough("abcdefghijk", DEFAULT_MIN_LENGTH));
    }

    #[test]
    fn ten_characters_are_dropped() {
        assert!(!is_long_enough("abcdefghij", DEFAULT_MIN_LENGTH));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 11 characters, 22 bytes
        assert!(is_long_enough("ééééééééééé", DEFAULT_MIN_LENGTH));
        // 10 characters, 20 bytes
        assert!(!is_long_enough("éééééééééé", DEFAULT_MIN_LENGTH));
    }

    #[test]
    fn filter_preserves_order() {
        let input = vec![
            cleaned("first long enough text"),
            cleaned("short"),
            cleaned("second long enough text"),
            cleaned(""),
            cleaned("third long enough text"),
        ];
        let kept: Vec<String> = filter_short(input, DEFAULT_MIN_LENGTH)
            .map(|r| r.cleaned_text)
            .collect();
        assert_eq!(
            kept,
            vec![
                "first long enough text",
                "second long enough text",
                "third long enough text"
            ]
        );
    }

    #[test]
    fn custom_threshold_is_honored() {
        let input = vec![cleaned("hello"), cleaned("hi")];
        let kept: Vec<_> = filter_short(input, 2).collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].cleaned_text, "hello");
    }
}
