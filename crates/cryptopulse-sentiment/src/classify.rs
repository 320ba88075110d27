use crate::types::Category;

/// Compound scores at or above this are [`Category::Positive`].
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are [`Category::Negative`].
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Bounds of the neutral dead-zone around zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryThresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            positive: POSITIVE_THRESHOLD,
            negative: NEGATIVE_THRESHOLD,
        }
    }
}

impl CategoryThresholds {
    /// Bucket a compound score. Both bounds are inclusive toward the
    /// non-neutral side; NaN is neutral.
    #[must_use]
    pub fn classify(&self, compound: f64) -> Category {
        if compound >= self.positive {
            Category::Positive
        } else if compound <= self.negative {
            Category::Negative
        } else {
            Category::Neutral
        }
    }
}

/// Bucket a compound score with the default ±0.05 thresholds.
#[must_use]
pub fn classify(compound: f64) -> Category {
    CategoryThresholds::default().classify(compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_toward_non_neutral() {
        assert_eq!(classify(0.05), Category::Positive);
        assert_eq!(classify(-0.05), Category::Negative);
    }

    #[test]
    fn dead_zone_is_neutral() {
        assert_eq!(classify(0.0), Category::Neutral);
        assert_eq!(classify(0.0499), Category::Neutral);
        assert_eq!(classify(-0.0499), Category::Neutral);
    }

    #[test]
    fn extremes() {
        assert_eq!(classify(1.0), Category::Positive);
        assert_eq!(classify(-1.0), Category::Negative);
    }

    #[test]
    fn nan_is_neutral() {
        assert_eq!(classify(f64::NAN), Category::Neutral);
    }

    #[test]
    fn custom_thresholds() {
        let strict = CategoryThresholds {
            positive: 0.5,
            negative: -0.5,
        };
        assert_eq!(strict.classify(0.3), Category::Neutral);
        assert_eq!(strict.classify(0.5), Category::Positive);
        assert_eq!(strict.classify(-0.7), Category::Negative);
    }
}
