//! Keyword-based emotion analysis
//!
//! Maps validated text to an emotion label and a pseudo-confidence:
//! 1. Detection: count keyword substrings per category in the lower-cased
//!    text; the highest count wins, earlier categories win ties.
//! 2. Adjustment: randomized jitter within the category's range (see
//!    [`confidence`]).
//! 3. Validation: the result must lie in [0.0, 1.0].
//!
//! The reported confidence is not a calibrated probability.

pub mod confidence;
pub mod tables;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, ErrorCode, Result};
use crate::validator::validate_confidence_score;

pub use confidence::{calculate_confidence, UniformSource, FALLBACK_CONFIDENCE};
pub use tables::{ConfidenceRange, EmotionCategory, KeywordSet};

/// Base confidence when no keyword matches
pub const NEUTRAL_BASE_CONFIDENCE: f64 = 0.65;

const BASE_CONFIDENCE: f64 = 0.6;
const CONFIDENCE_PER_MATCH: f64 = 0.1;
const MAX_BASE_CONFIDENCE: f64 = 0.95;

/// Analysis response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub emotion: EmotionCategory,
    /// Rounded to 2 decimals, within [0.0, 1.0]
    pub confidence: f64,
}

/// Outcome of the detection step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub emotion: EmotionCategory,
    /// Distinct keywords of `emotion` found in the text
    pub match_count: usize,
    pub base_confidence: f64,
}

/// Keyword tables plus the scoring rules over them
///
/// Immutable once built; share it behind an `Arc` across requests.
#[derive(Debug, Clone)]
pub struct EmotionAnalyzer {
    keywords: Vec<KeywordSet>,
    ranges: Vec<(EmotionCategory, ConfidenceRange)>,
}

impl Default for EmotionAnalyzer {
    fn default() -> Self {
        Self::with_tables(
            tables::DEFAULT_KEYWORDS.to_vec(),
            tables::DEFAULT_CONFIDENCE_RANGES.to_vec(),
        )
    }
}

impl EmotionAnalyzer {
    /// Build an analyzer over custom tables
    ///
    /// Keyword set order decides ties.
    pub fn with_tables(
        keywords: Vec<KeywordSet>,
        ranges: Vec<(EmotionCategory, ConfidenceRange)>,
    ) -> Self {
        Self { keywords, ranges }
    }

    pub fn keywords(&self) -> &[KeywordSet] {
        &self.keywords
    }

    /// Confidence range for a category, `None` when it has no range
    pub fn range_for(&self, emotion: EmotionCategory) -> Option<ConfidenceRange> {
        self.ranges
            .iter()
            .find(|(e, _)| *e == emotion)
            .map(|(_, range)| *range)
    }

    /// Analyze using the thread-local random number generator
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        self.analyze_with(text, &mut rand::thread_rng())
    }

    /// Analyze drawing jitter from `source`
    pub fn analyze_with<S: UniformSource + ?Sized>(
        &self,
        text: &str,
        source: &mut S,
    ) -> Result<AnalysisResult> {
        let detection = self.detect(text)?;
        let range = self.range_for(detection.emotion);
        let confidence =
            calculate_confidence(range, detection.base_confidence, text, source);
        let confidence = validate_confidence_score(confidence)?;

        debug!(
            emotion = %detection.emotion,
            matches = detection.match_count,
            base = detection.base_confidence,
            confidence,
            "Emotion analyzed"
        );

        Ok(AnalysisResult {
            emotion: detection.emotion,
            confidence,
        })
    }

    /// Pick the category with the most keyword hits
    ///
    /// Substring containment, so "mad" also matches inside "nomad".
    pub fn detect(&self, text: &str) -> Result<Detection> {
        if self.keywords.is_empty() {
            return Err(AnalysisError::processing(
                "Failed to detect emotion: keyword table is empty",
                ErrorCode::DetectionFailed,
            ));
        }

        let lowered = text.to_lowercase();
        let mut best: Option<(EmotionCategory, usize)> = None;

        for set in &self.keywords {
            let count = set
                .keywords
                .iter()
                .filter(|kw| lowered.contains(**kw))
                .count();
            // Strictly greater keeps the first maximum
            if count > 0 && best.map_or(true, |(_, top)| count > top) {
                best = Some((set.emotion, count));
            }
        }

        Ok(match best {
            Some((emotion, match_count)) => Detection {
                emotion,
                match_count,
                base_confidence: (BASE_CONFIDENCE + CONFIDENCE_PER_MATCH * match_count as f64)
                    .min(MAX_BASE_CONFIDENCE),
            },
            None => Detection {
                emotion: EmotionCategory::Neutral,
                match_count: 0,
                base_confidence: NEUTRAL_BASE_CONFIDENCE,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Returns the point at `self.0` of the way through each interval
    struct FixedSource(f64);

    impl UniformSource for FixedSource {
        fn uniform(&mut self, low: f64, high: f64) -> f64 {
            low + (high - low) * self.0
        }
    }

    fn detect(text: &str) -> Detection {
        EmotionAnalyzer::default().detect(text).unwrap()
    }

    #[test]
    fn test_detects_happy() {
        let d = detect("I am so happy and excited today");
        assert_eq!(d.emotion, EmotionCategory::Happy);
        assert_eq!(d.match_count, 2);
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        assert_eq!(detect("FURIOUS about the delay").emotion, EmotionCategory::Angry);
    }

    #[test]
    fn test_substring_matches_count() {
        // "mad" inside "nomad"
        assert_eq!(detect("a nomad life for me").emotion, EmotionCategory::Angry);
    }

    #[test]
    fn test_highest_count_wins() {
        // one Happy hit, two Sad hits
        let d = detect("great day but I feel sad and gloomy");
        assert_eq!(d.emotion, EmotionCategory::Sad);
        assert_eq!(d.match_count, 2);
    }

    #[test]
    fn test_ties_go_to_earlier_category() {
        assert_eq!(detect("I am sad but calm").emotion, EmotionCategory::Sad);
        assert_eq!(detect("worried but happy").emotion, EmotionCategory::Anxious);
        assert_eq!(detect("calm yet confused").emotion, EmotionCategory::Calm);
    }

    #[test]
    fn test_no_match_is_neutral() {
        let d = detect("The weather report update");
        assert_eq!(d.emotion, EmotionCategory::Neutral);
        assert_eq!(d.match_count, 0);
        assert_eq!(d.base_confidence, NEUTRAL_BASE_CONFIDENCE);
    }

    #[test]
    fn test_base_confidence_is_capped() {
        let d = detect("happy excited joy great amazing wonderful fantastic thrilled");
        assert_eq!(d.match_count, 8);
        assert_eq!(d.base_confidence, 0.95);
    }

    #[test]
    fn test_analyze_happy_exact() {
        // base 0.8, jitter 1.0, bonus 31/2000 → 0.8155 → 0.82
        let result = EmotionAnalyzer::default()
            .analyze_with("I am so happy and excited today", &mut FixedSource(0.5))
            .unwrap();
        assert_eq!(result.emotion, EmotionCategory::Happy);
        assert_eq!(result.confidence, 0.82);
    }

    #[test]
    fn test_analyze_anxious_extremes() {
        let analyzer = EmotionAnalyzer::default();
        let text = "I feel nervous and anxious about this";

        // 0.8 × 1.2 = 0.96 → 0.95, + 0.0185 → 0.97
        let high = analyzer.analyze_with(text, &mut FixedSource(1.0)).unwrap();
        assert_eq!(high.emotion, EmotionCategory::Anxious);
        assert_eq!(high.confidence, 0.97);

        // 0.8 × 0.8 = 0.64 → 0.75, + 0.0185 → 0.77
        let low = analyzer.analyze_with(text, &mut FixedSource(0.0)).unwrap();
        assert_eq!(low.confidence, 0.77);
    }

    #[test]
    fn test_analyze_sad_low_bound_rounds_down() {
        // base 0.7 × 0.8 → clamped to 0.70, + 30/2000 → 0.715 → 0.71
        let result = EmotionAnalyzer::default()
            .analyze_with("I feel sad about the old house", &mut FixedSource(0.0))
            .unwrap();
        assert_eq!(result.emotion, EmotionCategory::Sad);
        assert_eq!(result.confidence, 0.71);
    }

    #[test]
    fn test_analyze_neutral_exact() {
        // U(0.6, 0.8) midpoint 0.7, + 25/2000 → 0.7125 → 0.71
        let result = EmotionAnalyzer::default()
            .analyze_with("The weather report update", &mut FixedSource(0.5))
            .unwrap();
        assert_eq!(result.emotion, EmotionCategory::Neutral);
        assert_eq!(result.confidence, 0.71);
    }

    #[test]
    fn test_analyze_falls_back_on_bad_sample() {
        let result = EmotionAnalyzer::default()
            .analyze_with("I am so happy", &mut FixedSource(f64::NAN))
            .unwrap();
        assert_eq!(result.emotion, EmotionCategory::Happy);
        assert_eq!(result.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_empty_table_fails_detection() {
        let analyzer = EmotionAnalyzer::with_tables(Vec::new(), Vec::new());
        let err = analyzer.analyze("I am so happy").unwrap_err();
        assert!(matches!(err, AnalysisError::Processing { .. }));
        assert_eq!(err.code(), ErrorCode::DetectionFailed);
    }

    #[test]
    fn test_category_without_range_samples_directly() {
        let analyzer = EmotionAnalyzer::with_tables(
            vec![KeywordSet {
                emotion: EmotionCategory::Surprised,
                keywords: &["wow"],
            }],
            Vec::new(),
        );
        let result = analyzer.analyze_with("wow", &mut FixedSource(1.0)).unwrap();
        assert_eq!(result.emotion, EmotionCategory::Surprised);
        // 0.80 + 3/2000 → 0.8015 → 0.80
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn test_seeded_results_within_expected_bands() {
        let analyzer = EmotionAnalyzer::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let happy = analyzer
                .analyze_with("I am so happy and excited today", &mut rng)
                .unwrap();
            assert!((0.80..=0.99).contains(&happy.confidence));

            let anxious = analyzer
                .analyze_with("I feel nervous and anxious about this", &mut rng)
                .unwrap();
            assert!((0.75..=0.99).contains(&anxious.confidence));

            let neutral = analyzer
                .analyze_with("The weather report update", &mut rng)
                .unwrap();
            assert!((0.60..=0.99).contains(&neutral.confidence));
        }
    }
}
