//! Emotion categories and the built-in keyword and confidence tables
//!
//! Table order is significant: on equal keyword counts the category listed
//! first wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotion label returned to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmotionCategory {
    Anxious,
    Happy,
    Sad,
    Angry,
    Calm,
    Surprised,
    Confused,
    /// No keyword matched
    Neutral,
}

impl EmotionCategory {
    /// All categories in canonical order
    pub const ALL: [EmotionCategory; 8] = [
        EmotionCategory::Anxious,
        EmotionCategory::Happy,
        EmotionCategory::Sad,
        EmotionCategory::Angry,
        EmotionCategory::Calm,
        EmotionCategory::Surprised,
        EmotionCategory::Confused,
        EmotionCategory::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionCategory::Anxious => "Anxious",
            EmotionCategory::Happy => "Happy",
            EmotionCategory::Sad => "Sad",
            EmotionCategory::Angry => "Angry",
            EmotionCategory::Calm => "Calm",
            EmotionCategory::Surprised => "Surprised",
            EmotionCategory::Confused => "Confused",
            EmotionCategory::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trigger substrings for one category
///
/// Keywords are lower-case; they are matched against lower-cased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordSet {
    pub emotion: EmotionCategory,
    pub keywords: &'static [&'static str],
}

/// Closed interval of allowed confidence values for a category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceRange {
    pub min: f64,
    pub max: f64,
}

impl ConfidenceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Finite, ordered, and inside [0.0, 1.0]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && 0.0 <= self.min
            && self.min <= self.max
            && self.max <= 1.0
    }

    /// Clamp into [min, max]; callers check `is_valid` first
    pub fn clamp(&self, value: f64) -> f64 {
        value.min(self.max).max(self.min)
    }
}

pub const DEFAULT_KEYWORDS: &[KeywordSet] = &[
    KeywordSet {
        emotion: EmotionCategory::Anxious,
        keywords: &[
            "nervous", "anxious", "worried", "scared", "afraid", "fearful", "concerned", "stressed",
        ],
    },
    KeywordSet {
        emotion: EmotionCategory::Happy,
        keywords: &[
            "happy", "excited", "joy", "great", "amazing", "wonderful", "fantastic", "thrilled",
            "delighted",
        ],
    },
    KeywordSet {
        emotion: EmotionCategory::Sad,
        keywords: &[
            "sad", "depressed", "down", "upset", "disappointed", "miserable", "gloomy",
            "heartbroken",
        ],
    },
    KeywordSet {
        emotion: EmotionCategory::Angry,
        keywords: &[
            "angry", "mad", "furious", "annoyed", "frustrated", "irritated", "outraged", "livid",
        ],
    },
    KeywordSet {
        emotion: EmotionCategory::Calm,
        keywords: &[
            "calm", "peaceful", "relaxed", "content", "serene", "tranquil", "composed", "zen",
        ],
    },
    KeywordSet {
        emotion: EmotionCategory::Surprised,
        keywords: &["surprised", "shocked", "amazed", "astonished", "stunned", "bewildered"],
    },
    KeywordSet {
        emotion: EmotionCategory::Confused,
        keywords: &["confused", "puzzled", "perplexed", "uncertain", "lost", "unclear"],
    },
];

/// Neutral has no entry: its confidence is sampled directly
pub const DEFAULT_CONFIDENCE_RANGES: &[(EmotionCategory, ConfidenceRange)] = &[
    (EmotionCategory::Anxious, ConfidenceRange::new(0.75, 0.95)),
    (EmotionCategory::Happy, ConfidenceRange::new(0.80, 0.98)),
    (EmotionCategory::Sad, ConfidenceRange::new(0.70, 0.90)),
    (EmotionCategory::Angry, ConfidenceRange::new(0.65, 0.85)),
    (EmotionCategory::Calm, ConfidenceRange::new(0.75, 0.95)),
    (EmotionCategory::Surprised, ConfidenceRange::new(0.70, 0.88)),
    (EmotionCategory::Confused, ConfidenceRange::new(0.60, 0.80)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_follows_canonical_order() {
        let order: Vec<EmotionCategory> = DEFAULT_KEYWORDS.iter().map(|s| s.emotion).collect();
        assert_eq!(order, EmotionCategory::ALL[..7].to_vec());
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for set in DEFAULT_KEYWORDS {
            for kw in set.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "{} keyword {:?}", set.emotion, kw);
            }
        }
    }

    #[test]
    fn test_default_ranges_are_valid() {
        assert_eq!(DEFAULT_CONFIDENCE_RANGES.len(), 7);
        for (emotion, range) in DEFAULT_CONFIDENCE_RANGES {
            assert!(range.is_valid(), "{} range {:?}", emotion, range);
            assert_ne!(*emotion, EmotionCategory::Neutral);
        }
    }

    #[test]
    fn test_range_clamp() {
        let range = ConfidenceRange::new(0.7, 0.9);
        assert_eq!(range.clamp(0.5), 0.7);
        assert_eq!(range.clamp(0.95), 0.9);
        assert_eq!(range.clamp(0.8), 0.8);
        assert!(!ConfidenceRange::new(0.9, 0.7).is_valid());
        assert!(!ConfidenceRange::new(0.5, 1.5).is_valid());
    }

    #[test]
    fn test_serializes_as_label() {
        assert_eq!(serde_json::to_value(EmotionCategory::Happy).unwrap(), "Happy");
        assert_eq!(EmotionCategory::Neutral.to_string(), "Neutral");
    }
}
