//! Reflection text validation
//!
//! Gate-keeps text before analysis. Checks run in a fixed order and the first
//! failing check decides the error code:
//!
//! 1. empty or absent → `EMPTY_TEXT`
//! 2. not a string → `INVALID_TYPE`
//! 3. blank after trimming → `EMPTY_TEXT`
//! 4. fewer than 3 characters → `TOO_SHORT`
//! 5. more than 2000 characters → `TOO_LONG`
//! 6. markup/script injection → `INAPPROPRIATE_CONTENT`
//! 7. too few alphanumerics → `INVALID_CONTENT`
//! 8. mostly digits → `NUMBERS_ONLY`
//! 9. repetitive or symbol-heavy → `SPAM_DETECTED`
//!
//! All lengths are counted in characters, not bytes.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde_json::Value;
use tracing::debug;

use crate::error::{AnalysisError, ErrorCode, Result};

pub const MIN_TEXT_CHARS: usize = 3;
pub const MAX_TEXT_CHARS: usize = 2000;

const MIN_ALPHANUMERIC_RATIO: f64 = 0.3;
const MIN_LETTERS_WITH_DIGITS: usize = 3;
const MAX_DIGIT_RATIO: f64 = 0.7;
const SPAM_MIN_WORDS: usize = 5;
const SPAM_MIN_UNIQUE_RATIO: f64 = 0.3;
const SPAM_MAX_SYMBOL_RATIO: f64 = 0.5;

/// Script/markup injection patterns, case-insensitive with `.` spanning lines
static SUSPICIOUS_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?is)<script.*?>.*?</script>",
        r"(?i)javascript:",
        r"(?i)data:text/html",
        r"(?is)<iframe.*?>.*?</iframe>",
    ])
    .expect("suspicious content patterns are valid")
});

static NUMERIC_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s.,\-+()]+$").expect("numeric pattern is valid"));

// Character classes by Unicode general category. Letters are `L*` only, so
// combining marks do not count; digits are `Nd` only, so "½" and "Ⅷ" are
// alphanumeric without being digits.
static LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}").expect("letter class is valid"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Nd}").expect("digit class is valid"));
static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]").expect("alphanumeric class is valid"));
static SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("symbol class is valid"));

/// Validate a raw `text` field from a request body
///
/// Absent, `null` and falsy JSON values count as empty; any other
/// non-string value is `INVALID_TYPE`.
pub fn validate_reflection_input(raw: Option<&Value>) -> Result<String> {
    let value = match raw {
        Some(value) if !is_falsy(value) => value,
        _ => return Err(reject("Text input is required", ErrorCode::EmptyText)),
    };

    match value.as_str() {
        Some(text) => validate_reflection_text(text),
        None => Err(reject("Text must be a string", ErrorCode::InvalidType)),
    }
}

/// Validate reflection text and return it trimmed
pub fn validate_reflection_text(text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(reject("Text input is required", ErrorCode::EmptyText));
    }

    let cleaned = text.trim();

    if cleaned.is_empty() {
        return Err(reject(
            "Text cannot be empty or only whitespace",
            ErrorCode::EmptyText,
        ));
    }

    let len = cleaned.chars().count();

    if len < MIN_TEXT_CHARS {
        return Err(reject(
            "Text must be at least 3 characters long",
            ErrorCode::TooShort,
        ));
    }

    if len > MAX_TEXT_CHARS {
        return Err(reject(
            "Text is too long (maximum 2000 characters)",
            ErrorCode::TooLong,
        ));
    }

    if contains_suspicious_content(cleaned) {
        return Err(reject(
            "Text contains inappropriate content",
            ErrorCode::InappropriateContent,
        ));
    }

    if is_only_special_characters(cleaned) {
        return Err(reject(
            "Text cannot contain only special characters",
            ErrorCode::InvalidContent,
        ));
    }

    if is_mostly_numbers(cleaned) {
        return Err(reject(
            "Please enter meaningful text, not just numbers",
            ErrorCode::NumbersOnly,
        ));
    }

    if is_likely_spam(cleaned) {
        return Err(reject(
            "Text appears to be spam or gibberish",
            ErrorCode::SpamDetected,
        ));
    }

    Ok(cleaned.to_string())
}

/// Reject confidence values outside [0.0, 1.0]
pub fn validate_confidence_score(confidence: f64) -> Result<f64> {
    if !confidence.is_finite() {
        return Err(AnalysisError::invalid_input(
            "Confidence must be a number",
            ErrorCode::InvalidConfidenceType,
        ));
    }

    if !(0.0..=1.0).contains(&confidence) {
        return Err(AnalysisError::invalid_input(
            "Confidence must be between 0.0 and 1.0",
            ErrorCode::InvalidConfidenceRange,
        ));
    }

    Ok(confidence)
}

pub fn contains_suspicious_content(text: &str) -> bool {
    SUSPICIOUS_PATTERNS.is_match(text)
}

/// No alphanumerics at all, or fewer than 30% of characters
pub fn is_only_special_characters(text: &str) -> bool {
    let counts = CharCounts::of(text);
    if counts.alphanumeric == 0 {
        return true;
    }
    counts.total > 0 && ratio(counts.alphanumeric, counts.total) < MIN_ALPHANUMERIC_RATIO
}

pub fn is_mostly_numbers(text: &str) -> bool {
    if NUMERIC_ONLY.is_match(text) {
        return true;
    }

    let counts = CharCounts::of(text);

    // Digits with barely any letters around them
    if counts.digits > 0 && counts.letters < MIN_LETTERS_WITH_DIGITS {
        return true;
    }

    counts.total > 0 && ratio(counts.digits, counts.total) > MAX_DIGIT_RATIO
}

pub fn is_likely_spam(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > SPAM_MIN_WORDS {
        let unique: std::collections::HashSet<&str> = words.iter().copied().collect();
        if ratio(unique.len(), words.len()) < SPAM_MIN_UNIQUE_RATIO {
            return true;
        }
    }

    let counts = CharCounts::of(text);
    counts.total > 0 && ratio(counts.symbols, counts.total) > SPAM_MAX_SYMBOL_RATIO
}

/// Character class tallies over a string
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CharCounts {
    total: usize,
    alphanumeric: usize,
    letters: usize,
    digits: usize,
    /// Neither alphanumeric nor whitespace
    symbols: usize,
}

impl CharCounts {
    fn of(text: &str) -> Self {
        Self {
            total: text.chars().count(),
            alphanumeric: ALPHANUMERIC.find_iter(text).count(),
            letters: LETTER.find_iter(text).count(),
            digits: DIGIT.find_iter(text).count(),
            symbols: SYMBOL.find_iter(text).count(),
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}

/// JSON values that count as "no input"
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn reject(message: &str, code: ErrorCode) -> AnalysisError {
    debug!(%code, "Rejected reflection text: {}", message);
    AnalysisError::invalid_input(message, code)
}
