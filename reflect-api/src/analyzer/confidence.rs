//! Confidence adjustment
//!
//! Turns a base confidence into the reported value:
//! - categories with a range: base × U(0.8, 1.2), clamped into the range
//! - categories without one (Neutral): U(0.60, 0.80), base discarded
//! - plus a length bonus of min(0.05, chars / 2000)
//! - capped at 0.99 and rounded to 2 decimals
//!
//! Internal faults never fail the request: the step logs and reports
//! [`FALLBACK_CONFIDENCE`] instead.

use rand::Rng;
use thiserror::Error;
use tracing::warn;

use super::tables::ConfidenceRange;

/// Reported when the adjustment itself faults
pub const FALLBACK_CONFIDENCE: f64 = 0.75;

const JITTER_MIN: f64 = 0.8;
const JITTER_MAX: f64 = 1.2;
const UNRANGED: ConfidenceRange = ConfidenceRange::new(0.60, 0.80);
const MAX_LENGTH_BONUS: f64 = 0.05;
const LENGTH_BONUS_SCALE: f64 = 2000.0;
const CONFIDENCE_CEILING: f64 = 0.99;

/// Source of uniformly distributed samples
///
/// Implemented for every [`rand::Rng`]; tests substitute a fixed source to
/// make confidence values exact.
pub trait UniformSource {
    /// Sample from the closed interval [low, high]
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl<R: Rng> UniformSource for R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..=high)
    }
}

#[derive(Debug, Error)]
enum ConfidenceFault {
    #[error("invalid confidence range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    #[error("non-finite base confidence {0}")]
    NonFiniteBase(f64),

    #[error("non-finite random sample {0}")]
    NonFiniteSample(f64),

    #[error("could not round confidence {0}")]
    Rounding(f64),
}

/// Adjusted, bonus-applied, rounded confidence
///
/// `range` is the detected category's range, `None` for Neutral.
pub fn calculate_confidence<S: UniformSource + ?Sized>(
    range: Option<ConfidenceRange>,
    base_confidence: f64,
    text: &str,
    source: &mut S,
) -> f64 {
    match try_calculate(range, base_confidence, text, source) {
        Ok(confidence) => confidence,
        Err(fault) => {
            warn!(
                "Confidence adjustment failed ({}), using fallback {}",
                fault, FALLBACK_CONFIDENCE
            );
            FALLBACK_CONFIDENCE
        }
    }
}

fn try_calculate<S: UniformSource + ?Sized>(
    range: Option<ConfidenceRange>,
    base_confidence: f64,
    text: &str,
    source: &mut S,
) -> Result<f64, ConfidenceFault> {
    let adjusted = match range {
        Some(range) => {
            if !range.is_valid() {
                return Err(ConfidenceFault::InvalidRange {
                    min: range.min,
                    max: range.max,
                });
            }
            if !base_confidence.is_finite() {
                return Err(ConfidenceFault::NonFiniteBase(base_confidence));
            }
            let factor = sample(source, JITTER_MIN, JITTER_MAX)?;
            range.clamp(base_confidence * factor)
        }
        None => sample(source, UNRANGED.min, UNRANGED.max)?,
    };

    let confidence = (adjusted + length_bonus(text)).min(CONFIDENCE_CEILING);
    round_to_hundredths(confidence).ok_or(ConfidenceFault::Rounding(confidence))
}

fn sample<S: UniformSource + ?Sized>(
    source: &mut S,
    low: f64,
    high: f64,
) -> Result<f64, ConfidenceFault> {
    let value = source.uniform(low, high);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfidenceFault::NonFiniteSample(value))
    }
}

/// min(0.05, chars / 2000)
pub fn length_bonus(text: &str) -> f64 {
    (text.chars().count() as f64 / LENGTH_BONUS_SCALE).min(MAX_LENGTH_BONUS)
}

/// Round the stored binary value to 2 decimal places
///
/// Rounds the exact value held by the float, so 0.715 (stored just below
/// 0.715) becomes 0.71. Scaling by 100 first would round the inexact
/// product 71.5 up instead.
pub fn round_to_hundredths(value: f64) -> Option<f64> {
    format!("{:.2}", value).parse().ok()
}
