//! Numeric guards shared by every calculation stage.
//!
//! Contract for this core: NaN and infinity never reach an output record, and
//! no stage ever divides by zero. Each helper substitutes a documented
//! fallback instead of propagating garbage.

/// Replace a non-finite value with a fallback.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Replace a non-finite value with zero.
pub fn finite_or_zero(value: f64) -> f64 {
    finite_or(value, 0.0)
}

/// Percentage change of `scenario` over `baseline`, reporting 0 (not an
/// error) when the baseline is zero or the result is non-finite.
pub fn pct_change(baseline: f64, scenario: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    finite_or_zero((scenario - baseline) / baseline * 100.0)
}

/// Safe ratio with a zero sentinel on a zero denominator.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}
