//! Score normalization
//!
//! File, agent and symbol matchers each produce raw fuzzy-match scores on
//! their own scale. Rescaling them onto one bounded axis lets the merged
//! suggestion list be sorted with a single comparison.

/// Raw scores at or below this value carry no signal.
pub const MIN_RAW: f64 = 40.0;

/// Raw scores at or above this value are treated as a perfect match.
pub const MAX_RAW: f64 = 150.0;

/// Map a raw matcher score onto `[0, target_max]`.
///
/// Scores are clamped at the calibration bounds and linearly interpolated in
/// between. A negative `target_max` is allowed and simply flips the axis. A
/// NaN score maps to 0.
pub fn normalize(raw_score: f64, target_max: f64) -> f64 {
    if raw_score.is_nan() || raw_score <= MIN_RAW {
        return 0.0;
    }
    if raw_score >= MAX_RAW {
        return target_max;
    }
    ((raw_score - MIN_RAW) / (MAX_RAW - MIN_RAW)) * target_max
}
