//! Score normalization command

use promptline_core::score::normalize;

pub fn execute(raw: f64, max: f64) -> f64 {
    normalize(raw, max)
}
