//! Centralized timeout configuration
//!
//! Default time budgets for directory detection and cache freshness. All of
//! them can be overridden in the configuration file.

use std::time::Duration;

/// Default budgets for the two-stage native detection
pub mod detection {
    use super::*;

    /// End-to-end budget for one detection attempt (5 seconds)
    pub const OVERALL_MS: u64 = 5_000;

    /// Upper bound for the detect stage alone (3 seconds)
    pub const STAGE_CAP_MS: u64 = 3_000;

    /// Minimum budget granted to the listing stage (1 second)
    pub const STAGE2_FLOOR_MS: u64 = 1_000;

    /// Get the overall detection timeout as Duration
    pub fn overall_timeout() -> Duration {
        Duration::from_millis(OVERALL_MS)
    }
}

/// Default freshness rules for the directory cache
pub mod cache {
    /// Snapshots older than this are ignored (24 hours)
    pub const TTL_SECS: u64 = 24 * 60 * 60;
}

/// Debounce window for settings file changes
pub mod settings {
    use super::*;

    /// Quiet period before a settings change is applied (500 milliseconds)
    pub const RELOAD_DEBOUNCE_MS: u64 = 500;

    /// Get the reload debounce as Duration
    pub fn reload_debounce() -> Duration {
        Duration::from_millis(RELOAD_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_cap_fits_inside_overall_budget() {
        assert!(detection::STAGE_CAP_MS < detection::OVERALL_MS);
        assert!(detection::STAGE2_FLOOR_MS < detection::STAGE_CAP_MS);
        assert_eq!(detection::overall_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_cache_ttl_is_one_day() {
        assert_eq!(cache::TTL_SECS, 86_400);
    }
}
