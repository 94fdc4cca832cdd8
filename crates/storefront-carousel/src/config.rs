// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tunable carousel constants.

use serde::{Deserialize, Serialize};

/// Timing and gesture constants shared by both carousel variants.
///
/// Every field has a default, so a partial JSON blob deserializes cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Dwell time of the index-swap variant.
    pub rotate_interval_ms: u32,
    /// Dwell time of the infinite-loop variant.
    pub loop_interval_ms: u32,
    /// Duration of the eased slide transition; the settle check fires after it.
    pub transition_ms: u32,
    /// Minimum horizontal travel for a touch to count as a swipe.
    pub swipe_threshold_px: f64,
    /// Space between rendered slides, added to the measured slide width.
    pub gutter_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            rotate_interval_ms: 3000,
            loop_interval_ms: 6000,
            transition_ms: 1000,
            swipe_threshold_px: 50.0,
            gutter_px: 10.0,
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_blob_keeps_remaining_defaults() {
        let cfg: CarouselConfig = serde_json::from_str(r#"{"loop_interval_ms": 8000}"#).unwrap();
        assert_eq!(cfg.loop_interval_ms, 8000);
        assert_eq!(cfg.rotate_interval_ms, 3000);
        assert!((cfg.swipe_threshold_px - 50.0).abs() < f64::EPSILON);
    }
}
