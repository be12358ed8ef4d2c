//! Wall-clock timestamps in milliseconds.

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
///
/// Wall-clock time, not a monotonic clock: the value follows system clock
/// adjustments and may step backwards. Stroke durations derived from it are
/// informational.
pub fn now_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_epoch_millis() {
        let now = now_millis();
        // 2020-01-01T00:00:00Z
        assert!(now > 1_577_836_800_000.0);
        assert_eq!(now.fract(), 0.0);
    }
}
