//! Credit formula and display helpers.
//!
//! Credits accrue at a fixed rate of 5 per complete 30-minute block,
//! floor-truncated. The value computed here is an immediate-feedback
//! estimate; the ledger's balance is authoritative.

/// Whole minutes per credit block.
pub const CREDIT_BLOCK_MINUTES: u32 = 30;

/// Credits awarded per complete block.
pub const CREDITS_PER_BLOCK: u32 = 5;

/// Cycles shorter than this are discarded on `stop()` rather than persisted.
/// Keeps accidental taps out of the ledger.
pub const MIN_PERSIST_SECONDS: u32 = 60;

pub fn credits_for_minutes(duration_minutes: u32) -> u32 {
    duration_minutes / CREDIT_BLOCK_MINUTES * CREDITS_PER_BLOCK
}

/// Renders a second count as `mm:ss` for countdown displays.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Fraction of the configured duration already elapsed, as a percentage.
pub fn progress_percent(total_seconds: u32, remaining_seconds: u32) -> f64 {
    if total_seconds == 0 {
        return 0.0;
    }
    let elapsed = total_seconds.saturating_sub(remaining_seconds);
    f64::from(elapsed) / f64::from(total_seconds) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_floor_to_complete_blocks() {
        assert_eq!(credits_for_minutes(0), 0);
        assert_eq!(credits_for_minutes(29), 0);
        assert_eq!(credits_for_minutes(30), 5);
        assert_eq!(credits_for_minutes(59), 5);
        assert_eq!(credits_for_minutes(60), 10);
        assert_eq!(credits_for_minutes(90), 15);
    }

    #[test]
    fn clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(5999), "99:59");
    }

    #[test]
    fn progress_runs_zero_to_hundred() {
        assert_eq!(progress_percent(100, 100), 0.0);
        assert_eq!(progress_percent(100, 50), 50.0);
        assert_eq!(progress_percent(100, 0), 100.0);
        assert_eq!(progress_percent(0, 0), 0.0);
    }
}
