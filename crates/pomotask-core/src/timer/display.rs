//! Pure read-only helpers for rendering the countdown.

/// Format seconds as zero-padded `"MM:SS"`.
///
/// Minutes are not capped at 59, so 1500 seconds renders as `"25:00"`.
pub fn format_time(seconds: u64) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{mins:02}:{secs:02}")
}

/// Percentage of the segment already elapsed, rounded to 0..=100.
///
/// Returns 0 when `total` is 0; the engine invariants never produce that,
/// but the guard keeps this total over all inputs.
pub fn calculate_progress(remaining: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let elapsed = total.saturating_sub(remaining);
    ((elapsed as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_both_fields() {
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(9), "00:09");
        assert_eq!(format_time(600), "10:00");
    }

    #[test]
    fn format_time_does_not_cap_minutes() {
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(7265), "121:05");
    }

    #[test]
    fn progress_at_segment_boundaries() {
        assert_eq!(calculate_progress(1500, 1500), 0);
        assert_eq!(calculate_progress(0, 1500), 100);
        assert_eq!(calculate_progress(750, 1500), 50);
    }

    #[test]
    fn progress_rounds_to_nearest_percent() {
        // 1/3 elapsed -> 33.33 -> 33
        assert_eq!(calculate_progress(200, 300), 33);
        // 2/3 elapsed -> 66.67 -> 67
        assert_eq!(calculate_progress(100, 300), 67);
    }

    #[test]
    fn progress_guards_zero_total() {
        assert_eq!(calculate_progress(0, 0), 0);
        assert_eq!(calculate_progress(42, 0), 0);
    }
}
