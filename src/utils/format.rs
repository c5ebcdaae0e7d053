use chrono::NaiveTime;

/// Format a duration in seconds to "Xh Ym" or "Ym" string
pub fn format_duration_secs(secs: i64) -> String {
    if secs <= 0 {
        return "now".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_handles_zero_total() {
        assert_eq!(progress_bar(3, 0, 4), "░░░░");
    }

    #[test]
    fn progress_bar_caps_at_full() {
        assert_eq!(progress_bar(12, 10, 5), "█████");
    }

    #[test]
    fn duration_formats_hours_and_minutes() {
        assert_eq!(format_duration_secs(3660), "1h 1m");
        assert_eq!(format_duration_secs(120), "2m");
        assert_eq!(format_duration_secs(0), "now");
    }
}
