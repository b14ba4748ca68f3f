//! Shared utilities for CLI commands.

use chrono::{DateTime, Duration, Local, Utc};

/// Formats a duration as "Xh Ym" if >= 1 hour, "Xm" otherwise.
/// Negative durations are treated as 0m.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes();
    if total_minutes < 0 {
        return "0m".to_string();
    }
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Formats an instant as local wall-clock time (HH:MM).
#[must_use]
pub fn format_clock(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_duration(Duration::minutes(510)), "8h 30m");
        assert_eq!(format_duration(Duration::hours(1)), "1h 0m");
    }

    #[test]
    fn formats_sub_hour_durations_as_minutes() {
        assert_eq!(format_duration(Duration::minutes(45)), "45m");
        assert_eq!(format_duration(Duration::zero()), "0m");
    }

    #[test]
    fn negative_durations_collapse_to_zero() {
        assert_eq!(format_duration(Duration::minutes(-5)), "0m");
    }
}
