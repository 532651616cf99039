//! Relative time formatting

use chrono::{DateTime, Utc};

/// Format a timestamp as a compact age relative to now, kubectl style.
pub fn format_age(timestamp: DateTime<Utc>) -> String {
    format_age_at(timestamp, Utc::now())
}

fn format_age_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - timestamp).num_seconds().max(0) as u64;
    format_interval(secs)
}

/// Format a duration in seconds compactly: `45s`, `5m`, `2h3m`, `4d`.
pub fn format_interval(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let mins = (secs % 3600) / 60;

    if days > 0 {
        format!("{}d", days)
    } else if hours > 0 {
        if mins > 0 {
            format!("{}h{}m", hours, mins)
        } else {
            format!("{}h", hours)
        }
    } else if mins > 0 {
        format!("{}m", mins)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn compact_intervals() {
        assert_eq!(format_interval(0), "0s");
        assert_eq!(format_interval(45), "45s");
        assert_eq!(format_interval(300), "5m");
        assert_eq!(format_interval(2 * 3600 + 180), "2h3m");
        assert_eq!(format_interval(3600), "1h");
        assert_eq!(format_interval(4 * 86400 + 3600), "4d");
    }

    #[test]
    fn age_never_goes_negative() {
        let now = Utc::now();
        assert_eq!(format_age_at(now + Duration::seconds(30), now), "0s");
        assert_eq!(format_age_at(now - Duration::minutes(5), now), "5m");
    }
}
