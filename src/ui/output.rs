use crate::ui::theme;
use chrono::{Local, TimeZone};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{}", text.style(theme().header.clone()));
}

pub fn success(text: &str) {
    println!("{}", text.style(theme().success.clone()));
}

pub fn error(text: &str) {
    eprintln!("{} {}", "Error:".style(theme().error.clone()), text);
}

pub fn warn(text: &str) {
    println!("{}", text.style(theme().warn.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

/// Short relative age like "42s", "2m", "3h" or "1d".
pub fn time_since(now: f64, ts: f64) -> String {
    let diff = (now - ts).max(0.0) as i64;
    if diff < 60 {
        format!("{}s", diff)
    } else if diff < 3600 {
        format!("{}m", diff / 60)
    } else if diff < 86400 {
        format!("{}h", diff / 3600)
    } else {
        format!("{}d", diff / 86400)
    }
}

/// ctime-style local timestamp, e.g. "Mon Aug  3 14:05:09 2026".
pub fn format_timestamp(ts: f64) -> String {
    Local
        .timestamp_opt(ts as i64, 0)
        .single()
        .map(|dt| dt.format("%a %b %e %H:%M:%S %Y").to_string())
        .unwrap_or_else(|| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_since_buckets() {
        let now = 100_000.0;
        assert_eq!(time_since(now, now - 5.0), "5s");
        assert_eq!(time_since(now, now - 59.0), "59s");
        assert_eq!(time_since(now, now - 60.0), "1m");
        assert_eq!(time_since(now, now - 3_599.0), "59m");
        assert_eq!(time_since(now, now - 7_200.0), "2h");
        assert_eq!(time_since(now, now - 172_800.0), "2d");
    }

    #[test]
    fn test_time_since_clamps_future_timestamps() {
        assert_eq!(time_since(100.0, 200.0), "0s");
    }

    #[test]
    fn test_format_timestamp_has_year() {
        let rendered = format_timestamp(1_700_000_000.0);
        assert!(rendered.contains("2023"));
    }
}
