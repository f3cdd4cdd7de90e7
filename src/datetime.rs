//! Date/time display utilities for greenroom.
//!
//! The backend serializes all timestamps as RFC3339 UTC; these helpers
//! format them for display in a configured timezone, matching the formats
//! the academy site shows next to posts.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Format a timestamp as `YYYY-MM-DD` in the given timezone.
///
/// Falls back to UTC formatting if the timezone name is unknown.
pub fn format_date(dt: &DateTime<Utc>, timezone: &str) -> String {
    format_with(dt, timezone, "%Y-%m-%d")
}

/// Format a timestamp as `YYYY-MM-DD HH:MM` in the given timezone.
pub fn format_date_time(dt: &DateTime<Utc>, timezone: &str) -> String {
    format_with(dt, timezone, "%Y-%m-%d %H:%M")
}

fn format_with(dt: &DateTime<Utc>, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return dt.format(format).to_string(),
    };
    dt.with_timezone(&tz).format(format).to_string()
}

/// Render a timestamp relative to `now` (e.g. "3시간 전", "2일 전").
///
/// Timestamps in the future render as "방금 전".
pub fn relative_time(dt: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let diff = (*now - *dt).num_seconds();

    if diff < 60 {
        return "방금 전".to_string();
    }
    if diff < 3600 {
        return format!("{}분 전", diff / 60);
    }
    if diff < 86_400 {
        return format!("{}시간 전", diff / 3600);
    }
    if diff < 604_800 {
        return format!("{}일 전", diff / 86_400);
    }
    if diff < 2_592_000 {
        return format!("{}주 전", diff / 604_800);
    }
    if diff < 31_536_000 {
        return format!("{}개월 전", diff / 2_592_000);
    }
    format!("{}년 전", diff / 31_536_000)
}
