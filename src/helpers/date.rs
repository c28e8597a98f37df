//! Date helper functions
//!
//! Post dates are kept as the strings authors wrote; these helpers only
//! interpret them for display and for diagnostics.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats whose lexicographic order matches chronological order
const ISO_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a date string in the ISO-8601 family of formats
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for fmt in ISO_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }

    // RFC 3339 with an offset
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

/// Whether a date string sorts correctly under plain string comparison
pub fn is_iso_date(s: &str) -> bool {
    parse_date(s).is_some()
}

/// Format date in full format (like "January 15, 2024"), or return it unchanged
pub fn display_date(s: &str) -> String {
    match parse_date(s) {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => s.to_string(),
    }
}
