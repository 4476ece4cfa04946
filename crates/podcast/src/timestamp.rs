// ABOUTME: Flexible timestamp parsing for episode publication dates.
// ABOUTME: Accepts RFC 3339, RFC 2822, named zones, naive date-times and bare dates, keeping the offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// Parses a timestamp string using the common feed and ISO formats.
/// Returns the instant with its original offset; inputs without a zone are taken as UTC.
///
/// Covers RFC 3339, RFC 2822, RFC 1123 with named US/European/Asian zone abbreviations,
/// single-digit days, and `YYYY-MM-DD` dates.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }

    if let Some(dt) = parse_with_named_timezone(s) {
        return Some(dt);
    }

    let formats_with_tz = [
        // "Mon, 2 Jan 2006 15:04:05 -0700"
        "%a, %e %b %Y %H:%M:%S %z",
        // "02 Jan 2006 15:04:05 -0700"
        "%d %b %Y %H:%M:%S %z",
        // "2006-01-02T15:04:05-0700"
        "%Y-%m-%dT%H:%M:%S%z",
        // "2006-01-02 15:04:05 -07:00"
        "%Y-%m-%d %H:%M:%S %:z",
    ];

    for fmt in &formats_with_tz {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let formats_naive = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%d %b %Y %H:%M:%S",
        "%e %b %Y %H:%M:%S",
    ];

    for fmt in &formats_naive {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.fix().from_utc_datetime(&naive));
        }
    }

    for fmt in ["%Y-%m-%d", "%d %b %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.fix().from_utc_datetime(&naive));
        }
    }

    None
}

/// Converts Unix seconds into a UTC-anchored instant.
pub fn from_unix_seconds(secs: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.fixed_offset())
}

/// Parses RFC 1123 style strings ending in a zone abbreviation (EST, CEST, JST, ...).
/// chrono's `%Z` only formats these, so the offset is looked up here.
fn parse_with_named_timezone(s: &str) -> Option<DateTime<FixedOffset>> {
    const HOUR: i32 = 3600;
    let tz_offsets: &[(&str, i32)] = &[
        ("GMT", 0),
        ("UTC", 0),
        ("EST", -5 * HOUR),
        ("EDT", -4 * HOUR),
        ("CST", -6 * HOUR),
        ("CDT", -5 * HOUR),
        ("MST", -7 * HOUR),
        ("MDT", -6 * HOUR),
        ("PST", -8 * HOUR),
        ("PDT", -7 * HOUR),
        ("AKST", -9 * HOUR),
        ("AKDT", -8 * HOUR),
        ("HST", -10 * HOUR),
        ("AST", -4 * HOUR),
        ("ADT", -3 * HOUR),
        ("NST", -(3 * HOUR + 30 * 60)),
        ("NDT", -(2 * HOUR + 30 * 60)),
        ("WET", 0),
        ("WEST", HOUR),
        ("CET", HOUR),
        ("CEST", 2 * HOUR),
        ("EET", 2 * HOUR),
        ("EEST", 3 * HOUR),
        ("BST", HOUR),
        ("JST", 9 * HOUR),
        ("KST", 9 * HOUR),
        ("AEST", 10 * HOUR),
        ("AEDT", 11 * HOUR),
        ("AWST", 8 * HOUR),
        ("NZST", 12 * HOUR),
        ("NZDT", 13 * HOUR),
    ];

    let (base, zone) = s.rsplit_once(' ')?;
    let offset_secs = tz_offsets
        .iter()
        .find(|(name, _)| *name == zone)
        .map(|(_, secs)| *secs)?;
    let offset = FixedOffset::east_opt(offset_secs)?;

    let formats = [
        "%a, %d %b %Y %H:%M:%S",
        "%a, %e %b %Y %H:%M:%S",
        "%d %b %Y %H:%M:%S",
        "%e %b %Y %H:%M:%S",
    ];

    formats.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(base.trim_end(), fmt).ok()?;
        offset.from_local_datetime(&naive).single()
    })
}
