// ABOUTME: Duration string parsing for podcast episode lengths.
// ABOUTME: Normalizes integer seconds, HH:MM:SS, MM:SS, and Go-style spans to whole seconds.

/// Parses a duration string into seconds.
/// Supports:
/// - Plain integers (seconds)
/// - HH:MM:SS format
/// - MM:SS format
/// - Go-style durations like "1h30m", "45m", "2h"
///
/// Returns None if parsing fails or the value is negative.
pub fn parse_duration_seconds(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(secs) = s.parse::<u64>() {
        return Some(secs);
    }

    if s.contains(':') {
        return parse_colon_format(s);
    }

    if s.starts_with('-') {
        return None;
    }

    parse_duration::parse(s).ok().map(|d| d.as_secs())
}

fn parse_colon_format(s: &str) -> Option<u64> {
    let parts = s
        .split(':')
        .map(|p| p.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    match parts.as_slice() {
        [mins, secs] if *secs < 60 => mins.checked_mul(60)?.checked_add(*secs),
        [hours, mins, secs] if *mins < 60 && *secs < 60 => {
            hours.checked_mul(3600)?.checked_add(mins * 60 + secs)
        }
        _ => None,
    }
}
