use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};

/// Naive layouts the report backend emits when a timestamp lost its offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a record timestamp.
///
/// RFC 3339 values keep their offset; naive values are read as local time,
/// the way a browser `Date` would. Returns `None` for anything else so callers
/// can skip the record instead of failing the whole snapshot.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(raw, format)
            .ok()
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            .map(|local| local.with_timezone(&Utc))
    })
}

/// Convert a (possibly negative or NaN) second count into a chrono duration
/// with millisecond precision. Negative and NaN inputs become zero.
pub fn seconds_to_duration(seconds: f64) -> Duration {
    let clamped = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    Duration::milliseconds((clamped * 1000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_timestamp("2024-02-02T10:30:00+09:00").expect("valid timestamp");
        assert_eq!(parsed.hour(), 1);
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn parses_naive_timestamps_as_local_time() {
        let parsed = parse_timestamp("2024-02-02T10:30:00.250").expect("valid timestamp");
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.hour(), 10);
        assert_eq!(local.minute(), 30);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday-ish").is_none());
        assert!(parse_timestamp("2024-13-45T99:00:00Z").is_none());
    }

    #[test]
    fn clamps_negative_and_nan_durations() {
        assert_eq!(seconds_to_duration(-5.0), Duration::zero());
        assert_eq!(seconds_to_duration(f64::NAN), Duration::zero());
        assert_eq!(seconds_to_duration(1.5), Duration::milliseconds(1500));
    }
}
