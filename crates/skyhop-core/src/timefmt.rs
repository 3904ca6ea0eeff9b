use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

/// Parses a provider timestamp.
/// AviationStack sends RFC 3339 ("2026-10-19T14:30:00+00:00"); some mirrors drop the offset,
/// in which case the value is read as UTC. Empty or garbage input yields `None`.
pub fn parse_provider_time(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Card clock time, e.g. "02:30 PM". "N/A" for empty input; unparseable input is echoed back.
pub fn format_flight_time<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_with(iso, tz, "%I:%M %p")
}

/// Card date, e.g. "Mon, Oct 19".
pub fn format_flight_date<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_with(iso, tz, "%a, %b %-d")
}

fn format_with<Tz>(iso: &str, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if iso.trim().is_empty() {
        return "N/A".to_string();
    }
    match parse_provider_time(iso) {
        Some(dt) => dt.with_timezone(tz).format(pattern).to_string(),
        None => iso.to_string(),
    }
}

/// Human readable block time, e.g. "2h 05m".
pub fn format_duration(duration: chrono::Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    #[test]
    fn test_parse_rfc3339_and_naive() {
        let a = parse_provider_time("2026-10-19T14:30:00+00:00").unwrap();
        let b = parse_provider_time("2026-10-19T14:30:00").unwrap();
        let c = parse_provider_time("2026-10-19T16:30:00+02:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.hour(), 14);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_provider_time("").is_none());
        assert!(parse_provider_time("   ").is_none());
        assert!(parse_provider_time("tomorrow morning").is_none());
        assert!(parse_provider_time("2026-13-45T99:00:00").is_none());
    }

    #[test]
    fn test_format_in_timezone() {
        let warsaw = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_flight_time("2026-10-19T12:05:00+00:00", &warsaw), "02:05 PM");
        assert_eq!(format_flight_date("2026-10-19T23:30:00+00:00", &warsaw), "Tue, Oct 20");
        assert_eq!(format_flight_date("2026-10-19T23:30:00+00:00", &Utc), "Mon, Oct 19");
    }

    #[test]
    fn test_format_fallbacks() {
        assert_eq!(format_flight_time("", &Utc), "N/A");
        assert_eq!(format_flight_date("", &Utc), "N/A");
        assert_eq!(format_flight_time("soon", &Utc), "soon");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::minutes(125)), "2h 05m");
        assert_eq!(format_duration(chrono::Duration::minutes(-5)), "0h 00m");
    }
}
