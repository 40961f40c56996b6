use chrono::{DateTime, Local};

/// Parse an RFC 3339 date, e.g. `2025-06-01T18:30:00+02:00`, into
/// milliseconds since epoch.
pub fn parse_rfc3339_ms(value: &str) -> eyre::Result<u64> {
    let date = DateTime::parse_from_rfc3339(value)
        .map_err(|e| eyre::eyre!("Invalid date '{value}', expected RFC 3339: {e}"))?;

    u64::try_from(date.timestamp_millis())
        .map_err(|_| eyre::eyre!("Date '{value}' is before 1970-01-01"))
}

pub fn format_ms(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| format!("{timestamp}ms"))
}
