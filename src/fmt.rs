use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an amount with exactly two decimals: 100.5 -> "100.50".
pub fn amount(val: f64) -> String {
    format!("{val:.2}")
}

/// Render a stored creation timestamp in local time.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DD HH:MM:SS` (taken as already local)
/// or epoch milliseconds. Anything else is shown verbatim; a missing or
/// blank value renders as "-".
pub fn recorded_at(raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return "-".to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
        return naive.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(millis) = raw.parse::<i64>() {
        if let Some(dt) = Local.timestamp_millis_opt(millis).single() {
            return dt.format(TIMESTAMP_FORMAT).to_string();
        }
    }
    raw.to_string()
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
