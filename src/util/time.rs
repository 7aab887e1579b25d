use chrono::{DateTime, SecondsFormat, Utc};

// Metadata timestamps arrive either as unix seconds ("1700000000") or as
// RFC3339 text. Anything else is shown verbatim.
pub fn display_timestamp(raw: &str) -> String {
    let s = raw.trim();
    if let Ok(secs) = s.parse::<i64>() {
        if let Some(dt) = DateTime::<Utc>::from_timestamp(secs, 0) {
            return dt.to_rfc3339_opts(SecondsFormat::Secs, true);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true);
    }
    raw.to_string()
}
