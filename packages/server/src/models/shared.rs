use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Parse a raw query-string integer, falling back to `default` on any
/// missing or non-numeric input. List requests never fail on bad paging
/// parameters.
pub fn parse_index(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

/// Normalize an optional text field: whitespace-only input counts as absent.
pub fn empty_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Coerce an optional date string. Accepts RFC 3339 timestamps or plain
/// `YYYY-MM-DD` dates (which land on UTC midnight). Empty input is absent,
/// never an error.
pub fn parse_date(raw: Option<String>) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_time(NaiveTime::MIN);
        return Ok(Some(DateTime::from_naive_utc_and_offset(midnight, Utc)));
    }
    Err(AppError::Validation(format!("Invalid date: '{raw}'")))
}

/// Serde helper for integer fields the browser form may post as strings.
///
/// * JSON number => `Some(n)`
/// * numeric string => `Some(n)`
/// * empty string, null, or absent field => `None`
pub fn int_or_string<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(n)) => i32::try_from(n)
            .map(Some)
            .map_err(|_| serde::de::Error::custom("integer out of range")),
        Some(Raw::Str(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i32>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid integer: '{trimmed}'")))
        }
    }
}

/// Check a remote image URL against the configured host allow-list.
/// Consulted by the presentation layer only; stored URLs are unconstrained.
pub fn host_allowed(url: &str, allowed: &[String]) -> bool {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return false;
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    !host.is_empty() && allowed.iter().any(|a| a == host)
}
