use chrono::{DateTime, Utc};

use crate::VimeoError;

/// Numeric ID from the last path segment of a resource URI, e.g. `/users/152184` gives `152184`.
pub fn id_from_uri(uri: &str) -> Result<i64, VimeoError> {
    let last = uri.rsplit('/').next().unwrap_or_default();
    last.parse::<i64>()
        .map_err(|_| VimeoError::InvalidUri(uri.to_string()))
}

/// Like [`id_from_uri`] for an optional field; a missing URI is an error.
pub(crate) fn required_id(uri: Option<&str>) -> Result<i64, VimeoError> {
    match uri {
        Some(uri) => id_from_uri(uri),
        None => Err(VimeoError::ParseError("missing field `uri`".to_string())),
    }
}

/// RFC 3339 timestamp. Absent stays `None`, present but malformed is an error.
pub fn parse_timestamp(value: Option<&str>) -> Result<Option<DateTime<Utc>>, VimeoError> {
    value
        .map(|value| {
            DateTime::parse_from_rfc3339(value)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| VimeoError::ParseError(format!("invalid timestamp {:?}: {}", value, e)))
        })
        .transpose()
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Decodes `a=1&b=two%20words` pairs, as found in query strings and OAuth token replies.
pub fn parse_form_urlencoded(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(value: &str) -> String {
    let value = value.replace('+', " ");
    match urlencoding::decode(&value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.clone(),
    }
}
