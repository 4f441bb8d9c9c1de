//! The event record served by the city's open-data endpoint.
//!
//! Records are deserialized straight from the upstream JSON. Every field is
//! lenient: missing, null or wrongly typed values become empty, extra fields
//! are ignored, and timestamps are only parsed on demand.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::{NycEventsError, NycEventsResult};

const SEARCH_URL: &str = "https://www.google.com/search";

/// A public event listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Upstream identifier, used as the list key
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_name: String,

    /// Floating local timestamp, e.g. `2024-03-01T10:00:00.000`
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub event_borough: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub event_location: Option<String>,
}

impl Event {
    /// Parsed start time, or `None` when absent, empty or unparseable.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start_date_time.as_deref().and_then(parse_timestamp)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end_date_time.as_deref().and_then(parse_timestamp)
    }

    /// Calendar day the event starts on. This is the grouping key.
    pub fn start_day(&self) -> Option<NaiveDate> {
        self.start().map(|dt| dt.date())
    }

    pub fn event_type(&self) -> Option<&str> {
        non_empty(self.event_type.as_deref())
    }

    pub fn borough(&self) -> Option<&str> {
        non_empty(self.event_borough.as_deref())
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(self.event_location.as_deref())
    }

    /// Web search link for the event: `"<name> <Month d, yyyy> NYC"`.
    pub fn search_url(&self) -> NycEventsResult<Url> {
        let mut terms = vec![self.event_name.clone()];
        if let Some(start) = self.start() {
            terms.push(start.format("%B %-d, %Y").to_string());
        }
        terms.push("NYC".to_string());

        Url::parse_with_params(SEARCH_URL, [("q", terms.join(" "))])
            .map_err(|e| NycEventsError::Config(format!("Invalid search URL: {e}")))
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_name)
    }
}

/// Parse an upstream timestamp into wall-clock time.
///
/// Accepts `T` or space separators, optional fractional seconds and bare
/// dates. A trailing zone marker is accepted but dropped; the wall-clock time
/// in that zone is kept.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accept strings, numbers and null for identifier-like fields.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Keep strings; anything else in a free-text field is treated as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}
