//! Query construction for the open-data endpoint.
//!
//! The endpoint takes a `$limit` and a single SoQL-style `$where` predicate:
//! `field op 'literal' [AND field op 'literal']...`. Both date bounds apply to
//! `start_date_time`. Borough and type values are interpolated as-is, so they
//! must come from the dataset's own vocabulary, never from free text.

use chrono::NaiveDateTime;
use url::Url;

use crate::constants::RESULT_LIMIT;
use crate::date_range::DateRange;
use crate::error::{NycEventsError, NycEventsResult};

/// Literal timestamp format the endpoint compares against (no zone suffix).
pub const TIMESTAMP_LITERAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Filters for a single upstream request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub borough: Option<String>,
    pub event_type: Option<String>,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn range(mut self, range: &DateRange) -> Self {
        self.start = range.from;
        self.end = range.to;
        self
    }

    /// Exact-match borough filter. Empty values are ignored.
    pub fn borough(mut self, borough: Option<&str>) -> Self {
        self.borough = borough.filter(|b| !b.is_empty()).map(str::to_string);
        self
    }

    /// Exact-match event type filter. Empty values are ignored.
    pub fn event_type(mut self, event_type: Option<&str>) -> Self {
        self.event_type = event_type.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    /// The combined `$where` predicate, if any filter is set.
    ///
    /// Conjuncts always appear in the order: date range, borough, event type.
    pub fn predicate(&self) -> Option<String> {
        let mut conjuncts = Vec::new();

        if let Some(start) = self.start {
            conjuncts.push(format!("start_date_time >= {}", timestamp_literal(start)));
        }
        if let Some(end) = self.end {
            conjuncts.push(format!("start_date_time <= {}", timestamp_literal(end)));
        }
        if let Some(borough) = &self.borough {
            conjuncts.push(format!("event_borough = '{}'", borough));
        }
        if let Some(event_type) = &self.event_type {
            conjuncts.push(format!("event_type = '{}'", event_type));
        }

        if conjuncts.is_empty() {
            None
        } else {
            Some(conjuncts.join(" AND "))
        }
    }

    /// Query parameters: the result ceiling plus at most one predicate.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("$limit", RESULT_LIMIT.to_string())];
        if let Some(predicate) = self.predicate() {
            params.push(("$where", predicate));
        }
        params
    }

    /// Full request URL against `endpoint`.
    pub fn to_url(&self, endpoint: &str) -> NycEventsResult<Url> {
        Url::parse_with_params(endpoint, self.params())
            .map_err(|e| NycEventsError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))
    }
}

fn timestamp_literal(dt: NaiveDateTime) -> String {
    format!("'{}'", dt.format(TIMESTAMP_LITERAL_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_date_range_predicate_uses_literal_format() {
        let query = EventQuery::new()
            .start(midnight(2024, 3, 1))
            .end(midnight(2024, 3, 31));

        assert_eq!(
            query.predicate().unwrap(),
            "start_date_time >= '2024-03-01 00:00:00' AND start_date_time <= '2024-03-31 00:00:00'"
        );
    }

    #[test]
    fn test_end_only_filters_on_start_field() {
        let query = EventQuery::new().end(midnight(2024, 3, 31));
        assert_eq!(
            query.predicate().unwrap(),
            "start_date_time <= '2024-03-31 00:00:00'"
        );
    }

    #[test]
    fn test_start_only() {
        let query = EventQuery::new().start(midnight(2024, 3, 1));
        assert_eq!(
            query.predicate().unwrap(),
            "start_date_time >= '2024-03-01 00:00:00'"
        );
    }

    #[test]
    fn test_conjunct_order_is_fixed() {
        let query = EventQuery::new()
            .event_type(Some("Music"))
            .borough(Some("Queens"))
            .start(midnight(2024, 3, 1));

        assert_eq!(
            query.predicate().unwrap(),
            "start_date_time >= '2024-03-01 00:00:00' AND event_borough = 'Queens' AND event_type = 'Music'"
        );
        assert_eq!(query.predicate(), query.clone().predicate());
    }

    #[test]
    fn test_borough_alone_and_empty_values() {
        let query = EventQuery::new().borough(Some("Staten Island")).event_type(Some(""));
        assert_eq!(query.predicate().unwrap(), "event_borough = 'Staten Island'");

        assert_eq!(EventQuery::new().borough(None).predicate(), None);
    }

    #[test]
    fn test_params_always_carry_limit() {
        assert_eq!(
            EventQuery::new().params(),
            vec![("$limit", "5000".to_string())]
        );

        let params = EventQuery::new().borough(Some("Bronx")).params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[1], ("$where", "event_borough = 'Bronx'".to_string()));
    }

    #[test]
    fn test_to_url_encodes_params() {
        let url = EventQuery::new()
            .borough(Some("Brooklyn"))
            .to_url("https://data.cityofnewyork.us/resource/tvpp-9vvx.json")
            .unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("$limit".to_string(), "5000".to_string()),
                ("$where".to_string(), "event_borough = 'Brooklyn'".to_string()),
            ]
        );
        assert!(EventQuery::new().to_url("not a url").is_err());
    }
}
