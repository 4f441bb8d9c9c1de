//! HTTP client for the city's open-data endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;

use crate::error::{NycEventsError, NycEventsResult};
use crate::event::Event;
use crate::exclusion::normalize;
use crate::query::EventQuery;
use crate::settings::Settings;

/// Anything that can answer an `EventQuery` with filtered events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch events matching `query`, with excluded listings removed.
    async fn fetch_events(&self, query: &EventQuery) -> NycEventsResult<Vec<Event>>;
}

/// Client for the Socrata resource holding NYC Parks events
pub struct OpenDataClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OpenDataClient {
    pub fn new(settings: &Settings) -> NycEventsResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| NycEventsError::Config(format!("Could not build HTTP client: {e}")))?;

        // Fail early on a bad endpoint rather than on the first request
        EventQuery::new().to_url(&settings.endpoint)?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the raw record array. Null and malformed records come back as `None`.
    pub async fn fetch_raw(&self, query: &EventQuery) -> NycEventsResult<Vec<Option<Event>>> {
        let url = query.to_url(&self.endpoint)?;
        tracing::debug!(%url, "fetching events");

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "open-data endpoint returned an error");
            return Err(NycEventsError::Api {
                status: status.as_u16(),
            });
        }

        let records: Vec<serde_json::Value> = resp.json().await?;
        Ok(records.into_iter().map(decode_record).collect())
    }
}

/// Decode one record, dropping it rather than the batch when it is malformed.
fn decode_record(record: serde_json::Value) -> Option<Event> {
    if record.is_null() {
        return None;
    }
    match serde_json::from_value(record) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed event record");
            None
        }
    }
}

#[async_trait]
impl EventSource for OpenDataClient {
    async fn fetch_events(&self, query: &EventQuery) -> NycEventsResult<Vec<Event>> {
        let raw = self.fetch_raw(query).await?;
        tracing::debug!(count = raw.len(), "received events");

        let mut starts: Vec<&str> = raw
            .iter()
            .flatten()
            .filter_map(|e| e.start_date_time.as_deref())
            .filter(|s| !s.is_empty())
            .collect();
        starts.sort_unstable();
        if let (Some(first), Some(last)) = (starts.first(), starts.last()) {
            tracing::debug!(first, last, "date range of received events");
        }

        let events = normalize(raw);
        tracing::debug!(count = events.len(), "events after exclusion");

        Ok(events)
    }
}
