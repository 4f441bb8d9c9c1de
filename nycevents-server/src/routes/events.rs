//! Filtered event listing

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use nycevents_core::date_range::{parse_range_end, parse_range_start};
use nycevents_core::{Event, EventQuery, NycEventsResult};
use serde::Deserialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events", get(list_events))
}

/// Query parameters accepted by GET /api/events
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsParams {
    pub borough: Option<String>,
    pub event_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl EventsParams {
    fn to_query(&self) -> NycEventsResult<EventQuery> {
        let mut query = EventQuery::new()
            .borough(self.borough.as_deref())
            .event_type(self.event_type.as_deref());

        if let Some(start) = non_empty(&self.start_date) {
            query = query.start(parse_range_start(start)?);
        }
        if let Some(end) = non_empty(&self.end_date) {
            query = query.end(parse_range_end(end)?);
        }

        Ok(query)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// GET /api/events - Events with excluded listings removed
async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventsParams>,
) -> Result<Json<Vec<Event>>, AppError> {
    let query = params.to_query()?;
    tracing::info!(predicate = ?query.predicate(), "fetching events");

    let events = state.source().fetch_events(&query).await.map_err(|e| {
        tracing::error!(error = %e, "fetch failed");
        e
    })?;
    tracing::info!(count = events.len(), "returning events");

    Ok(Json(events))
}
