//! State of a month calendar view, updated through a single reducer.
//!
//! Loads are sequenced: `begin_load` hands out a ticket with an increasing
//! generation, and a completion is only applied when it carries the latest
//! ticket. A slow response for a month the user already left is dropped.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::date_range::{DateRange, MonthWindow};
use crate::event::Event;
use crate::query::EventQuery;
use crate::views::{self, EventFilters};

/// Identifies one load of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum Action {
    SetMonth(NaiveDate),
    SelectDate(Option<NaiveDate>),
    SetBorough(Option<String>),
    SetEventType(Option<String>),
    /// Turning the weekend shortcut on jumps to today's month and selects
    /// the upcoming Saturday. The fetch then always reaches the Sunday, even
    /// when it falls past the month grid.
    ToggleWeekend { today: NaiveDate },
    ClearFilters,
    EventsLoaded { ticket: LoadTicket, events: Vec<Event> },
    LoadFailed { ticket: LoadTicket, message: String },
}

#[derive(Debug, Clone)]
pub struct ViewState {
    window: MonthWindow,
    selected_date: Option<NaiveDate>,
    filters: EventFilters,
    events: Vec<Event>,
    status: LoadStatus,
    generation: u64,
    /// Sunday of the weekend selected by the shortcut
    weekend_end: Option<NaiveDate>,
}

impl ViewState {
    /// Initial state: today's month with today selected.
    pub fn new(today: NaiveDate) -> Self {
        ViewState {
            window: MonthWindow::containing(today),
            selected_date: Some(today),
            filters: EventFilters::default(),
            events: Vec::new(),
            status: LoadStatus::Idle,
            generation: 0,
            weekend_end: None,
        }
    }

    /// Start a load of the current month and return its ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        LoadTicket(self.generation)
    }

    /// Apply an action. Returns false when the action was stale and ignored.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SetMonth(date) => {
                self.window = MonthWindow::containing(date);
            }
            Action::SelectDate(date) => {
                self.selected_date = date;
            }
            Action::SetBorough(borough) => {
                self.filters.borough = borough;
            }
            Action::SetEventType(event_type) => {
                self.filters.event_type = event_type;
            }
            Action::ToggleWeekend { today } => {
                self.filters.this_weekend = !self.filters.this_weekend;
                if self.filters.this_weekend {
                    let (saturday, sunday) = views::weekend_of(today);
                    self.selected_date = Some(saturday);
                    self.window = MonthWindow::containing(today);
                    self.weekend_end = Some(sunday);
                } else {
                    self.weekend_end = None;
                }
            }
            Action::ClearFilters => {
                self.filters = EventFilters::default();
                self.weekend_end = None;
            }
            Action::EventsLoaded { ticket, events } => {
                if !self.is_current(ticket) {
                    tracing::debug!(?ticket, "dropping stale load");
                    return false;
                }
                self.events = events;
                self.status = LoadStatus::Loaded;
            }
            Action::LoadFailed { ticket, message } => {
                if !self.is_current(ticket) {
                    tracing::debug!(?ticket, "dropping stale failure");
                    return false;
                }
                self.status = LoadStatus::Failed(message);
            }
        }
        true
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Upstream query for the visible month grid, stretched to cover the
    /// Sunday of the weekend shortcut.
    pub fn query(&self) -> EventQuery {
        let mut range = self.window.fetch_range();
        if let Some(sunday) = self.weekend_end {
            range.to = range.to.max(DateRange::days(sunday, sunday).to);
        }
        EventQuery::new().range(&range)
    }

    pub fn window(&self) -> &MonthWindow {
        &self.window
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn filters(&self) -> &EventFilters {
        &self.filters
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Every loaded event, before client-side filters.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Loaded events passing the active filters.
    pub fn visible_events(&self, today: NaiveDate) -> Vec<&Event> {
        self.filters.apply(&self.events, today)
    }

    pub fn events_by_date(&self, today: NaiveDate) -> BTreeMap<NaiveDate, Vec<&Event>> {
        views::group_by_date(self.visible_events(today))
    }

    /// Events for the selected day, or every visible event when no day is selected.
    pub fn selected_events(&self, today: NaiveDate) -> Vec<&Event> {
        match self.selected_date {
            Some(date) => self
                .events_by_date(today)
                .remove(&date)
                .unwrap_or_default(),
            None => self.visible_events(today),
        }
    }

    /// Filter options come from all loaded events, not just visible ones.
    pub fn boroughs(&self) -> Vec<String> {
        views::unique_boroughs(&self.events)
    }

    pub fn event_types(&self) -> Vec<String> {
        views::unique_event_types(&self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, start: &str, borough: &str) -> Event {
        Event {
            event_id: id.to_string(),
            event_name: format!("Event {}", id),
            start_date_time: Some(start.to_string()),
            event_borough: Some(borough.to_string()),
            event_type: Some("Music".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_state_selects_today() {
        let today = date(2024, 3, 6);
        let state = ViewState::new(today);

        assert_eq!(state.selected_date(), Some(today));
        assert_eq!(state.window().title(), "March 2024");
        assert_eq!(state.status(), &LoadStatus::Idle);
        assert_eq!(
            state.query().predicate().unwrap(),
            "start_date_time >= '2024-02-25 00:00:00' AND start_date_time <= '2024-04-06 23:59:59'"
        );
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let today = date(2024, 3, 6);
        let mut state = ViewState::new(today);

        let march = state.begin_load();
        state.apply(Action::SetMonth(date(2024, 4, 1)));
        let april = state.begin_load();

        assert!(state.apply(Action::EventsLoaded {
            ticket: april,
            events: vec![event("apr", "2024-04-02T10:00:00", "Queens")],
        }));
        // March resolves late and must not overwrite April
        assert!(!state.apply(Action::EventsLoaded {
            ticket: march,
            events: vec![event("mar", "2024-03-02T10:00:00", "Queens")],
        }));
        assert!(!state.apply(Action::LoadFailed {
            ticket: march,
            message: "API error: 500".to_string(),
        }));

        assert_eq!(state.events().len(), 1);
        assert_eq!(state.events()[0].event_id, "apr");
        assert_eq!(state.status(), &LoadStatus::Loaded);
    }

    #[test]
    fn test_failure_sets_error_and_retry_clears_it() {
        let mut state = ViewState::new(date(2024, 3, 6));

        let ticket = state.begin_load();
        state.apply(Action::LoadFailed {
            ticket,
            message: "API error: 503".to_string(),
        });
        assert_eq!(state.error(), Some("API error: 503"));

        let retry = state.begin_load();
        assert_eq!(state.error(), None);
        state.apply(Action::EventsLoaded {
            ticket: retry,
            events: vec![],
        });
        assert_eq!(state.status(), &LoadStatus::Loaded);
    }

    #[test]
    fn test_selected_events_follow_filters() {
        let today = date(2024, 3, 6);
        let mut state = ViewState::new(today);
        let ticket = state.begin_load();
        state.apply(Action::EventsLoaded {
            ticket,
            events: vec![
                event("1", "2024-03-06T10:00:00.000", "Queens"),
                event("2", "2024-03-06T12:00:00.000", "Bronx"),
                event("3", "2024-03-09T12:00:00.000", "Bronx"),
            ],
        });

        assert_eq!(state.selected_events(today).len(), 2);

        state.apply(Action::SetBorough(Some("Bronx".to_string())));
        let ids: Vec<&str> = state
            .selected_events(today)
            .iter()
            .map(|e| e.event_id.as_str())
            .collect();
        assert_eq!(ids, vec!["2"]);

        state.apply(Action::SelectDate(None));
        assert_eq!(state.selected_events(today).len(), 2);

        // Options are derived from everything loaded
        assert_eq!(state.boroughs(), vec!["Bronx", "Queens"]);
        assert_eq!(state.event_types(), vec!["Music"]);

        state.apply(Action::ClearFilters);
        assert_eq!(state.filters(), &EventFilters::default());
        assert_eq!(state.selected_events(today).len(), 3);
    }

    #[test]
    fn test_weekend_toggle_selects_saturday() {
        let today = date(2024, 3, 6);
        let mut state = ViewState::new(today);
        state.apply(Action::SetMonth(date(2024, 5, 1)));

        state.apply(Action::ToggleWeekend { today });
        assert!(state.filters().this_weekend);
        assert_eq!(state.selected_date(), Some(date(2024, 3, 9)));
        assert_eq!(state.window().first_day(), date(2024, 3, 1));

        state.apply(Action::ToggleWeekend { today });
        assert!(!state.filters().this_weekend);
        assert_eq!(state.selected_date(), Some(date(2024, 3, 9)));
    }

    #[test]
    fn test_weekend_fetch_reaches_sunday_past_the_grid() {
        // Thursday in the last grid week; the Sunday belongs to the next month
        let today = date(2024, 8, 29);
        let mut state = ViewState::new(today);
        assert_eq!(
            state.query().predicate().unwrap(),
            "start_date_time >= '2024-07-28 00:00:00' AND start_date_time <= '2024-08-31 23:59:59'"
        );

        state.apply(Action::ToggleWeekend { today });
        assert_eq!(
            state.query().predicate().unwrap(),
            "start_date_time >= '2024-07-28 00:00:00' AND start_date_time <= '2024-09-01 23:59:59'"
        );

        let ticket = state.begin_load();
        state.apply(Action::EventsLoaded {
            ticket,
            events: vec![
                event("sat", "2024-08-31T10:00:00.000", "Queens"),
                event("sun", "2024-09-01T10:00:00.000", "Queens"),
                event("thu", "2024-08-29T10:00:00.000", "Queens"),
            ],
        });
        let ids: Vec<&str> = state
            .visible_events(today)
            .iter()
            .map(|e| e.event_id.as_str())
            .collect();
        assert_eq!(ids, vec!["sat", "sun"]);

        state.apply(Action::ToggleWeekend { today });
        assert!(state.query().predicate().unwrap().ends_with("'2024-08-31 23:59:59'"));
    }

    #[test]
    fn test_weekend_inside_grid_keeps_grid_range() {
        let today = date(2024, 3, 6);
        let mut state = ViewState::new(today);
        let before = state.query();

        state.apply(Action::ToggleWeekend { today });
        assert_eq!(state.query(), before);
    }
}
