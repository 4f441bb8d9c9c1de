//! Views derived from a loaded set of events.
//!
//! All functions here are pure and never fail; events with missing fields are
//! simply left out of the views that need them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate};

use crate::event::Event;

/// Bucket events by the calendar day they start on, keeping first-seen order
/// within each day. Events without a usable start are omitted.
pub fn group_by_date<'a, I>(events: I) -> BTreeMap<NaiveDate, Vec<&'a Event>>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut grouped: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();

    for event in events {
        if let Some(day) = event.start_day() {
            grouped.entry(day).or_default().push(event);
        }
    }

    grouped
}

/// Sorted, distinct boroughs present in `events`.
pub fn unique_boroughs<'a, I>(events: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Event>,
{
    unique_values(events, Event::borough)
}

/// Sorted, distinct event types present in `events`.
pub fn unique_event_types<'a, I>(events: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Event>,
{
    unique_values(events, Event::event_type)
}

fn unique_values<'a, I>(events: I, field: fn(&Event) -> Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter_map(field)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The upcoming weekend: Saturday (today, if today is Saturday) and the
/// Sunday after it.
pub fn weekend_of(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let until_saturday = 6 - today.weekday().num_days_from_sunday() as i64;
    let saturday = today + Duration::days(until_saturday);
    (saturday, saturday + Duration::days(1))
}

/// Whether `event` starts on the upcoming weekend, ignoring time of day.
pub fn is_this_weekend(event: &Event, today: NaiveDate) -> bool {
    let (saturday, sunday) = weekend_of(today);
    event
        .start_day()
        .is_some_and(|day| day == saturday || day == sunday)
}

/// Client-side filters applied to the loaded events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilters {
    pub borough: Option<String>,
    pub event_type: Option<String>,
    pub this_weekend: bool,
}

impl EventFilters {
    pub fn matches(&self, event: &Event, today: NaiveDate) -> bool {
        self.borough
            .as_deref()
            .is_none_or(|b| event.event_borough.as_deref() == Some(b))
            && self
                .event_type
                .as_deref()
                .is_none_or(|t| event.event_type.as_deref() == Some(t))
            && (!self.this_weekend || is_this_weekend(event, today))
    }

    pub fn apply<'a>(&self, events: &'a [Event], today: NaiveDate) -> Vec<&'a Event> {
        events
            .iter()
            .filter(|event| self.matches(event, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, start: Option<&str>, borough: &str, event_type: &str) -> Event {
        Event {
            event_id: id.to_string(),
            event_name: format!("Event {}", id),
            start_date_time: start.map(str::to_string),
            event_borough: Some(borough.to_string()),
            event_type: Some(event_type.to_string()),
            ..Default::default()
        }
    }

    fn fixture() -> Vec<Event> {
        vec![
            event("1", Some("2024-03-02T10:00:00.000"), "Queens", "Music"),
            event("2", Some("2024-03-01T18:00:00.000"), "Brooklyn", "Art"),
            event("3", None, "Bronx", "Music"),
            event("4", Some("2024-03-02T09:00:00.000"), "Brooklyn", "Film"),
            event("5", Some(""), "", "Dance"),
        ]
    }

    #[test]
    fn test_group_by_date_keeps_first_seen_order() {
        let events = fixture();
        let grouped = group_by_date(&events);

        assert_eq!(grouped.len(), 2);
        let ids: Vec<&str> = grouped[&date(2024, 3, 2)]
            .iter()
            .map(|e| e.event_id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(grouped[&date(2024, 3, 1)].len(), 1);
    }

    #[test]
    fn test_group_by_date_is_idempotent() {
        let events = fixture();
        let grouped = group_by_date(&events);
        let regrouped = group_by_date(grouped.values().flatten().copied());

        assert_eq!(grouped, regrouped);
    }

    #[test]
    fn test_unique_values_sorted_and_distinct() {
        let events = fixture();

        let boroughs = unique_boroughs(&events);
        assert_eq!(boroughs, vec!["Bronx", "Brooklyn", "Queens"]);

        let types = unique_event_types(&events);
        assert_eq!(types, vec!["Art", "Dance", "Film", "Music"]);

        let doubled: Vec<Event> = events.iter().chain(events.iter()).cloned().collect();
        assert_eq!(unique_event_types(&doubled), types);
    }

    #[test]
    fn test_weekend_from_wednesday() {
        let wednesday = date(2024, 3, 6);
        let (saturday, sunday) = weekend_of(wednesday);

        assert_eq!(saturday, wednesday + Duration::days(3));
        assert_eq!(sunday, wednesday + Duration::days(4));

        let at_midnight = event("1", Some("2024-03-09T00:00:00.000"), "Queens", "Music");
        let monday = event("2", Some("2024-03-11T12:00:00.000"), "Queens", "Music");
        let sunday_night = event("3", Some("2024-03-10T23:59:00.000"), "Queens", "Music");
        assert!(is_this_weekend(&at_midnight, wednesday));
        assert!(is_this_weekend(&sunday_night, wednesday));
        assert!(!is_this_weekend(&monday, wednesday));
    }

    #[test]
    fn test_weekend_on_saturday_and_sunday() {
        let saturday = date(2024, 3, 9);
        assert_eq!(weekend_of(saturday), (saturday, date(2024, 3, 10)));

        // On Sunday the next weekend is six days away
        assert_eq!(weekend_of(date(2024, 3, 10)).0, date(2024, 3, 16));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let events = fixture();
        let today = date(2024, 2, 28);

        let filters = EventFilters {
            borough: Some("Brooklyn".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.apply(&events, today).len(), 2);

        let filters = EventFilters {
            borough: Some("Brooklyn".to_string()),
            this_weekend: true,
            ..Default::default()
        };
        let ids: Vec<&str> = filters
            .apply(&events, today)
            .iter()
            .map(|e| e.event_id.as_str())
            .collect();
        assert_eq!(ids, vec!["4"]);

        let filters = EventFilters {
            event_type: Some("Music".to_string()),
            this_weekend: true,
            ..Default::default()
        };
        assert_eq!(filters.apply(&events, today).len(), 1);
        assert_eq!(EventFilters::default().apply(&events, today).len(), events.len());
    }
}
