//! Exclusion rules for administrative and non-visitable listings.
//!
//! The upstream dataset mixes public events with permits, closures and
//! maintenance notices. Both lists match case-insensitively by substring.

use crate::event::Event;

/// Event types that never describe a visitable public event.
pub const EXCLUDED_EVENT_TYPES: &[&str] = &[
    "Sport - Youth",
    "Sport - Adult",
    "Theater Load in and Load Outs",
    "Miscellaneous",
    "Outdoor Learning",
    "RIPA Special Event",
    "Kids Sports After-School",
];

/// Name fragments of closures, notices and venue bookings.
pub const EXCLUDED_NAME_PATTERNS: &[&str] = &[
    "Lawn Closure",
    "Closure",
    "Picnic House",
    "Miscellaneous",
    "construction",
    "Maintenance",
    "aftercare",
    "No Amplified Sound",
    "Model Helicopter",
    "Model Aircraft",
    "Radio Control Model",
    "Helen Marshall Playground",
    "Dana Discovery Center Lawn",
    "East Green",
];

/// Whether an event should be hidden. A missing (null) event always is.
pub fn should_exclude(event: Option<&Event>) -> bool {
    let Some(event) = event else {
        return true;
    };

    if let Some(event_type) = event.event_type.as_deref() {
        if contains_any(event_type, EXCLUDED_EVENT_TYPES) {
            return true;
        }
    }

    contains_any(&event.event_name, EXCLUDED_NAME_PATTERNS)
}

/// Drop excluded events from a raw response, keeping relative order.
pub fn normalize(raw: Vec<Option<Event>>) -> Vec<Event> {
    raw.into_iter()
        .filter(|event| !should_exclude(event.as_ref()))
        .flatten()
        .collect()
}

fn contains_any(field: &str, patterns: &[&str]) -> bool {
    let field = field.to_lowercase();
    patterns
        .iter()
        .any(|pattern| field.contains(&pattern.to_lowercase()))
}
