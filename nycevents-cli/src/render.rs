//! TUI rendering for events and the month calendar.
//!
//! This module adds colored terminal rendering to nycevents-core types
//! using owo_colors.

use chrono::{Datelike, NaiveDate};
use nycevents_core::Event;
use nycevents_core::style::{Tone, borough_tone, event_type_tone};
use nycevents_core::view_state::ViewState;
use owo_colors::{AnsiColors, OwoColorize};

const DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Event markers shown per day before switching to "+"
const MAX_DOTS: usize = 3;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

pub fn tone_color(tone: Tone) -> AnsiColors {
    match tone {
        Tone::Purple => AnsiColors::Magenta,
        Tone::Pink => AnsiColors::BrightMagenta,
        Tone::Rose => AnsiColors::BrightRed,
        Tone::Amber => AnsiColors::Yellow,
        Tone::Orange => AnsiColors::Red,
        Tone::Indigo => AnsiColors::Blue,
        Tone::Emerald => AnsiColors::Green,
        Tone::Cyan => AnsiColors::Cyan,
        Tone::Yellow => AnsiColors::BrightYellow,
        Tone::Slate => AnsiColors::BrightBlack,
    }
}

impl Render for Event {
    /// A card: time and name on the first line, then location and borough.
    fn render(&self) -> String {
        let start = self
            .start()
            .map(|dt| dt.format("%-I:%M %p").to_string())
            .unwrap_or_else(|| "TBD".to_string());
        let time = match self.end() {
            Some(end) => format!("{} - {}", start, end.format("%-I:%M %p")),
            None => start,
        };

        let time = format!("{:<19}", time);
        let mut first = format!("  {} {}", time.dimmed(), self.event_name.bold());
        if let Some(event_type) = self.event_type() {
            let badge = format!("[{}]", event_type);
            first.push_str(&format!(" {}", badge.color(tone_color(event_type_tone(event_type)))));
        }

        let mut lines = vec![first];
        let indent = " ".repeat(22);
        if let Some(location) = self.location() {
            lines.push(format!("{}{}", indent, location.dimmed()));
        }
        if let Some(borough) = self.borough() {
            lines.push(format!(
                "{}{} {}",
                indent,
                "●".color(tone_color(borough_tone(borough))),
                borough.dimmed()
            ));
        }

        lines.join("\n")
    }
}

/// Render the month grid with per-day event markers.
pub fn render_month(state: &ViewState, today: NaiveDate) -> String {
    let window = state.window();
    let by_date = state.events_by_date(today);

    let mut lines = vec![format!("{:^42}", window.title()).bold().to_string()];
    lines.push(
        DAYS.iter()
            .map(|d| format!("{:>3}   ", d))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for week in window.weeks() {
        let mut line = String::new();
        for day in week {
            let count = by_date.get(&day).map(Vec::len).unwrap_or(0);
            line.push_str(&render_day(
                day,
                count,
                window.contains(day),
                state.selected_date() == Some(day),
                day == today,
            ));
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn render_day(day: NaiveDate, count: usize, in_month: bool, selected: bool, is_today: bool) -> String {
    let number = format!("{:>3}", day.day());
    let number = if selected {
        number.reversed().to_string()
    } else if is_today {
        number.bold().underline().to_string()
    } else if in_month {
        number
    } else {
        number.dimmed().to_string()
    };

    let marker = match count {
        0 => String::new(),
        n if n <= MAX_DOTS => "•".repeat(n),
        _ => format!("{}+", "•".repeat(MAX_DOTS - 1)),
    };
    let marker = format!("{:<3}", marker);

    format!("{}{}", number, marker.blue())
}

/// Render the detail list for the selected day (or all visible events).
pub fn render_event_list(selected_date: Option<NaiveDate>, events: &[&Event]) -> String {
    if events.is_empty() {
        let hint = match selected_date {
            Some(date) => format!("No events scheduled for {}.", long_date(date)),
            None => "Select a date to view events.".to_string(),
        };
        return format!("{}\n{}", "No events found".bold(), hint.dimmed());
    }

    let title = match selected_date {
        Some(date) => long_date(date),
        None => format!("{} {}", events.len(), pluralize("Event", events.len())),
    };
    let found = format!("{} {} found", events.len(), pluralize("event", events.len()));

    let mut lines = vec![title.bold().to_string(), found.dimmed().to_string(), String::new()];
    for event in events {
        lines.push(event.render());
    }

    lines.join("\n")
}

/// Error panel shown in place of content when loading fails.
pub fn render_error(message: &str) -> String {
    format!("{} {}\n  {}", "✗".red(), "Error loading events".red().bold(), message.red())
}

pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 { word.to_string() } else { format!("{}s", word) }
}
