use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use nycevents_core::date_range::DateRange;
use nycevents_core::views::{EventFilters, group_by_date};
use nycevents_core::{EventQuery, EventSource};
use owo_colors::OwoColorize;

use super::{FilterArgs, fetch_with_retry};
use crate::render::{Render, pluralize};

#[derive(Args, Debug, Clone, Default)]
pub struct EventsArgs {
    /// Show events from this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Show events until this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

pub async fn run(source: &dyn EventSource, args: EventsArgs, today: NaiveDate) -> Result<()> {
    let range = DateRange::from_args(args.from.as_deref(), args.to.as_deref(), today)?;

    // Borough and type narrow the upstream query; the weekend check is local
    let query = EventQuery::new()
        .range(&range)
        .borough(args.filters.borough.as_deref())
        .event_type(args.filters.event_type.as_deref());
    let events = fetch_with_retry(source, &query).await?;

    let filters = EventFilters {
        this_weekend: args.filters.weekend,
        ..Default::default()
    };
    let visible = filters.apply(&events, today);

    if visible.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let by_date = group_by_date(visible.iter().copied());

    let mut first = true;
    for (date, day_events) in &by_date {
        if !first {
            println!();
        }
        first = false;

        println!("{}", format_date_label(*date, today).bold());
        for event in day_events {
            println!("{}", event.render());
        }
    }

    let undated = visible.iter().filter(|e| e.start_day().is_none()).count();
    if undated > 0 {
        let note = format!("{} {} without a start time not shown", undated, pluralize("event", undated));
        println!("\n{}", note.dimmed());
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
