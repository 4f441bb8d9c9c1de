use anyhow::Result;
use chrono::NaiveDate;
use nycevents_core::EventSource;
use nycevents_core::date_range::MonthWindow;
use nycevents_core::style::{borough_tone, event_type_tone};
use nycevents_core::view_state::{Action, ViewState};
use owo_colors::OwoColorize;

use super::load_month;
use crate::render::tone_color;

/// List the boroughs and event types present in a month.
pub async fn run(source: &dyn EventSource, month: Option<String>, today: NaiveDate) -> Result<()> {
    let mut state = ViewState::new(today);
    if let Some(month) = month {
        let window = MonthWindow::parse(&month)?;
        state.apply(Action::SetMonth(window.first_day()));
    }

    load_month(source, &mut state).await?;

    println!("{}", state.window().title().bold());

    println!("\n{}", "Boroughs".bold());
    for borough in state.boroughs() {
        println!("  {} {}", "●".color(tone_color(borough_tone(&borough))), borough);
    }

    println!("\n{}", "Event types".bold());
    for event_type in state.event_types() {
        println!("  {} {}", "●".color(tone_color(event_type_tone(&event_type))), event_type);
    }

    Ok(())
}
