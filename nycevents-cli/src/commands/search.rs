use anyhow::{Context, Result};
use chrono::NaiveDate;
use nycevents_core::EventSource;
use nycevents_core::date_range::MonthWindow;
use nycevents_core::view_state::{Action, ViewState};
use owo_colors::OwoColorize;

use super::load_month;

/// Open a web search for an event loaded from the given month.
pub async fn run(
    source: &dyn EventSource,
    event_id: String,
    month: Option<String>,
    print_only: bool,
    today: NaiveDate,
) -> Result<()> {
    let mut state = ViewState::new(today);
    if let Some(month) = month {
        let window = MonthWindow::parse(&month)?;
        state.apply(Action::SetMonth(window.first_day()));
    }

    load_month(source, &mut state).await?;

    let Some(event) = state.events().iter().find(|e| e.event_id == event_id) else {
        anyhow::bail!(
            "Event '{}' not found in {}. Try --month YYYY-MM",
            event_id,
            state.window().title()
        );
    };

    let url = event.search_url()?;
    println!("{} {}", event.event_name.bold(), url.as_str().dimmed());

    if !print_only {
        open::that(url.as_str()).context("Failed to open browser")?;
    }

    Ok(())
}
