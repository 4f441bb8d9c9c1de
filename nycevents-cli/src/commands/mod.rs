pub mod config;
pub mod events;
pub mod filters;
pub mod month;
pub mod search;

use anyhow::Result;
use nycevents_core::view_state::{Action, ViewState};
use nycevents_core::{Event, EventQuery, EventSource};

use crate::utils::tui::{create_spinner, prompt_retry};

/// Load the state's month, offering a retry after each failure.
pub async fn load_month(source: &dyn EventSource, state: &mut ViewState) -> Result<()> {
    loop {
        let ticket = state.begin_load();
        let spinner = create_spinner(format!("Loading events for {}", state.window().title()));
        let result = source.fetch_events(&state.query()).await;
        spinner.finish_and_clear();

        let action = match result {
            Ok(events) => Action::EventsLoaded { ticket, events },
            Err(e) => Action::LoadFailed {
                ticket,
                message: e.to_string(),
            },
        };
        state.apply(action);

        let Some(message) = state.error().map(str::to_string) else {
            return Ok(());
        };
        if !prompt_retry(&message)? {
            anyhow::bail!(message);
        }
    }
}

/// Run a one-off query, offering a retry after each failure.
pub async fn fetch_with_retry(source: &dyn EventSource, query: &EventQuery) -> Result<Vec<Event>> {
    loop {
        let spinner = create_spinner("Loading events".to_string());
        let result = source.fetch_events(query).await;
        spinner.finish_and_clear();

        match result {
            Ok(events) => return Ok(events),
            Err(e) => {
                let message = e.to_string();
                if !prompt_retry(&message)? {
                    anyhow::bail!(message);
                }
            }
        }
    }
}

/// Filter flags shared by the listing commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only events in this borough (e.g. "Brooklyn")
    #[arg(short, long)]
    pub borough: Option<String>,

    /// Only events of this type (e.g. "Music")
    #[arg(short = 't', long = "type")]
    pub event_type: Option<String>,

    /// Only events on the upcoming Saturday or Sunday
    #[arg(short, long)]
    pub weekend: bool,
}

/// Parse a YYYY-MM-DD argument.
pub fn parse_day(s: &str) -> Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}

/// Warn when a filter value is not among the loaded options.
pub fn check_option(kind: &str, value: Option<&str>, available: &[String]) {
    use owo_colors::OwoColorize;

    if let Some(value) = value {
        if !available.is_empty() && !available.iter().any(|a| a == value) {
            eprintln!(
                "{}",
                format!("No {} '{}' in this month. Available: {}", kind, value, available.join(", ")).yellow()
            );
        }
    }
}
