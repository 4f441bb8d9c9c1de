use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use nycevents_core::EventSource;
use nycevents_core::date_range::MonthWindow;
use nycevents_core::view_state::{Action, ViewState};

use super::{FilterArgs, check_option, load_month, parse_day};
use crate::render::{render_event_list, render_month};

#[derive(Args, Debug, Clone, Default)]
pub struct MonthArgs {
    /// Month to show (YYYY-MM), defaults to the current month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Day to list events for (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// List every event in the month instead of a single day
    #[arg(long, conflicts_with = "date")]
    pub all: bool,

    #[command(flatten)]
    pub filters: FilterArgs,
}

pub async fn run(source: &dyn EventSource, args: MonthArgs, today: NaiveDate) -> Result<()> {
    let mut state = ViewState::new(today);
    for action in actions(&args, today)? {
        state.apply(action);
    }

    load_month(source, &mut state).await?;

    check_option("borough", args.filters.borough.as_deref(), &state.boroughs());
    check_option("event type", args.filters.event_type.as_deref(), &state.event_types());

    println!("{}", render_month(&state, today));
    println!();
    println!(
        "{}",
        render_event_list(state.selected_date(), &state.selected_events(today))
    );

    Ok(())
}

/// Translate command-line flags into view actions, in the order a user
/// would perform them.
fn actions(args: &MonthArgs, today: NaiveDate) -> Result<Vec<Action>> {
    let mut actions = Vec::new();

    let date = args.date.as_deref().map(parse_day).transpose()?;

    if let Some(month) = &args.month {
        let window = MonthWindow::parse(month)?;
        actions.push(Action::SetMonth(window.first_day()));
        let selected = date.unwrap_or(if window.contains(today) {
            today
        } else {
            window.first_day()
        });
        actions.push(Action::SelectDate(Some(selected)));
    } else if let Some(date) = date {
        actions.push(Action::SetMonth(date));
        actions.push(Action::SelectDate(Some(date)));
    }

    if args.all {
        actions.push(Action::SelectDate(None));
    }

    actions.push(Action::SetBorough(args.filters.borough.clone()));
    actions.push(Action::SetEventType(args.filters.event_type.clone()));

    if args.filters.weekend {
        actions.push(Action::ToggleWeekend { today });
    }

    Ok(actions)
}
