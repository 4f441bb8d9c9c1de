mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nycevents_core::OpenDataClient;
use nycevents_core::settings::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::events::EventsArgs;
use crate::commands::month::MonthArgs;

#[derive(Parser)]
#[command(name = "nycevents")]
#[command(version, about = "Browse free public events in New York City")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month calendar and the events of one day
    Month(MonthArgs),

    /// List events in a date range, grouped by day
    Events(EventsArgs),

    /// List the boroughs and event types available in a month
    Filters {
        /// Month to inspect (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Open a web search for an event
    Search {
        event_id: String,

        /// Month the event is in (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Print the link instead of opening a browser
        #[arg(long)]
        print: bool,
    },

    /// Show config path and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr and stay quiet unless RUST_LOG asks for more
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::load()?;
    let today = chrono::Local::now().date_naive();

    let command = cli.command.unwrap_or(Commands::Month(MonthArgs::default()));
    if let Commands::Config = command {
        return commands::config::run(&settings);
    }

    let client = OpenDataClient::new(&settings)?;
    tracing::debug!(endpoint = client.endpoint(), "using open-data endpoint");

    match command {
        Commands::Month(args) => commands::month::run(&client, args, today).await,
        Commands::Events(args) => commands::events::run(&client, args, today).await,
        Commands::Filters { month } => commands::filters::run(&client, month, today).await,
        Commands::Search {
            event_id,
            month,
            print,
        } => commands::search::run(&client, event_id, month, print, today).await,
        Commands::Config => commands::config::run(&settings),
    }
}
