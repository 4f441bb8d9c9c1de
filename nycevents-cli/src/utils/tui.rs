use std::io::IsTerminal;

use anyhow::Result;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use crate::render::render_error;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Show the error panel and ask whether to retry.
/// Never retries when stdin is not a terminal.
pub fn prompt_retry(message: &str) -> Result<bool> {
    eprintln!("{}", render_error(message));

    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }

    eprintln!();
    let retry = Confirm::new()
        .with_prompt("Try again?")
        .default(true)
        .interact()?;

    Ok(retry)
}
