use anyhow::Result;
use nycevents_core::settings::Settings;
use owo_colors::OwoColorize;

pub fn run(settings: &Settings) -> Result<()> {
    let config_path = Settings::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());

    println!("\n{}", "Settings".bold());
    for line in settings.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
