use crate::core::Config;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("path", _)) => path(),
        Some(("set-interval", sub_matches)) => set_interval(sub_matches),
        _ => {
            println!("Use 'hostmon config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn path() -> Result<()> {
    let path = Config::get_config_path()?;
    println!("{}", path.display().to_string().cyan());
    Ok(())
}

fn set_interval(matches: &clap::ArgMatches) -> Result<()> {
    let interval = matches
        .get_one::<u64>("ms")
        .copied()
        .context("Interval argument is required")?;

    let mut config = Config::load()?;
    config.set_sample_interval_ms(interval);
    config.save()?;

    if config.sample_interval_ms != interval {
        println!(
            "{}",
            format!(
                "⚠️  {}ms is below the minimum, using {}ms",
                interval, config.sample_interval_ms
            )
            .yellow()
        );
    }
    println!(
        "{} {}ms",
        "✓ Sample interval set to:".green(),
        config.sample_interval_ms
    );

    Ok(())
}
