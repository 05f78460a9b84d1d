use anyhow::Result;
use console::style;
use ghstats::cli::Cli;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.common.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let started = Instant::now();
    cli.execute()?;
    let elapsed = Duration::from_secs(started.elapsed().as_secs());
    eprintln!(
        "{} in {}",
        style("Done").green().bold(),
        humantime::format_duration(elapsed)
    );
    Ok(())
}
