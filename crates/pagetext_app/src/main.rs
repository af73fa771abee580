mod cli;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use pagetext_engine::{load_overrides, Harvester, LogProgressSink};
use pagetext_logging::{pagetext_error, pagetext_info};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    pagetext_logging::initialize(cli.log.into(), cli.level(), &cli.log_file);

    match run(cli) {
        Ok(true) => {
            println!("Content saved");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("No content found on the page; nothing was saved");
            ExitCode::SUCCESS
        }
        Err(err) => {
            pagetext_error!("{err:#}");
            eprintln!("Errors occurred while processing the page: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether a file was written.
fn run(cli: Cli) -> anyhow::Result<bool> {
    // Config problems surface before anything is fetched.
    let overrides = load_overrides(&cli.config)?;

    let url = match cli.url.clone() {
        Some(url) => url,
        None => prompt_url()?,
    };
    pagetext_info!("Page to extract: {url}");

    let harvester = Harvester::new(cli.fetch_settings(), overrides, cli.output_dir.clone());
    let outcome = harvester
        .harvest_blocking(&url, &LogProgressSink)
        .with_context(|| format!("failed to extract {url}"))?;

    if let Some(path) = &outcome.saved_to {
        pagetext_info!("Saved to {}", path.display());
    }
    Ok(outcome.saved_to.is_some())
}

fn prompt_url() -> anyhow::Result<String> {
    print!("Enter the page to extract: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let url = line.trim();
    if url.is_empty() {
        bail!("no page address given");
    }
    Ok(url.to_string())
}
