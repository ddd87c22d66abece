//! # ff_calendar
//!
//! Command-line front end: fetches the economic calendar, event details or
//! news articles and prints them, optionally writing JSON copies.
//!
//! ## Usage
//!
//! ```sh
//! ff_calendar calendar
//! ff_calendar -j ./json detail 131001
//! ```

use clap::Parser;
use ff_calendar::outputs::{json, markdown};
use ff_calendar::{Config, HttpFetcher, Scraper};
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{Cli, Command};

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(mut config: Config, args: &Cli) -> Config {
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Command::Articles {
        batch_size,
        batch_delay_ms,
    } = &args.command
    {
        if let Some(size) = batch_size {
            config.batch_size = *size;
        }
        if let Some(delay) = batch_delay_ms {
            config.batch_delay_ms = *delay;
        }
    }
    config
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ff_calendar starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = ff_calendar::config::load_config(args.config.as_deref()).await?;
    let config = apply_overrides(config, &args);
    let scraper = Scraper::new(HttpFetcher::new(&config)?, &config.base_url)?;

    match &args.command {
        Command::Timezone => {
            let zone = scraper.server_timezone().await?;
            println!("{zone}");
        }
        Command::Calendar {
            from,
            to,
            display_zone,
        } => {
            let result = match scraper.fetch_calendar(*from, *to).await {
                Ok(result) => result,
                Err(e) => {
                    error!(error = %e, "Calendar fetch failed");
                    return Err(e.into());
                }
            };
            let zone = display_zone.as_deref().unwrap_or(&result.server_timezone);
            print!("{}", markdown::calendar_to_markdown(&result, zone));

            if let Some(dir) = &args.json_output_dir {
                let (start, end) = ff_calendar::scrapers::calendar::resolve_window(*from, *to);
                json::write_json(&result, dir, &format!("calendar_{start}_{end}")).await?;
            }
            info!(days = result.days.len(), events = result.event_count(), "Calendar done");
        }
        Command::Detail { event_id } => {
            let detail = scraper.fetch_event_detail(event_id).await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);

            if let Some(dir) = &args.json_output_dir {
                json::write_json(&detail, dir, &format!("detail_{event_id}")).await?;
            }
        }
        Command::Articles { .. } => {
            let articles = scraper
                .fetch_articles(config.batch_size, config.batch_delay_ms)
                .await?;
            for article in &articles {
                println!("# {}\n<{}>\n\n{}\n", article.title, article.url, article.content);
            }

            if let Some(dir) = &args.json_output_dir {
                json::write_json(&articles, dir, "articles").await?;
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
