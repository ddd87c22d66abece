//! Command-line interface definitions for ff_calendar.
//!
//! Global options can also come from environment variables; anything left
//! unset falls back to the configuration file, then to built-in defaults.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Command-line arguments for the ff_calendar application.
///
/// # Examples
///
/// ```sh
/// # This week's calendar as Markdown
/// ff_calendar calendar
///
/// # A fixed window, times shown in Tokyo, JSON copy written to ./json
/// ff_calendar -j ./json calendar --from 2025-01-05 --to 2025-01-11 --display-zone Asia/Tokyo
///
/// # Articles, three at a time with a one second pause
/// ff_calendar articles --batch-size 3 --batch-delay-ms 1000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Origin to scrape (overrides the config file)
    #[arg(long, env = "FF_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Also write results as JSON into this directory
    #[arg(short, long, env = "FF_JSON_OUTPUT_DIR", global = true)]
    pub json_output_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the timezone the calendar renders times in
    Timezone,

    /// Fetch a calendar window (defaults to the current Sunday–Saturday week)
    Calendar {
        /// First day of the window (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day of the window (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Zone to display times in (defaults to the server timezone)
        #[arg(long)]
        display_zone: Option<String>,
    },

    /// Fetch specs and release history for one event
    Detail {
        /// Event identifier as found in the calendar
        event_id: String,
    },

    /// Fetch the news listing and every linked article
    Articles {
        /// Article fetches in flight at once
        #[arg(long)]
        batch_size: Option<usize>,

        /// Pause between batches, in milliseconds
        #[arg(long)]
        batch_delay_ms: Option<u64>,
    },
}
