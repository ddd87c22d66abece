//! # ff_calendar
//!
//! Scrapes an economic calendar, recovers complete per-event records from
//! its sparse table markup, normalizes zone-local display times into UTC
//! instants and groups events by day. It also fetches event detail JSON and
//! news articles, the latter in bounded, paced batches.
//!
//! ## Architecture
//!
//! 1. **Transport**: [`client::FetchText`] fetches text for a URL
//! 2. **Extraction**: [`scrapers::calendar`] walks calendar rows, carrying
//!    date and time forward, classifying impact ([`impact`]) and converting
//!    times ([`timezone`])
//! 3. **Grouping**: events are folded into ordered [`models::Day`] buckets
//! 4. **Details and news**: [`scrapers::detail`] reshapes detail JSON,
//!    [`scrapers::news`] fetches articles through [`batch`]
//! 5. **Output**: [`outputs`] writes JSON files and Markdown
//!
//! ## Example
//!
//! ```no_run
//! use ff_calendar::{Config, HttpFetcher, Scraper};
//!
//! # async fn run() -> ff_calendar::Result<()> {
//! let config = Config::default();
//! let scraper = Scraper::new(HttpFetcher::new(&config)?, &config.base_url)?;
//! let calendar = scraper.fetch_calendar(None, None).await?;
//! for day in &calendar.days {
//!     println!("{}: {} events", day.date, day.events.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod impact;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod timezone;
pub mod utils;

pub use client::{FetchText, FetchedText, HttpFetcher};
pub use config::Config;
pub use error::{CalendarError, Result};
pub use scrapers::Scraper;
