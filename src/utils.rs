//! Utility functions for calendar windows, log formatting and output directories.

use chrono::{Datelike, Days, NaiveDate};
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// The Sunday–Saturday week containing `today`.
pub fn current_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let since_sunday = u64::from(today.weekday().num_days_from_sunday());
    let start = today.checked_sub_days(Days::new(since_sunday)).unwrap_or(today);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
    (start, end)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes (backed off to a character boundary)
/// with `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> std::io::Result<()> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
