//! JSON output for downstream consumers.

use crate::error::Result;
use crate::utils::ensure_writable_dir;
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `value` to `{json_output_dir}/{name}.json`.
///
/// The directory is created and probed for writability first.
///
/// # Returns
///
/// The path written.
#[instrument(level = "info", skip_all, fields(%json_output_dir, %name))]
pub async fn write_json<T: Serialize>(value: &T, json_output_dir: &str, name: &str) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(value)?;

    if let Err(e) = ensure_writable_dir(json_output_dir).await {
        error!(error = %e, "JSON output directory is not writable");
        return Err(e.into());
    }

    let path = PathBuf::from(json_output_dir).join(format!("{name}.json"));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON file");
    Ok(path)
}
