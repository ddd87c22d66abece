//! Error taxonomy for the calendar pipeline.
//!
//! Only transport, schema and zone-resolution failures are errors. Bad
//! per-row data inside a calendar page never reaches this type: the
//! extractor absorbs it through the `0` timestamp sentinel or by skipping
//! the row.

use thiserror::Error;

/// Errors surfaced to callers of the scraping operations.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Transport-level failure (DNS, connection, timeout). Never retried.
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The origin answered, but not with a success status.
    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// The document did not parse, or parsed into an unexpected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The calendar markup carries no recognizable timezone declaration.
    #[error("server timezone could not be resolved from the calendar markup")]
    TimezoneUnresolved,

    #[error("batch size must be positive")]
    InvalidBatchSize,

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CalendarError {
    fn from(e: serde_json::Error) -> Self {
        CalendarError::MalformedResponse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
