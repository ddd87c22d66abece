//! Bounded, paced batch fetching.
//!
//! URLs are split into consecutive chunks of `batch_size`. Each chunk is
//! fetched concurrently and joined in full before the next one starts, with
//! a fixed pause between chunks. This is a fixed-window limiter: it does not
//! back off on errors and does not retry.
//!
//! ```text
//! [u0 u1 u2] --join-- sleep(D) --> [u3 u4 u5] --join-- sleep(D) --> [u6] --join--> done
//! ```

use crate::error::{CalendarError, Result};
use futures::future::try_join_all;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Fetch every URL with at most `batch_size` fetches in flight.
///
/// Results come back in input order: each chunk's results are placed by
/// position, not completion time. The first failing fetch fails the whole
/// call; results of the chunk it belongs to are discarded and later chunks
/// are never started.
///
/// # Errors
///
/// [`CalendarError::InvalidBatchSize`] when `batch_size` is zero, otherwise
/// whatever the first failing `fetch` returned.
#[instrument(level = "info", skip_all, fields(urls = urls.len(), batch_size = batch_size, delay_ms = delay.as_millis() as u64))]
pub async fn fetch_in_batches<T, F, Fut>(
    urls: &[String],
    batch_size: usize,
    delay: Duration,
    fetch: F,
) -> Result<Vec<T>>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if batch_size == 0 {
        return Err(CalendarError::InvalidBatchSize);
    }

    let chunk_count = urls.len().div_ceil(batch_size);
    let mut results = Vec::with_capacity(urls.len());

    for (index, chunk) in urls.chunks(batch_size).enumerate() {
        debug!(chunk = index, size = chunk.len(), "Dispatching batch");
        let batch = try_join_all(chunk.iter().cloned().map(&fetch)).await?;
        results.extend(batch);

        if index + 1 < chunk_count && !delay.is_zero() {
            debug!(chunk = index, "Pausing between batches");
            sleep(delay).await;
        }
    }

    info!(count = results.len(), chunks = chunk_count, "Batch fetch complete");
    Ok(results)
}
