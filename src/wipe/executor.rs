//! Bounded concurrent fan-out of wipe calls
//!
//! Calls are driven as a `buffer_unordered` stream, so at most `concurrency`
//! are in flight. Each call still waits on the shared tier limiter inside the
//! client. Outcomes come back through the stream and are folded into one
//! report; there is no shared mutable error list.

use super::report::{WipeOutcome, WipeReport};
use crate::api::SlackError;
use crate::ui::Progress;
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::future::Future;

/// Something that can be wiped, identified for error reporting
pub trait WipeItem {
    fn label(&self) -> String;
}

pub async fn run_concurrent<T, F, Fut>(
    items: Vec<T>,
    concurrency: usize,
    progress: &Progress,
    op: F,
) -> WipeReport
where
    T: WipeItem,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<WipeOutcome, SlackError>>,
{
    let concurrency = concurrency.max(1);
    debug!("Wiping {} items with concurrency {}", items.len(), concurrency);

    let mut results = stream::iter(items)
        .map(|item| {
            let label = item.label();
            let call = op(item);
            async move { (label, call.await) }
        })
        .buffer_unordered(concurrency);

    let mut report = WipeReport::default();
    while let Some((label, result)) = results.next().await {
        progress.inc();
        if let Err(error) = &result {
            warn!("Failed to wipe {}: {}", label, error);
        }
        report.record(label, result);
    }

    report
}
