use crate::api::SlackError;
use std::fmt;

/// Result of one wipe call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeOutcome {
    Done,
    /// Nothing to do for this item (e.g. already redacted)
    Skipped,
}

#[derive(Debug)]
pub struct WipeFailure {
    /// Message `ts` or file ID
    pub item: String,
    pub error: SlackError,
}

impl fmt::Display for WipeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item, self.error)
    }
}

/// Aggregated outcome of a wipe run
#[derive(Debug, Default)]
pub struct WipeReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failures: Vec<WipeFailure>,
}

impl WipeReport {
    pub fn record(&mut self, item: String, result: Result<WipeOutcome, SlackError>) {
        self.attempted += 1;
        match result {
            Ok(WipeOutcome::Done) => self.succeeded += 1,
            Ok(WipeOutcome::Skipped) => self.skipped += 1,
            Err(error) => self.failures.push(WipeFailure { item, error }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn rate_limited_count(&self) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.error.is_rate_limited())
            .count()
    }

    /// `"<N> errors (e.g. <first error>)"`, or `None` when nothing failed
    pub fn error_summary(&self) -> Option<String> {
        let first = self.failures.first()?;
        Some(format!("{} errors (e.g. {})", self.failures.len(), first.error))
    }

    /// Turn recorded failures into an error
    pub fn into_result(self) -> anyhow::Result<Self> {
        match self.error_summary() {
            Some(summary) => Err(anyhow::anyhow!(summary)),
            None => Ok(self),
        }
    }
}
