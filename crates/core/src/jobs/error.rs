//! Job error types.

use std::time::Duration;

use thiserror::Error;

use crate::reports::ReportError;

/// Terminal failure of an execution unit.
///
/// The orchestrator records the display form of this error as the scope's
/// error status.
#[derive(Debug, Error)]
pub enum JobError {
    /// The pipeline returned an error.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The pipeline panicked.
    #[error("execution unit panicked: {0}")]
    Panicked(String),

    /// The pipeline did not finish within the configured limit.
    #[error("execution unit timed out after {0:?}")]
    TimedOut(Duration),

    /// The unit's task was cancelled before it reported back.
    #[error("execution unit was cancelled")]
    Cancelled,
}
