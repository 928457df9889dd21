//! Isolated execution of one report pipeline.

use std::any::Any;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinError;

use crate::reports::{PipelineParams, ReportError, ReportPipeline, ReportScope, RunSummary};

use super::error::JobError;

/// Runs exactly one report pipeline and reports a single terminal outcome.
#[async_trait]
pub trait ExecutionUnit: Send + Sync + 'static {
    /// Runs the pipeline for `scope` to completion or failure.
    async fn run(&self, scope: ReportScope, params: PipelineParams) -> Result<RunSummary, JobError>;
}

/// Pipeline entry point used by [`BlockingExecutionUnit`].
pub type PipelineFn = fn(ReportScope, &PipelineParams) -> Result<RunSummary, ReportError>;

/// Execution unit running the pipeline on Tokio's blocking thread pool.
///
/// A panic inside the pipeline is caught at the task boundary and reported as
/// [`JobError::Panicked`]; it never reaches the orchestrator. When a timeout is
/// set and exceeded the unit reports [`JobError::TimedOut`]. The blocking thread
/// cannot be interrupted, so a timed-out pipeline still runs to completion in
/// the background and its result is dropped.
#[derive(Debug, Clone)]
pub struct BlockingExecutionUnit {
    timeout: Option<Duration>,
    pipeline: PipelineFn,
}

impl BlockingExecutionUnit {
    /// Creates a unit without a timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: None,
            pipeline: ReportPipeline::run,
        }
    }

    /// Creates a unit from the configured limit in seconds. `0` disables the limit.
    #[must_use]
    pub fn from_timeout_secs(secs: u64) -> Self {
        Self::new().with_timeout((secs > 0).then(|| Duration::from_secs(secs)))
    }

    /// Sets the run limit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the pipeline entry point.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: PipelineFn) -> Self {
        self.pipeline = pipeline;
        self
    }
}

impl Default for BlockingExecutionUnit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutionUnit for BlockingExecutionUnit {
    async fn run(&self, scope: ReportScope, params: PipelineParams) -> Result<RunSummary, JobError> {
        let pipeline = self.pipeline;
        let task = tokio::task::spawn_blocking(move || pipeline(scope, &params));

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| JobError::TimedOut(limit))?,
            None => task.await,
        };

        joined.map_err(join_failure)?.map_err(JobError::from)
    }
}

fn join_failure(err: JoinError) -> JobError {
    if err.is_panic() {
        JobError::Panicked(panic_message(err.into_panic().as_ref()))
    } else {
        JobError::Cancelled
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
