//! Job orchestrator: starts report runs and answers status queries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tally_shared::ReportsConfig;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::reports::{PipelineParams, ReportScope};

use super::state::{JobMetrics, JobStateStore};
use super::unit::{BlockingExecutionUnit, ExecutionUnit};

/// Acknowledgement returned as soon as a run is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartAck {
    /// Always `processing started`.
    pub status: &'static str,
    /// Scope that was started.
    pub scope: ReportScope,
}

/// Answer to a status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Human-readable status (`idle`, `starting`, `finished in 0.42s`, `error: ...`).
    pub status: String,
    /// Timing of the latest run.
    pub metrics: JobMetrics,
}

/// Dispatches one execution unit per start request and tracks each scope's state.
///
/// Starting a scope that is already running dispatches a second unit; only the
/// latest run may settle the scope's state.
pub struct JobOrchestrator<U: ExecutionUnit = BlockingExecutionUnit> {
    store: Arc<JobStateStore>,
    unit: Arc<U>,
    reports: ReportsConfig,
    inflight: Mutex<HashMap<ReportScope, JoinHandle<()>>>,
}

impl<U: ExecutionUnit> JobOrchestrator<U> {
    /// Creates an orchestrator writing reports under `reports`.
    pub fn new(store: Arc<JobStateStore>, unit: U, reports: ReportsConfig) -> Self {
        Self {
            store,
            unit: Arc::new(unit),
            reports,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// State store shared with this orchestrator.
    #[must_use]
    pub fn store(&self) -> &Arc<JobStateStore> {
        &self.store
    }

    /// Moves `scope` to `Starting` and dispatches its execution unit.
    ///
    /// Returns without waiting for the unit. Must be called within a Tokio runtime.
    pub fn start(&self, scope: ReportScope) -> StartAck {
        // Held until the handle is recorded, so the recorded handle always
        // belongs to the scope's current run.
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);

        let ticket = self.store.begin(scope);
        let params = PipelineParams::for_scope(&self.reports, scope);
        let store = Arc::clone(&self.store);
        let unit = Arc::clone(&self.unit);

        info!(%scope, run_id = %ticket.run_id, "report run started");

        let handle = tokio::spawn(async move {
            match unit.run(scope, params).await {
                Ok(summary) => {
                    if store.finish(&ticket) {
                        let duration_ms = store.snapshot(scope).metrics.duration_ms;
                        info!(
                            %scope,
                            run_id = %ticket.run_id,
                            files = summary.files,
                            entries = summary.entries,
                            duration_ms,
                            "report run finished"
                        );
                    } else {
                        info!(%scope, run_id = %ticket.run_id, "superseded run finished, result discarded");
                    }
                }
                Err(err) => {
                    let message = err.to_string();
                    if store.fail(&ticket, message.as_str()) {
                        error!(%scope, run_id = %ticket.run_id, error = %message, "report run failed");
                    } else {
                        info!(
                            %scope,
                            run_id = %ticket.run_id,
                            error = %message,
                            "superseded run failed, result discarded"
                        );
                    }
                }
            }
        });

        let previous = inflight.insert(scope, handle);
        drop(inflight);
        if previous.is_some_and(|h| !h.is_finished()) {
            warn!(%scope, "scope restarted while a previous run is still in flight");
        }

        StartAck {
            status: "processing started",
            scope,
        }
    }

    /// Current status of `scope`. Never waits for a running unit.
    #[must_use]
    pub fn status(&self, scope: ReportScope) -> StatusReport {
        let state = self.store.snapshot(scope);
        StatusReport {
            status: state.describe(),
            metrics: state.metrics,
        }
    }

    /// Waits for the latest dispatched run of `scope`, if any, to settle.
    pub async fn wait_idle(&self, scope: ReportScope) {
        let handle = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&scope);
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!(%scope, error = %err, "completion task did not run to the end");
            }
        }
    }
}

impl JobOrchestrator<BlockingExecutionUnit> {
    /// Orchestrator backed by the blocking execution unit and the given settings.
    #[must_use]
    pub fn from_config(reports: ReportsConfig, unit_timeout_secs: u64) -> Self {
        Self::new(
            Arc::new(JobStateStore::new()),
            BlockingExecutionUnit::from_timeout_secs(unit_timeout_secs),
            reports,
        )
    }
}
