//! Per-scope job state.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tally_shared::format_amount;
use uuid::Uuid;

use crate::reports::ReportScope;

/// Lifecycle status of one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JobStatus {
    /// Nothing has been started since the process came up.
    #[default]
    Idle,
    /// A run was accepted and has not reported back.
    Starting,
    /// The latest run wrote its report.
    Finished,
    /// The latest run failed with this message.
    Error(String),
}

/// Timing of the latest run of a scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetrics {
    /// When the run was accepted.
    pub start_time: Option<DateTime<Utc>>,
    /// When the run finished. Unset while starting or after an error.
    pub end_time: Option<DateTime<Utc>>,
    /// `end_time - start_time` in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
}

/// Status, timing and identity of the latest run of a scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobState {
    /// Lifecycle status.
    pub status: JobStatus,
    /// Timing.
    pub metrics: JobMetrics,
    /// Identifier of the run the status belongs to.
    pub run_id: Option<Uuid>,
}

impl JobState {
    /// Human-readable status: `idle`, `starting`, `finished in 1.23s` or `error: <message>`.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.status {
            JobStatus::Idle => "idle".to_string(),
            JobStatus::Starting => "starting".to_string(),
            JobStatus::Finished => {
                let millis = i64::try_from(self.metrics.duration_ms).unwrap_or(i64::MAX);
                format!("finished in {}s", format_amount(Decimal::new(millis, 3)))
            }
            JobStatus::Error(message) => format!("error: {message}"),
        }
    }
}

/// Handle for one accepted run, returned by [`JobStateStore::begin`].
#[derive(Debug, Clone)]
pub struct RunTicket {
    /// Scope the run belongs to.
    pub scope: ReportScope,
    /// Unique run identifier (UUID v7, time-ordered).
    pub run_id: Uuid,
    start_time: DateTime<Utc>,
    started_at: Instant,
}

/// State store holding one independently locked [`JobState`] per scope.
///
/// Only the latest run of a scope may settle it: a terminal update carrying a
/// ticket from an earlier run is discarded.
#[derive(Debug, Default)]
pub struct JobStateStore {
    slots: [Mutex<JobState>; 3],
}

impl JobStateStore {
    /// Creates a store with every scope idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `scope` to `Starting`, replacing any previous metrics.
    pub fn begin(&self, scope: ReportScope) -> RunTicket {
        let ticket = RunTicket {
            scope,
            run_id: Uuid::now_v7(),
            start_time: Utc::now(),
            started_at: Instant::now(),
        };

        *self.slot(scope) = JobState {
            status: JobStatus::Starting,
            metrics: JobMetrics {
                start_time: Some(ticket.start_time),
                end_time: None,
                duration_ms: 0,
            },
            run_id: Some(ticket.run_id),
        };
        ticket
    }

    /// Moves the ticket's scope to `Finished` and records end time and duration.
    ///
    /// Returns `false` without changes if a newer run has started since.
    pub fn finish(&self, ticket: &RunTicket) -> bool {
        let elapsed = TimeDelta::from_std(ticket.started_at.elapsed()).unwrap_or_default();

        let mut state = self.slot(ticket.scope);
        if state.run_id != Some(ticket.run_id) {
            return false;
        }
        state.status = JobStatus::Finished;
        state.metrics.end_time = Some(
            ticket
                .start_time
                .checked_add_signed(elapsed)
                .unwrap_or(ticket.start_time),
        );
        state.metrics.duration_ms = u64::try_from(elapsed.num_milliseconds()).unwrap_or_default();
        true
    }

    /// Moves the ticket's scope to `Error(message)`.
    ///
    /// Returns `false` without changes if a newer run has started since.
    pub fn fail(&self, ticket: &RunTicket, message: impl Into<String>) -> bool {
        let mut state = self.slot(ticket.scope);
        if state.run_id != Some(ticket.run_id) {
            return false;
        }
        state.status = JobStatus::Error(message.into());
        true
    }

    /// Returns a copy of the scope's current state.
    #[must_use]
    pub fn snapshot(&self, scope: ReportScope) -> JobState {
        self.slot(scope).clone()
    }

    fn slot(&self, scope: ReportScope) -> MutexGuard<'_, JobState> {
        self.slots[scope.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_start_idle() {
        let store = JobStateStore::new();
        for scope in ReportScope::ALL {
            let state = store.snapshot(scope);
            assert_eq!(state, JobState::default());
            assert_eq!(state.describe(), "idle");
        }
    }

    #[test]
    fn test_begin_then_finish() {
        let store = JobStateStore::new();
        let ticket = store.begin(ReportScope::Yearly);

        let starting = store.snapshot(ReportScope::Yearly);
        assert_eq!(starting.status, JobStatus::Starting);
        assert_eq!(starting.describe(), "starting");
        assert!(starting.metrics.start_time.is_some());
        assert!(starting.metrics.end_time.is_none());
        assert_eq!(starting.run_id, Some(ticket.run_id));

        assert!(store.finish(&ticket));
        let finished = store.snapshot(ReportScope::Yearly);
        assert_eq!(finished.status, JobStatus::Finished);
        let start = finished.metrics.start_time.unwrap();
        let end = finished.metrics.end_time.unwrap();
        assert!(end >= start);
        assert_eq!(
            u64::try_from((end - start).num_milliseconds()).unwrap(),
            finished.metrics.duration_ms
        );
        assert!(finished.describe().starts_with("finished in "));

        // Other scopes are untouched.
        assert_eq!(store.snapshot(ReportScope::Fs).status, JobStatus::Idle);
    }

    #[test]
    fn test_fail_keeps_message() {
        let store = JobStateStore::new();
        let ticket = store.begin(ReportScope::Fs);

        assert!(store.fail(&ticket, "cannot list ledger directory tmp"));
        let state = store.snapshot(ReportScope::Fs);
        assert_eq!(
            state.status,
            JobStatus::Error("cannot list ledger directory tmp".to_string())
        );
        assert_eq!(state.describe(), "error: cannot list ledger directory tmp");
        assert!(state.metrics.end_time.is_none());
    }

    #[test]
    fn test_superseded_ticket_is_discarded() {
        let store = JobStateStore::new();
        let first = store.begin(ReportScope::Accounts);
        let second = store.begin(ReportScope::Accounts);

        assert!(!store.fail(&first, "late failure"));
        assert_eq!(store.snapshot(ReportScope::Accounts).status, JobStatus::Starting);

        assert!(store.finish(&second));
        assert!(!store.finish(&first));
        let state = store.snapshot(ReportScope::Accounts);
        assert_eq!(state.status, JobStatus::Finished);
        assert_eq!(state.run_id, Some(second.run_id));
    }

    #[test]
    fn test_restart_overwrites_previous_metrics() {
        let store = JobStateStore::new();
        let first = store.begin(ReportScope::Accounts);
        store.finish(&first);

        let second = store.begin(ReportScope::Accounts);
        let state = store.snapshot(ReportScope::Accounts);
        assert_eq!(state.status, JobStatus::Starting);
        assert!(state.metrics.end_time.is_none());
        assert_eq!(state.metrics.duration_ms, 0);
        assert_eq!(state.run_id, Some(second.run_id));
    }

    #[test]
    fn test_describe_finished_seconds() {
        let state = JobState {
            status: JobStatus::Finished,
            metrics: JobMetrics {
                duration_ms: 1234,
                ..JobMetrics::default()
            },
            run_id: None,
        };
        assert_eq!(state.describe(), "finished in 1.23s");
    }

    #[test]
    fn test_metrics_serialize_with_wire_names() {
        let json = serde_json::to_value(JobMetrics::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "startTime": null, "endTime": null, "duration": 0 })
        );
    }
}
