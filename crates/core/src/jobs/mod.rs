//! Background report jobs.
//!
//! One independent state machine per report scope
//! (`Idle → Starting → Finished | Error`), an isolated execution unit that runs
//! a single report pipeline, and the orchestrator tying them together.

pub mod error;
pub mod orchestrator;
pub mod state;
pub mod unit;

pub use error::JobError;
pub use orchestrator::{JobOrchestrator, StartAck, StatusReport};
pub use state::{JobMetrics, JobState, JobStateStore, JobStatus, RunTicket};
pub use unit::{BlockingExecutionUnit, ExecutionUnit};
