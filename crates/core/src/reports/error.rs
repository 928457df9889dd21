//! Report error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Ledger input could not be read.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The rendered report could not be written.
    #[error("cannot write report {}: {source}", .path.display())]
    WriteOutput {
        /// Output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
