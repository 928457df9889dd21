//! Ledger error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading ledger files.
///
/// Both variants are fatal to the run that hit them; there is no per-file retry.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The input directory could not be listed.
    #[error("cannot list ledger directory {}: {source}", .path.display())]
    ListDirectory {
        /// Directory that was being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A ledger file could not be read.
    #[error("cannot read ledger file {}: {source}", .path.display())]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
