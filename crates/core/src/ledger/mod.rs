//! Ledger-entry input.
//!
//! This module implements the read side of the report pipelines:
//! - Ledger entries parsed from `date,account,description,debit,credit` rows
//! - A directory reader that hands entries out in bounded file batches
//! - Error types for ledger I/O

pub mod entry;
pub mod error;
pub mod reader;

pub use entry::LedgerEntry;
pub use error::LedgerError;
pub use reader::{DEFAULT_BATCH_SIZE, LedgerReader, ReadStats};
