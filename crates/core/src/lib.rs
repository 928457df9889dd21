//! Core report logic for Tally.
//!
//! This crate contains the report pipelines and their orchestration, with ZERO
//! web dependencies.
//!
//! # Modules
//!
//! - `ledger` - Ledger-entry parsing and batched directory reading
//! - `reports` - Chart of accounts, aggregators, renderers and the report pipeline
//! - `jobs` - Per-scope job state, isolated execution units and the orchestrator

pub mod jobs;
pub mod ledger;
pub mod reports;
