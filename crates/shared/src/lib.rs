//! Shared errors, configuration, and money formatting for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Report amount formatting with decimal precision
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, JobsConfig, ReportsConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use types::money::format_amount;
