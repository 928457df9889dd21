//! Financial report generation.
//!
//! This module turns a directory of ledger-entry files into one of three reports:
//! - Accounts (balance per account, first-seen order)
//! - Yearly (cash balance per calendar year)
//! - Financial statement (income statement and balance sheet over a fixed chart of accounts)

pub mod aggregate;
pub mod chart;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod scope;
pub mod service;
pub mod types;


pub use aggregate::{AccountsAggregator, Aggregator, StatementAggregator, YearlyCashAggregator};
pub use chart::{CASH_ACCOUNT, Category, ChartOfAccounts, NormalBalance, StatementKind};
pub use error::ReportError;
pub use pipeline::{PipelineParams, ReportPipeline, RunSummary};
pub use render::RenderLines;
pub use scope::{ReportScope, UnsupportedScope};
pub use service::ReportService;
pub use types::*;
