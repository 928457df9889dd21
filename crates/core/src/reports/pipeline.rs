//! Reader → aggregator → renderer → file pipeline for one report run.

use std::fs;
use std::path::{Path, PathBuf};

use tally_shared::ReportsConfig;
use tracing::{debug, warn};

use crate::ledger::{DEFAULT_BATCH_SIZE, LedgerError, LedgerReader, ReadStats};

use super::aggregate::{AccountsAggregator, Aggregator, StatementAggregator, YearlyCashAggregator};
use super::chart::ChartOfAccounts;
use super::error::ReportError;
use super::render::RenderLines;
use super::scope::ReportScope;
use super::service::ReportService;
use super::types::BalanceCheck;

/// Inputs of one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineParams {
    /// Directory holding the ledger files.
    pub input_dir: PathBuf,
    /// File the report is written to, replacing any previous content.
    pub output_file: PathBuf,
    /// Files read per batch.
    pub batch_size: usize,
    /// Ledger file extension, without the dot.
    pub extension: String,
}

impl PipelineParams {
    /// Creates parameters with the default batch size and `csv` extension.
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_file: output_file.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            extension: "csv".to_string(),
        }
    }

    /// Parameters for `scope` under the configured input and output directories.
    #[must_use]
    pub fn for_scope(config: &ReportsConfig, scope: ReportScope) -> Self {
        Self {
            input_dir: config.input_dir.clone(),
            output_file: config.output_dir.join(scope.default_output_file()),
            batch_size: config.batch_size,
            extension: config.extension.clone(),
        }
    }

    fn reader(&self) -> LedgerReader {
        let reader = LedgerReader::new(&self.input_dir)
            .with_batch_size(self.batch_size)
            .with_extension(self.extension.as_str());
        match self.output_file.file_name() {
            Some(name) => reader.excluding(name),
            None => reader,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Scope that ran.
    pub scope: ReportScope,
    /// Ledger files read.
    pub files: usize,
    /// Ledger entries read.
    pub entries: usize,
    /// Size of the written report.
    pub bytes_written: usize,
    /// Accounting-equation check, for the financial statement only.
    pub balance_check: Option<BalanceCheck>,
}

/// Runs report pipelines.
pub struct ReportPipeline;

impl ReportPipeline {
    /// Reads the ledger directory, builds the scope's report and writes it.
    ///
    /// The report file is written last; a failure anywhere before leaves the
    /// previous report in place.
    pub fn run(scope: ReportScope, params: &PipelineParams) -> Result<RunSummary, ReportError> {
        let (text, stats, balance_check) = Self::render(scope, params)?;
        write_report(&params.output_file, &text)?;

        debug!(
            %scope,
            output = %params.output_file.display(),
            bytes = text.len(),
            "report written"
        );

        Ok(RunSummary {
            scope,
            files: stats.files,
            entries: stats.entries,
            bytes_written: text.len(),
            balance_check,
        })
    }

    /// Builds the scope's report text without writing it.
    pub fn render(
        scope: ReportScope,
        params: &PipelineParams,
    ) -> Result<(String, ReadStats, Option<BalanceCheck>), ReportError> {
        let reader = params.reader();

        match scope {
            ReportScope::Accounts => {
                let (balances, stats) = aggregate(&reader, AccountsAggregator::default())?;
                Ok((balances.render(), stats, None))
            }
            ReportScope::Yearly => {
                let (yearly, stats) = aggregate(&reader, YearlyCashAggregator::default())?;
                if yearly.skipped_dates > 0 {
                    warn!(
                        skipped = yearly.skipped_dates,
                        "cash entries without a recognizable year were left out"
                    );
                }
                Ok((yearly.render(), stats, None))
            }
            ReportScope::Fs => {
                let chart = ChartOfAccounts::standard();
                let (balances, stats) = aggregate(&reader, StatementAggregator::new(&chart))?;
                let statement = ReportService::generate_financial_statement(&chart, &balances);
                let check = statement.balance_check();
                if !check.is_balanced {
                    warn!(
                        total_assets = %check.total_assets,
                        liabilities_and_equity = %check.liabilities_and_equity,
                        "financial statement does not balance"
                    );
                }
                Ok((statement.render(), stats, Some(check)))
            }
        }
    }
}

fn aggregate<A: Aggregator>(
    reader: &LedgerReader,
    mut aggregator: A,
) -> Result<(A::Output, ReadStats), LedgerError> {
    let stats = reader.for_each_batch(|entries| aggregator.ingest_all(entries))?;
    Ok((aggregator.finish(), stats))
}

fn write_report(path: &Path, text: &str) -> Result<(), ReportError> {
    let write_err = |source: std::io::Error| ReportError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, text).map_err(write_err)
}
