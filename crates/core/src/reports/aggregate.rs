//! Reducers from ledger entries to report models.

use tracing::{debug, trace};

use crate::ledger::LedgerEntry;

use super::chart::{CASH_ACCOUNT, ChartOfAccounts};
use super::types::{AccountBalances, YearlyCash};

/// Folds a stream of ledger entries into a report model.
pub trait Aggregator {
    /// Model produced once every entry has been seen.
    type Output;

    /// Accounts for one entry.
    fn ingest(&mut self, entry: &LedgerEntry);

    /// Accounts for a slice of entries in order.
    fn ingest_all(&mut self, entries: &[LedgerEntry]) {
        for entry in entries {
            self.ingest(entry);
        }
    }

    /// Consumes the aggregator and returns its model.
    fn finish(self) -> Self::Output;
}

/// Balance per account over every entry.
#[derive(Debug, Default)]
pub struct AccountsAggregator {
    balances: AccountBalances,
}

impl Aggregator for AccountsAggregator {
    type Output = AccountBalances;

    fn ingest(&mut self, entry: &LedgerEntry) {
        self.balances.add(&entry.account, entry.signed_amount());
    }

    fn finish(self) -> AccountBalances {
        self.balances
    }
}

/// Cash movement per calendar year.
#[derive(Debug, Default)]
pub struct YearlyCashAggregator {
    yearly: YearlyCash,
}

impl Aggregator for YearlyCashAggregator {
    type Output = YearlyCash;

    fn ingest(&mut self, entry: &LedgerEntry) {
        if entry.account != CASH_ACCOUNT {
            return;
        }
        match entry.year() {
            Some(year) => self.yearly.add(year, entry.signed_amount()),
            None => {
                debug!(date = %entry.date, "cash entry without a recognizable year skipped");
                self.yearly.skipped_dates += 1;
            }
        }
    }

    fn finish(self) -> YearlyCash {
        self.yearly
    }
}

/// Balances of the chart-of-accounts leaves. Other accounts are dropped.
#[derive(Debug)]
pub struct StatementAggregator {
    chart: ChartOfAccounts,
    balances: AccountBalances,
}

impl StatementAggregator {
    /// Creates an aggregator with every leaf of `chart` seeded at zero.
    #[must_use]
    pub fn new(chart: &ChartOfAccounts) -> Self {
        Self {
            chart: *chart,
            balances: AccountBalances::seeded(chart.leaves().map(|(_, name)| name)),
        }
    }
}

impl Default for StatementAggregator {
    fn default() -> Self {
        Self::new(&ChartOfAccounts::standard())
    }
}

impl Aggregator for StatementAggregator {
    type Output = AccountBalances;

    fn ingest(&mut self, entry: &LedgerEntry) {
        if self.chart.contains(&entry.account) {
            self.balances.add(&entry.account, entry.signed_amount());
        } else {
            trace!(account = %entry.account, "account not in chart, ignored");
        }
    }

    fn finish(self) -> AccountBalances {
        self.balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn entries(lines: &[&str]) -> Vec<LedgerEntry> {
        lines.iter().map(|l| LedgerEntry::parse_line(l)).collect()
    }

    #[test]
    fn test_accounts_aggregator_sums_per_account() {
        let mut agg = AccountsAggregator::default();
        agg.ingest_all(&entries(&[
            "2023-01-01,Cash,,100,0",
            "2023-01-02,Rent Expense,,200,0",
            "2023-01-03,Cash,,0,40",
            "2023-01-04,Mystery,,,",
        ]));
        let balances = agg.finish();

        assert_eq!(balances.get("Cash"), Some(dec!(60)));
        assert_eq!(balances.get("Rent Expense"), Some(dec!(200)));
        assert_eq!(balances.get("Mystery"), Some(Decimal::ZERO));
        let order: Vec<_> = balances.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["Cash", "Rent Expense", "Mystery"]);
    }

    #[test]
    fn test_yearly_aggregator_filters_cash() {
        let mut agg = YearlyCashAggregator::default();
        agg.ingest_all(&entries(&[
            "2023-01-01,Cash,,100,0",
            "2023-02-01,Cash,,0,40",
            "2022-12-31,Cash,,5,0",
            "2023-03-01,Inventory,,1000,0",
            "someday,Cash,,9,0",
        ]));
        let yearly = agg.finish();

        assert_eq!(yearly.by_year.len(), 2);
        assert_eq!(yearly.by_year[&2023], dec!(60));
        assert_eq!(yearly.by_year[&2022], dec!(5));
        assert_eq!(yearly.skipped_dates, 1);
    }

    #[test]
    fn test_statement_aggregator_seeds_and_drops() {
        let mut agg = StatementAggregator::default();
        agg.ingest_all(&entries(&[
            "2023-01-01,Sales Revenue,,0,500",
            "2023-01-02,Petty Cash,,50,0",
        ]));
        let balances = agg.finish();

        assert_eq!(balances.iter().count(), 20);
        assert_eq!(balances.get("Sales Revenue"), Some(dec!(-500)));
        assert_eq!(balances.get("Inventory"), Some(Decimal::ZERO));
        assert_eq!(balances.get("Petty Cash"), None);
    }
}
