//! Report data types.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tally_shared::types::money::round_amount;

use super::chart::Category;

/// Signed `debit - credit` balances keyed by account name.
///
/// Iteration follows the order in which each account was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountBalances {
    rows: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl AccountBalances {
    /// Creates balances pre-seeded at zero for the given accounts, in order.
    #[must_use]
    pub fn seeded<'a>(accounts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut balances = Self::default();
        for account in accounts {
            balances.slot(account);
        }
        balances
    }

    /// Adds `amount` to an account, creating it at zero on first sight.
    pub fn add(&mut self, account: &str, amount: Decimal) {
        let slot = self.slot(account);
        self.rows[slot].1 += amount;
    }

    /// Balance of an account, if it has been seen.
    #[must_use]
    pub fn get(&self, account: &str) -> Option<Decimal> {
        self.index.get(account).map(|&slot| self.rows[slot].1)
    }

    /// Accounts and balances in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rows.iter().map(|(name, balance)| (name.as_str(), *balance))
    }

    fn slot(&mut self, account: &str) -> usize {
        if let Some(&slot) = self.index.get(account) {
            return slot;
        }
        let slot = self.rows.len();
        self.rows.push((account.to_string(), Decimal::ZERO));
        self.index.insert(account.to_string(), slot);
        slot
    }
}

/// Net cash movement per calendar year, ascending by year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearlyCash {
    /// Balance per year.
    pub by_year: BTreeMap<i32, Decimal>,
    /// Cash entries dropped because their date had no recognizable year.
    pub skipped_dates: usize,
}

impl YearlyCash {
    /// Adds `amount` to a year's bucket.
    pub fn add(&mut self, year: i32, amount: Decimal) {
        *self.by_year.entry(year).or_insert(Decimal::ZERO) += amount;
    }
}

/// One account line on the financial statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementLine {
    /// Account name.
    pub account: String,
    /// Balance presented on the category's normal side.
    pub amount: Decimal,
}

/// A category section of the financial statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSection {
    /// Category of every line in the section.
    pub category: Category,
    /// Lines in chart order.
    pub lines: Vec<StatementLine>,
    /// Sum of the lines.
    pub total: Decimal,
}

/// Income statement plus balance sheet derived from the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialStatement {
    /// Revenue accounts.
    pub revenues: StatementSection,
    /// Expense accounts.
    pub expenses: StatementSection,
    /// Net income (revenues - expenses).
    pub net_income: Decimal,
    /// Asset accounts.
    pub assets: StatementSection,
    /// Liability accounts.
    pub liabilities: StatementSection,
    /// Equity accounts, excluding the period's net income.
    pub equity: StatementSection,
    /// Equity total including net income as retained earnings.
    pub total_equity: Decimal,
}

impl FinancialStatement {
    /// Total assets.
    #[must_use]
    pub fn total_assets(&self) -> Decimal {
        self.assets.total
    }

    /// Total liabilities plus total equity.
    #[must_use]
    pub fn liabilities_and_equity(&self) -> Decimal {
        self.liabilities.total + self.total_equity
    }

    /// Whether Assets = Liabilities + Equity at report precision.
    ///
    /// Informational only: an unbalanced statement is still written.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        round_amount(self.total_assets()) == round_amount(self.liabilities_and_equity())
    }

    /// Summary of the accounting-equation check.
    #[must_use]
    pub fn balance_check(&self) -> BalanceCheck {
        BalanceCheck {
            total_assets: self.total_assets(),
            liabilities_and_equity: self.liabilities_and_equity(),
            is_balanced: self.is_balanced(),
        }
    }
}

/// Outcome of the Assets = Liabilities + Equity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceCheck {
    /// Total assets.
    pub total_assets: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether the two sides agree at report precision.
    pub is_balanced: bool,
}
