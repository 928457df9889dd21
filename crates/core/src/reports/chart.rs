//! The fixed chart of accounts used by the financial statement.

use rust_decimal::Decimal;

/// Name of the account the yearly cash report tracks.
pub const CASH_ACCOUNT: &str = "Cash";

/// Top-level statement a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// Revenues and expenses.
    IncomeStatement,
    /// Assets, liabilities and equity.
    BalanceSheet,
}

impl StatementKind {
    /// Heading used in rendered output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::IncomeStatement => "Income Statement",
            Self::BalanceSheet => "Balance Sheet",
        }
    }
}

/// Side on which an account category normally carries its balance.
///
/// - Assets/Expenses: presented as debit - credit (debit-normal)
/// - Liabilities/Equity/Revenues: presented as credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalBalance {
    /// Debit-normal categories.
    DebitNormal,
    /// Credit-normal categories.
    CreditNormal,
}

impl NormalBalance {
    /// Converts a raw `debit - credit` balance to its presented value.
    #[must_use]
    pub fn present(self, raw: Decimal) -> Decimal {
        match self {
            Self::DebitNormal => raw,
            Self::CreditNormal => -raw,
        }
    }
}

/// Account category within a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Income-statement revenues.
    Revenues,
    /// Income-statement expenses.
    Expenses,
    /// Balance-sheet assets.
    Assets,
    /// Balance-sheet liabilities.
    Liabilities,
    /// Balance-sheet equity.
    Equity,
}

impl Category {
    /// Normal balance side of accounts in this category.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Expenses | Self::Assets => NormalBalance::DebitNormal,
            Self::Revenues | Self::Liabilities | Self::Equity => NormalBalance::CreditNormal,
        }
    }

    /// Heading used in rendered output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenues => "Revenues",
            Self::Expenses => "Expenses",
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
            Self::Equity => "Equity",
        }
    }
}

const STANDARD_GROUPS: [(Category, &[&str]); 5] = [
    (Category::Revenues, &["Sales Revenue"]),
    (
        Category::Expenses,
        &[
            "Cost of Goods Sold",
            "Salaries Expense",
            "Rent Expense",
            "Utilities Expense",
            "Interest Expense",
            "Tax Expense",
        ],
    ),
    (
        Category::Assets,
        &[
            CASH_ACCOUNT,
            "Accounts Receivable",
            "Inventory",
            "Fixed Assets",
            "Prepaid Expenses",
        ],
    ),
    (
        Category::Liabilities,
        &[
            "Accounts Payable",
            "Loan Payable",
            "Sales Tax Payable",
            "Accrued Liabilities",
            "Unearned Revenue",
            "Dividends Payable",
        ],
    ),
    (Category::Equity, &["Common Stock", "Retained Earnings"]),
];

/// Static taxonomy of the account names the financial statement recognizes.
#[derive(Debug, Clone, Copy)]
pub struct ChartOfAccounts {
    groups: &'static [(Category, &'static [&'static str])],
}

impl ChartOfAccounts {
    /// The standard chart: one revenue, six expense, five asset, six liability
    /// and two equity accounts.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            groups: &STANDARD_GROUPS,
        }
    }

    /// Account names in a category, in declaration order.
    #[must_use]
    pub fn accounts(&self, category: Category) -> &'static [&'static str] {
        self.groups
            .iter()
            .find(|(c, _)| *c == category)
            .map(|&(_, names)| names)
            .unwrap_or_default()
    }

    /// Every leaf account with its category, in declaration order.
    pub fn leaves(&self) -> impl Iterator<Item = (Category, &'static str)> + '_ {
        self.groups
            .iter()
            .flat_map(|(category, names)| names.iter().map(move |name| (*category, *name)))
    }

    /// Category of an account name, if the chart lists it. Names match exactly.
    #[must_use]
    pub fn category_of(&self, account: &str) -> Option<Category> {
        self.leaves()
            .find(|(_, name)| *name == account)
            .map(|(category, _)| category)
    }

    /// Whether the chart lists this account name.
    #[must_use]
    pub fn contains(&self, account: &str) -> bool {
        self.category_of(account).is_some()
    }
}

impl Default for ChartOfAccounts {
    fn default() -> Self {
        Self::standard()
    }
}
