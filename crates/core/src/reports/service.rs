//! Report generation service.

use rust_decimal::Decimal;

use super::chart::{Category, ChartOfAccounts};
use super::types::{AccountBalances, FinancialStatement, StatementLine, StatementSection};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates the financial statement from chart-of-accounts balances.
    ///
    /// Each line is presented on its category's normal side, so revenues and
    /// liabilities read positive when credited. Net income is folded into
    /// equity as retained earnings, which makes Assets = Liabilities + Equity
    /// hold for a balanced ledger.
    #[must_use]
    pub fn generate_financial_statement(
        chart: &ChartOfAccounts,
        balances: &AccountBalances,
    ) -> FinancialStatement {
        let section = |category| Self::build_section(chart, balances, category);

        let revenues = section(Category::Revenues);
        let expenses = section(Category::Expenses);
        let net_income = revenues.total - expenses.total;

        let assets = section(Category::Assets);
        let liabilities = section(Category::Liabilities);
        let equity = section(Category::Equity);
        let total_equity = equity.total + net_income;

        FinancialStatement {
            revenues,
            expenses,
            net_income,
            assets,
            liabilities,
            equity,
            total_equity,
        }
    }

    fn build_section(
        chart: &ChartOfAccounts,
        balances: &AccountBalances,
        category: Category,
    ) -> StatementSection {
        let normal = category.normal_balance();
        let lines: Vec<StatementLine> = chart
            .accounts(category)
            .iter()
            .map(|&account| StatementLine {
                account: account.to_string(),
                amount: normal.present(balances.get(account).unwrap_or_default()),
            })
            .collect();
        let total: Decimal = lines.iter().map(|line| line.amount).sum();

        StatementSection {
            category,
            lines,
            total,
        }
    }
}
