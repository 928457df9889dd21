//! Text rendering of report models.
//!
//! Every renderer returns the report as lines; a report file is those lines
//! joined with `\n`. Amounts carry exactly two decimals.

use tally_shared::format_amount;

use super::chart::StatementKind;
use super::types::{AccountBalances, FinancialStatement, StatementSection, YearlyCash};

/// Title line of the financial statement.
pub const STATEMENT_TITLE: &str = "Basic Financial Statement";

/// Renders a report model as output lines.
pub trait RenderLines {
    /// Returns the report lines in output order.
    fn render_lines(&self) -> Vec<String>;

    /// Returns the full report text.
    fn render(&self) -> String {
        self.render_lines().join("\n")
    }
}

impl RenderLines for AccountBalances {
    fn render_lines(&self) -> Vec<String> {
        let mut out = vec!["Account,Balance".to_string()];
        out.extend(
            self.iter()
                .map(|(account, balance)| format!("{account},{}", format_amount(balance))),
        );
        out
    }
}

impl RenderLines for YearlyCash {
    fn render_lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.by_year.len() + 1);
        out.push("Financial Year,Cash Balance".to_string());
        out.extend(
            self.by_year
                .iter()
                .map(|(year, balance)| format!("{year},{}", format_amount(*balance))),
        );
        out
    }
}

impl RenderLines for FinancialStatement {
    fn render_lines(&self) -> Vec<String> {
        let mut out = vec![STATEMENT_TITLE.to_string(), String::new()];

        out.push(StatementKind::IncomeStatement.label().to_string());
        push_lines(&mut out, &self.revenues);
        push_lines(&mut out, &self.expenses);
        out.push(format!("Net Income,{}", format_amount(self.net_income)));
        out.push(String::new());

        out.push(StatementKind::BalanceSheet.label().to_string());
        push_section(&mut out, &self.assets);
        out.push(format!("Total Assets,{}", format_amount(self.assets.total)));
        out.push(String::new());

        push_section(&mut out, &self.liabilities);
        out.push(format!(
            "Total Liabilities,{}",
            format_amount(self.liabilities.total)
        ));
        out.push(String::new());

        push_section(&mut out, &self.equity);
        out.push(format!(
            "Retained Earnings (Net Income),{}",
            format_amount(self.net_income)
        ));
        out.push(format!("Total Equity,{}", format_amount(self.total_equity)));
        out.push(String::new());

        out.push(format!(
            "Assets = Liabilities + Equity, {} = {}",
            format_amount(self.total_assets()),
            format_amount(self.liabilities_and_equity())
        ));
        out
    }
}

/// Section heading followed by its lines.
fn push_section(out: &mut Vec<String>, section: &StatementSection) {
    out.push(section.category.label().to_string());
    push_lines(out, section);
}

fn push_lines(out: &mut Vec<String>, section: &StatementSection) {
    out.extend(
        section
            .lines
            .iter()
            .map(|line| format!("{},{}", line.account, format_amount(line.amount))),
    );
}
