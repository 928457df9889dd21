//! Ledger entry domain type.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use csv::ByteRecord;
use rust_decimal::Decimal;
use tracing::debug;

/// Date layouts accepted in the `date` column, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Timestamp layouts accepted in the `date` column when no date layout matches.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// One `date,account,description,debit,credit` row of a ledger file.
///
/// Rows are parsed leniently: missing columns are empty, bytes that are not
/// UTF-8 are replaced and amounts that do not parse are zero. A malformed row
/// therefore never fails a run, it only contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Calendar date as written in the file.
    pub date: String,
    /// Account name.
    pub account: String,
    /// Free-text description. Not used by any aggregation.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

impl LedgerEntry {
    /// Parses every row of a headerless ledger file.
    ///
    /// Quoted fields may contain commas. Blank rows are skipped.
    #[must_use]
    pub fn parse_rows(content: &[u8]) -> Vec<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        let mut entries = Vec::new();
        let mut record = ByteRecord::new();
        loop {
            match reader.read_byte_record(&mut record) {
                Ok(true) if is_blank(&record) => {}
                Ok(true) => entries.push(Self::from_record(&record)),
                Ok(false) => break,
                Err(err) if err.is_io_error() => {
                    debug!(error = %err, "ledger rows truncated");
                    break;
                }
                Err(err) => {
                    debug!(error = %err, "unreadable ledger row skipped");
                }
            }
        }
        entries
    }

    /// Parses one row.
    #[must_use]
    pub fn parse_line(line: &str) -> Self {
        Self::parse_rows(line.as_bytes())
            .into_iter()
            .next()
            .unwrap_or_else(|| Self::from_record(&ByteRecord::new()))
    }

    fn from_record(record: &ByteRecord) -> Self {
        let field = |i: usize| record.get(i).map(String::from_utf8_lossy).unwrap_or_default();

        Self {
            date: field(0).trim().to_string(),
            account: field(1).into_owned(),
            description: field(2).into_owned(),
            debit: parse_amount(&field(3)),
            credit: parse_amount(&field(4)),
        }
    }

    /// Returns `debit - credit`.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns the calendar year of the entry date, if the date is recognizable.
    ///
    /// Full dates and timestamps are parsed first; anything else falls back to
    /// the first four-digit number in the text (`2023-06`, `Jan 5, 2023`).
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        let date = self.date.as_str();

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
            .map(|d| d.year())
            .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|d| d.year()))
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
                    .map(|d| d.year())
            })
            .or_else(|| four_digit_year(date))
    }
}

fn is_blank(record: &ByteRecord) -> bool {
    record.iter().all(|field| field.trim_ascii().is_empty())
}

fn four_digit_year(date: &str) -> Option<i32> {
    date.split(|c: char| !c.is_ascii_digit())
        .find(|token| token.len() == 4)
        .and_then(|token| token.parse().ok())
}

/// Parses an amount column. Empty or malformed input is zero.
fn parse_amount(raw: &str) -> Decimal {
    let raw = raw.trim();
    if raw.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}
