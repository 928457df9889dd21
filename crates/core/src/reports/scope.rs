//! Report scopes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// One of the report kinds the orchestrator tracks independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportScope {
    /// Balance per account.
    Accounts,
    /// Cash balance per calendar year.
    Yearly,
    /// Categorized financial statement.
    Fs,
}

/// A scope name outside `accounts`, `yearly` and `fs`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported report scope: {0}")]
pub struct UnsupportedScope(pub String);

impl ReportScope {
    /// Every scope.
    pub const ALL: [Self; 3] = [Self::Accounts, Self::Yearly, Self::Fs];

    /// Scope name as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Yearly => "yearly",
            Self::Fs => "fs",
        }
    }

    /// File name the scope's report is written to.
    #[must_use]
    pub const fn default_output_file(self) -> &'static str {
        match self {
            Self::Accounts => "accounts.csv",
            Self::Yearly => "yearly.csv",
            Self::Fs => "fs.csv",
        }
    }

    /// Position of the scope in [`ReportScope::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Accounts => 0,
            Self::Yearly => 1,
            Self::Fs => 2,
        }
    }
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportScope {
    type Err = UnsupportedScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| UnsupportedScope(s.to_string()))
    }
}
