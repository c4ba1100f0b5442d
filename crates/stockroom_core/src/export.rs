//! CSV export of stock levels, the sales total and the audit log.
//!
//! # Responsibility
//! - Map an export-kind URL segment onto a renderer.
//! - Render query results as CSV documents with stable headers.

use crate::model::stock::{LogEntry, StockLevel};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The three exportable record sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Stocks,
    Sales,
    Logs,
}

impl ExportKind {
    /// Parses the `/export/{kind}` path segment. Unknown kinds are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "stocks" => Some(Self::Stocks),
            "sales" => Some(Self::Sales),
            "logs" => Some(Self::Logs),
            _ => None,
        }
    }

    /// Attachment file name for the Content-Disposition header.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Stocks => "stocks.csv",
            Self::Sales => "sales.csv",
            Self::Logs => "logs.csv",
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Render(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "{err}"),
            Self::Render(message) => write!(f, "csv render failed: {message}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Render(_) => None,
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Renders the stock listing as `name,amount` rows.
pub fn stocks_csv(levels: &[StockLevel]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "amount"])?;
    for level in levels {
        writer.write_record([level.name.clone(), level.amount.to_string()])?;
    }
    finish(writer)
}

/// Renders the sales total as a single `sales` row with two decimal places.
pub fn sales_csv(total: Decimal) -> Result<String, ExportError> {
    let mut total = total;
    total.rescale(2);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["sales"])?;
    writer.write_record([total.to_string()])?;
    finish(writer)
}

/// Renders the audit log, most-recent-first, one row per entry.
pub fn logs_csv(entries: &[LogEntry]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "name", "action", "amount", "created_at_ms"])?;
    for entry in entries {
        writer.write_record([
            entry.id.to_string(),
            entry.name.clone(),
            entry.action.as_db_str().to_string(),
            entry.amount.to_string(),
            entry.created_at_ms.to_string(),
        ])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let data = writer
        .into_inner()
        .map_err(|err| ExportError::Render(err.to_string()))?;
    String::from_utf8(data).map_err(|err| ExportError::Render(err.to_string()))
}
