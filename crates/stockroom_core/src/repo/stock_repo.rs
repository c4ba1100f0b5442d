//! Stock repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable data access over the `stocks`, `sales_total` and
//!   `event_log` tables.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate item names before SQL mutations.
//! - The oversell guard is a single conditional UPDATE, so the stock check
//!   and decrement cannot interleave with a concurrent sell.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::stock::{LogAction, LogEntry, StockLevel};
use crate::validate::{validate_name, ValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const LOG_SELECT_SQL: &str = "SELECT
    id,
    name,
    action,
    amount,
    created_at
FROM event_log";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for inventory persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    InsufficientStock { name: String, requested: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InsufficientStock { name, requested } => {
                write!(f, "insufficient stock of `{name}` to sell {requested}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InsufficientStock { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for stock, sales-total and audit-log access.
pub trait StockRepository {
    /// Runs `op` inside one storage transaction.
    ///
    /// Any error returned by `op` rolls back every mutation it made.
    fn in_transaction<T>(&self, op: impl FnOnce(&Self) -> RepoResult<T>) -> RepoResult<T>
    where
        Self: Sized;
    /// Creates the stock row with `amount = delta`, or adds `delta` to it.
    fn upsert_stock(&self, name: &str, delta: i64) -> RepoResult<()>;
    /// Subtracts `amount` iff at least that much is on hand.
    fn decrement_stock(&self, name: &str, amount: i64) -> RepoResult<()>;
    /// Returns the on-hand quantity, 0 when no row exists.
    fn get_stock(&self, name: &str) -> RepoResult<i64>;
    /// Returns items with `amount > 0`, ordered by name ascending.
    fn list_stocks(&self) -> RepoResult<Vec<StockLevel>>;
    fn add_to_sales_total(&self, increment: Decimal) -> RepoResult<()>;
    fn get_sales_total(&self) -> RepoResult<Decimal>;
    /// Deletes all stock rows and zeroes the sales total. Logs are retained.
    fn reset_all(&self) -> RepoResult<()>;
    /// Append-only insert with storage-assigned id and timestamp.
    fn append_log(&self, name: &str, action: LogAction, amount: i64) -> RepoResult<i64>;
    /// Returns log entries most-recent-first.
    fn list_logs(&self) -> RepoResult<Vec<LogEntry>>;
}

/// SQLite-backed stock repository.
pub struct SqliteStockRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStockRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StockRepository for SqliteStockRepository<'_> {
    fn in_transaction<T>(&self, op: impl FnOnce(&Self) -> RepoResult<T>) -> RepoResult<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = op(self)?;
        tx.commit()?;
        Ok(value)
    }

    fn upsert_stock(&self, name: &str, delta: i64) -> RepoResult<()> {
        validate_name(name)?;

        self.conn.execute(
            "INSERT INTO stocks (name, amount) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET amount = amount + excluded.amount;",
            params![name, delta],
        )?;

        Ok(())
    }

    fn decrement_stock(&self, name: &str, amount: i64) -> RepoResult<()> {
        validate_name(name)?;

        // One conditional statement: a missing row or short stock changes
        // nothing, and no concurrent interleaving can push amount below zero.
        let changed = self.conn.execute(
            "UPDATE stocks
             SET amount = amount - ?2
             WHERE name = ?1 AND amount >= ?2;",
            params![name, amount],
        )?;

        if changed == 0 {
            return Err(RepoError::InsufficientStock {
                name: name.to_string(),
                requested: amount,
            });
        }

        Ok(())
    }

    fn get_stock(&self, name: &str) -> RepoResult<i64> {
        let amount = self
            .conn
            .query_row(
                "SELECT amount FROM stocks WHERE name = ?1;",
                [name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        Ok(amount.unwrap_or(0))
    }

    fn list_stocks(&self) -> RepoResult<Vec<StockLevel>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, amount FROM stocks WHERE amount > 0 ORDER BY name ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut levels = Vec::new();
        while let Some(row) = rows.next()? {
            levels.push(StockLevel {
                name: row.get("name")?,
                amount: row.get("amount")?,
            });
        }

        Ok(levels)
    }

    fn add_to_sales_total(&self, increment: Decimal) -> RepoResult<()> {
        let total = self.get_sales_total()?;
        let next = total.checked_add(increment).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "sales total overflow adding {increment} to {total}"
            ))
        })?;

        self.conn.execute(
            "UPDATE sales_total SET total = ?1 WHERE id = 1;",
            [next.to_string()],
        )?;

        Ok(())
    }

    fn get_sales_total(&self) -> RepoResult<Decimal> {
        let text: String =
            self.conn
                .query_row("SELECT total FROM sales_total WHERE id = 1;", [], |row| {
                    row.get(0)
                })?;

        Decimal::from_str(&text).map_err(|_| {
            RepoError::InvalidData(format!("invalid total value `{text}` in sales_total.total"))
        })
    }

    fn reset_all(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "BEGIN;
             DELETE FROM stocks;
             UPDATE sales_total SET total = '0' WHERE id = 1;
             COMMIT;",
        )?;

        Ok(())
    }

    fn append_log(&self, name: &str, action: LogAction, amount: i64) -> RepoResult<i64> {
        validate_name(name)?;

        self.conn.execute(
            "INSERT INTO event_log (name, action, amount) VALUES (?1, ?2, ?3);",
            params![name, action.as_db_str(), amount],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_logs(&self) -> RepoResult<Vec<LogEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LOG_SELECT_SQL} ORDER BY id DESC;"))?;

        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_log_row(row)?);
        }

        Ok(entries)
    }
}

fn parse_log_row(row: &Row<'_>) -> RepoResult<LogEntry> {
    let action_text: String = row.get("action")?;
    let action = LogAction::parse(&action_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid action value `{action_text}` in event_log.action"
        ))
    })?;

    Ok(LogEntry {
        id: row.get("id")?,
        name: row.get("name")?,
        action,
        amount: row.get("amount")?,
        created_at_ms: row.get("created_at")?,
    })
}
