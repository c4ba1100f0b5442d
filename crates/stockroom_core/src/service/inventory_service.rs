//! Inventory use-case service.
//!
//! # Responsibility
//! - Compose validation, storage mutations and audit logging into the
//!   add/sell/query/reset operations.
//!
//! # Invariants
//! - Validation failures short-circuit before any storage mutation.
//! - Every stock or sales mutation appends exactly one log entry.
//! - Each mutating operation runs in one storage transaction: a rejected
//!   oversell or a mid-operation fault leaves stock, sales total and log
//!   untouched.

use crate::model::stock::{LogAction, LogEntry, StockLevel, StockMovement};
use crate::repo::stock_repo::{RepoResult, StockRepository};
use crate::validate::{validate_amount, validate_name, validate_price, ValidationError};
use log::info;
use rust_decimal::{Decimal, RoundingStrategy};

/// Quantity assumed when an add/sell request omits `amount`.
const DEFAULT_QUANTITY: i64 = 1;

/// Use-case service wrapper for inventory operations.
pub struct InventoryService<R: StockRepository> {
    repo: R,
}

impl<R: StockRepository> InventoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds stock to a named item, creating it on first add.
    ///
    /// # Contract
    /// - `amount` defaults to 1 when omitted.
    /// - Returns the quantity just added, not the new on-hand total.
    pub fn add_stock(&self, name: &str, amount: Option<i64>) -> RepoResult<StockMovement> {
        validate_name(name)?;
        let amount = validate_amount(amount, DEFAULT_QUANTITY)?;

        self.repo.in_transaction(|repo| {
            repo.upsert_stock(name, amount)?;
            repo.append_log(name, LogAction::Add, amount)?;
            Ok(())
        })?;

        info!("event=stock_add module=service status=ok name={name} amount={amount}");
        Ok(StockMovement {
            name: name.to_string(),
            amount,
        })
    }

    /// Sells stock, optionally crediting `price * amount` to the sales total.
    ///
    /// # Contract
    /// - `amount` defaults to 1 when omitted; absent `price` records no revenue.
    /// - An oversell is rejected wholesale with no partial effect.
    pub fn sell(
        &self,
        name: &str,
        amount: Option<i64>,
        price: Option<f64>,
    ) -> RepoResult<StockMovement> {
        validate_name(name)?;
        let amount = validate_amount(amount, DEFAULT_QUANTITY)?;
        let price = validate_price(price)?;

        // Revenue is computed up front: a price*amount the accumulator cannot
        // represent rejects the request before any mutation.
        let revenue = match price {
            Some(price) => Some(
                price
                    .checked_mul(Decimal::from(amount))
                    .ok_or(ValidationError::InvalidPrice)?,
            ),
            None => None,
        };

        self.repo.in_transaction(|repo| {
            repo.decrement_stock(name, amount)?;
            if let Some(revenue) = revenue {
                repo.add_to_sales_total(revenue)?;
            }
            repo.append_log(name, LogAction::Sale, amount)?;
            Ok(())
        })?;

        info!(
            "event=stock_sale module=service status=ok name={name} amount={amount} priced={}",
            price.is_some()
        );
        Ok(StockMovement {
            name: name.to_string(),
            amount,
        })
    }

    /// Returns the on-hand quantity for one item.
    ///
    /// Absence is not an error; an unknown item reads as zero stock.
    pub fn stock_level(&self, name: &str) -> RepoResult<i64> {
        validate_name(name)?;
        self.repo.get_stock(name)
    }

    /// Returns all items with stock on hand, ordered by name ascending.
    pub fn stock_levels(&self) -> RepoResult<Vec<StockLevel>> {
        self.repo.list_stocks()
    }

    /// Returns the accumulated revenue, rounded UP to 2 decimal places.
    ///
    /// Ceiling rather than nearest: displayed revenue must never understate
    /// what actually accrued.
    pub fn sales_total(&self) -> RepoResult<Decimal> {
        let total = self.repo.get_sales_total()?;
        Ok(total.round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity))
    }

    /// Clears all stock and zeroes the sales total.
    ///
    /// The audit log is append-only and survives a reset.
    pub fn reset(&self) -> RepoResult<()> {
        self.repo.reset_all()?;
        info!("event=inventory_reset module=service status=ok");
        Ok(())
    }

    /// Returns the audit trail, most-recent-first.
    pub fn logs(&self) -> RepoResult<Vec<LogEntry>> {
        self.repo.list_logs()
    }
}
