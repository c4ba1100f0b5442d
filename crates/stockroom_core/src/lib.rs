//! Core domain logic for the Stockroom inventory service.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use export::{ExportError, ExportKind};
pub use logging::{default_log_level, init_logging};
pub use model::stock::{LogAction, LogEntry, StockLevel, StockMovement};
pub use repo::stock_repo::{RepoError, RepoResult, SqliteStockRepository, StockRepository};
pub use service::inventory_service::InventoryService;
pub use validate::{validate_amount, validate_name, validate_price, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
