//! Inventory domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Stock quantities and the sales total never go negative.
//! - Log entries are append-only; nothing in core mutates or deletes them.

pub mod stock;
