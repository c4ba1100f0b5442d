//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must validate item names before SQL mutations.
//! - Repository APIs return semantic errors (`InsufficientStock`) in
//!   addition to DB transport errors.

pub mod stock_repo;
