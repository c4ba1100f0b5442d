//! Wire models for the HTTP surface.

use serde::Deserialize;

/// Request payload for adding stock to a named item.
#[derive(Deserialize, Debug)]
pub struct AddStockRequest {
    /// Item name, 1-8 ASCII letters.
    pub name: String,
    /// Quantity to add; defaults to 1 when omitted.
    pub amount: Option<i64>,
}

/// Request payload for recording a sale.
#[derive(Deserialize, Debug)]
pub struct SellRequest {
    /// Item name, 1-8 ASCII letters.
    pub name: String,
    /// Quantity to sell; defaults to 1 when omitted.
    pub amount: Option<i64>,
    /// Unit price; no revenue is recorded when omitted.
    pub price: Option<f64>,
}
