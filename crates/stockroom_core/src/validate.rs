//! Input validation for inventory requests.
//!
//! # Responsibility
//! - Check names, quantities and prices before they reach storage.
//!
//! # Invariants
//! - Functions are pure: no storage access, no logging, no side effects.
//! - A validation failure always happens before any mutation.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{1,8}$").expect("valid name regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is not 1-8 ASCII letters.
    InvalidName,
    /// Quantity is missing a usable value or is not a positive integer.
    InvalidAmount,
    /// Price is not a positive finite number.
    InvalidPrice,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "item name must be 1-8 ASCII letters"),
            Self::InvalidAmount => write!(f, "amount must be a positive integer"),
            Self::InvalidPrice => write!(f, "price must be a positive number"),
        }
    }
}

impl Error for ValidationError {}

/// Validates an item name against the `^[A-Za-z]{1,8}$` pattern.
pub fn validate_name(input: &str) -> Result<(), ValidationError> {
    if NAME_RE.is_match(input) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName)
    }
}

/// Validates an optional quantity, falling back to `default` when absent.
///
/// Present values must be strictly positive.
pub fn validate_amount(input: Option<i64>, default: i64) -> Result<i64, ValidationError> {
    match input {
        None => Ok(default),
        Some(amount) if amount > 0 => Ok(amount),
        Some(_) => Err(ValidationError::InvalidAmount),
    }
}

/// Validates an optional unit price.
///
/// Absent price is legal and means no revenue is recorded. Present prices
/// must be finite and strictly positive; the value is converted once to an
/// exact [`Decimal`] so all later revenue arithmetic avoids binary floats.
pub fn validate_price(input: Option<f64>) -> Result<Option<Decimal>, ValidationError> {
    let Some(price) = input else {
        return Ok(None);
    };

    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::InvalidPrice);
    }

    Decimal::from_f64(price)
        .map(Some)
        .ok_or(ValidationError::InvalidPrice)
}
