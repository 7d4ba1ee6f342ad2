//! # Error Hierarchy
//!
//! Structured error types for the optimizer engine, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every variant is recoverable: the caller decides how to surface it
//! (an HTTP status, a CLI exit code). Variants carry the offending input so
//! that a rejected request can be diagnosed from the message alone.

use thiserror::Error;

/// Top-level error type returned by the optimizer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    /// The order quantity is not a positive integer, or is too large to
    /// index a search table on this platform.
    #[error("invalid order quantity {quantity}: {reason}")]
    InvalidQuantity {
        /// The rejected quantity as supplied by the caller.
        quantity: i64,
        /// Why it was rejected.
        reason: String,
    },

    /// The pack-size catalog violates one of its invariants.
    #[error("invalid pack sizes: {0}")]
    InvalidPackSizes(#[from] PackSizeViolation),

    /// No reachable total exists between the order quantity and the search
    /// ceiling. Valid input cannot produce this.
    #[error("no pack combination reaches {order_quantity} within search ceiling {ceiling}")]
    Infeasible {
        /// The requested quantity.
        order_quantity: u64,
        /// The largest total the search considered.
        ceiling: u64,
    },
}

impl PackError {
    /// Build an [`PackError::InvalidQuantity`] from any displayable reason.
    pub(crate) fn invalid_quantity(quantity: i64, reason: impl Into<String>) -> Self {
        Self::InvalidQuantity {
            quantity,
            reason: reason.into(),
        }
    }

    /// Whether the error stems from caller input (as opposed to an internal
    /// inconsistency). Input errors are fixable by the caller and retryable.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Infeasible { .. })
    }
}

/// The specific rule a pack-size catalog broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackSizeViolation {
    /// The catalog contains no sizes at all.
    #[error("at least one pack size is required")]
    Empty,

    /// A size is zero or negative.
    #[error("all pack sizes must be positive integers, got {0}")]
    NonPositive(i64),

    /// A size appears more than once.
    #[error("all pack sizes must be unique, {0} appears more than once")]
    Duplicate(i64),
}
