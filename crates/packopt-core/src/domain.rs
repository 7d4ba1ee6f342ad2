//! # Domain Newtypes
//!
//! Validated wrappers for the two inputs of the optimizer. Construction is the
//! only place invariants are checked; a value of either type is always safe
//! to hand to [`crate::solve_validated`].
//!
//! Raw input arrives as `i64` so that zero and negative values coming from a
//! JSON body or a command line are rejected with a typed error instead of
//! failing to parse.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{PackError, PackSizeViolation};

/// The number of items a customer ordered. Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct OrderQuantity(u64);

impl OrderQuantity {
    /// Validate a raw quantity.
    pub fn new(quantity: i64) -> Result<Self, PackError> {
        if quantity <= 0 {
            return Err(PackError::invalid_quantity(
                quantity,
                "order quantity must be positive",
            ));
        }
        Ok(Self(quantity.unsigned_abs()))
    }

    /// The quantity as an unsigned integer.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for OrderQuantity {
    type Error = PackError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderQuantity> for u64 {
    fn from(value: OrderQuantity) -> Self {
        value.0
    }
}

impl std::fmt::Display for OrderQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog of distinct, positive, shippable pack sizes.
///
/// The set remembers the order the caller supplied (what a catalog endpoint
/// echoes back). The solver never relies on that order; it sorts its own copy
/// via [`PackSizeSet::descending`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<u64>")]
pub struct PackSizeSet {
    sizes: Vec<u64>,
}

impl PackSizeSet {
    /// Validate a raw list of pack sizes.
    ///
    /// Rules are checked in input order, so the reported violation names the
    /// first offending value.
    pub fn new(sizes: impl IntoIterator<Item = i64>) -> Result<Self, PackError> {
        let mut seen = HashSet::new();
        let mut validated = Vec::new();
        for size in sizes {
            if size <= 0 {
                return Err(PackSizeViolation::NonPositive(size).into());
            }
            if !seen.insert(size) {
                return Err(PackSizeViolation::Duplicate(size).into());
            }
            validated.push(size.unsigned_abs());
        }
        if validated.is_empty() {
            return Err(PackSizeViolation::Empty.into());
        }
        Ok(Self { sizes: validated })
    }

    /// The sizes in the order they were supplied.
    pub fn as_slice(&self) -> &[u64] {
        &self.sizes
    }

    /// A fresh copy of the sizes, largest first.
    pub fn descending(&self) -> Vec<u64> {
        let mut sorted = self.sizes.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted
    }

    /// The largest pack size in the catalog.
    pub fn max(&self) -> u64 {
        // Non-empty by construction.
        self.sizes.iter().copied().max().unwrap_or_default()
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Whether `size` is one of the catalog's pack sizes.
    pub fn contains(&self, size: u64) -> bool {
        self.sizes.contains(&size)
    }
}

impl TryFrom<Vec<i64>> for PackSizeSet {
    type Error = PackError;

    fn try_from(value: Vec<i64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PackSizeSet> for Vec<u64> {
    fn from(value: PackSizeSet) -> Self {
        value.sizes
    }
}

impl std::fmt::Display for PackSizeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self.sizes.iter().map(u64::to_string).collect();
        write!(f, "{{{}}}", joined.join(", "))
    }
}
