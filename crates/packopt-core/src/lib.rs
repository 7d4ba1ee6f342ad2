#![deny(missing_docs)]

//! # packopt-core: Optimizer Engine
//!
//! Computes, for an order quantity and a catalog of shippable pack sizes, the
//! pack combination that ships at least the order quantity with the least
//! excess, and among equal-excess combinations the fewest packs.
//!
//! The crate has no internal dependencies and performs no I/O. Everything the
//! transport layer needs flows through a single entry point:
//!
//! ```
//! let result = packopt_core::solve(501, &[250, 500, 1000, 2000, 5000]).unwrap();
//! assert_eq!(result.total_items, 750);
//! assert_eq!(result.total_packs, 2);
//! assert_eq!(result.waste, 249);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Validate at construction.** [`OrderQuantity`] and [`PackSizeSet`] can
//!    only hold values that satisfy their invariants, so the solver itself
//!    never re-checks them.
//!
//! 2. **Callers own the catalog.** The solver reads a [`PackSizeSet`] by
//!    reference and works on a private descending copy. Nothing the caller
//!    holds is reordered or mutated.
//!
//! 3. **Typed failures only.** Every failure, including states that valid
//!    input cannot produce, is a [`PackError`]. The engine never panics.

pub mod domain;
pub mod error;
pub mod optimizer;
pub mod result;

// Re-export primary types at crate root for ergonomic imports.
pub use domain::{OrderQuantity, PackSizeSet};
pub use error::{PackError, PackSizeViolation};
pub use optimizer::{solve, solve_validated};
pub use result::{PackCount, PackingResult};
