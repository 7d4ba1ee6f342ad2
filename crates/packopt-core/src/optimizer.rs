//! # Optimizer
//!
//! Bounded dynamic-programming search over reachable totals.
//!
//! ## Phases
//!
//! 1. **Table construction.** For every total `0..=C`, where
//!    `C = order_quantity + max(pack_sizes)`, record the fewest packs that
//!    sum to it exactly, plus the link (previous total, pack used) that
//!    achieved it.
//! 2. **Selection.** The smallest reachable total at or above the order
//!    quantity. Smallest total means least waste; the table already holds the
//!    fewest packs for that total.
//! 3. **Backtrace.** Follow links from the selected total back to zero and
//!    count packs per size.
//!
//! ## Why `C` suffices
//!
//! `ceil(q / M)` packs of the largest size `M` ship less than `q + M` items,
//! so some feasible total always lies inside the table.
//!
//! ## Tie-break
//!
//! Relaxation iterates sizes largest first and only overwrites an entry on a
//! strict improvement. Among equal-count combinations for a total, the one
//! reached first, through the larger pack, is kept.

use std::collections::BTreeMap;

use crate::domain::{OrderQuantity, PackSizeSet};
use crate::error::PackError;
use crate::result::PackingResult;

/// Validate raw input and compute the optimal packing.
///
/// `pack_sizes` is only read; its order is irrelevant and left untouched.
///
/// ```
/// use packopt_core::{solve, PackError};
///
/// let result = solve(12001, &[250, 500, 1000, 2000, 5000]).unwrap();
/// assert_eq!(result.total_items, 12250);
/// assert_eq!(result.total_packs, 4);
///
/// assert!(matches!(solve(0, &[250]), Err(PackError::InvalidQuantity { .. })));
/// assert!(matches!(solve(10, &[]), Err(PackError::InvalidPackSizes(_))));
/// ```
pub fn solve(order_quantity: i64, pack_sizes: &[i64]) -> Result<PackingResult, PackError> {
    let quantity = OrderQuantity::new(order_quantity)?;
    let sizes = PackSizeSet::new(pack_sizes.iter().copied())?;
    solve_validated(quantity, &sizes)
}

/// Compute the optimal packing for already-validated input.
pub fn solve_validated(
    quantity: OrderQuantity,
    pack_sizes: &PackSizeSet,
) -> Result<PackingResult, PackError> {
    let order = quantity.get();
    let ceiling = search_ceiling(quantity, pack_sizes)?;
    let descending = pack_sizes.descending();

    tracing::debug!(
        order_quantity = order,
        ceiling,
        pack_sizes = %pack_sizes,
        "building reachability table"
    );

    let table = ReachabilityTable::build(ceiling, &descending).map_err(|reason| {
        PackError::invalid_quantity(i64::try_from(order).unwrap_or(i64::MAX), reason)
    })?;

    let infeasible = || PackError::Infeasible {
        order_quantity: order,
        ceiling: ceiling as u64,
    };

    let start = usize::try_from(order).map_err(|_| infeasible())?;
    let best = table.min_reachable_from(start).ok_or_else(infeasible)?;
    let counts = table.backtrace(best).ok_or_else(infeasible)?;

    let result = PackingResult::from_counts(order, &counts);
    tracing::debug!(
        order_quantity = order,
        total_items = result.total_items,
        total_packs = result.total_packs,
        waste = result.waste,
        "selected packing"
    );
    Ok(result)
}

/// `order_quantity + max(pack_sizes)` as a table index.
fn search_ceiling(quantity: OrderQuantity, pack_sizes: &PackSizeSet) -> Result<usize, PackError> {
    let raw = i64::try_from(quantity.get()).unwrap_or(i64::MAX);
    quantity
        .get()
        .checked_add(pack_sizes.max())
        .and_then(|c| usize::try_from(c).ok())
        .ok_or_else(|| {
            PackError::invalid_quantity(
                raw,
                format!(
                    "search ceiling {} + {} exceeds the addressable range",
                    quantity,
                    pack_sizes.max()
                ),
            )
        })
}

/// How a total was reached: the previous total and the pack added to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    predecessor: usize,
    pack: u64,
}

/// One reachable total. Total `0` is the only entry without a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reach {
    min_packs: u64,
    link: Option<Link>,
}

/// `entries[s]` is `None` while `s` is unreachable.
#[derive(Debug)]
struct ReachabilityTable {
    entries: Vec<Option<Reach>>,
}

impl ReachabilityTable {
    /// Fill the table for totals `0..=ceiling`. `descending` must be sorted
    /// largest first; that order is the tie-break.
    ///
    /// Fails only when the table cannot be allocated.
    fn build(ceiling: usize, descending: &[u64]) -> Result<Self, String> {
        let len = ceiling
            .checked_add(1)
            .ok_or_else(|| format!("search ceiling {ceiling} exceeds the addressable range"))?;
        let mut entries: Vec<Option<Reach>> = Vec::new();
        entries
            .try_reserve_exact(len)
            .map_err(|e| format!("search table of {len} entries cannot be allocated: {e}"))?;
        entries.resize(len, None);
        entries[0] = Some(Reach {
            min_packs: 0,
            link: None,
        });

        let steps: Vec<(usize, u64)> = descending
            .iter()
            .filter_map(|&pack| usize::try_from(pack).ok().map(|step| (step, pack)))
            .collect();

        for sum in 0..len {
            let Some(current) = entries[sum] else {
                continue;
            };
            let candidate = current.min_packs + 1;
            for &(step, pack) in &steps {
                let Some(target) = sum.checked_add(step).filter(|t| *t <= ceiling) else {
                    continue;
                };
                let improves = entries[target].map_or(true, |e| candidate < e.min_packs);
                if improves {
                    entries[target] = Some(Reach {
                        min_packs: candidate,
                        link: Some(Link {
                            predecessor: sum,
                            pack,
                        }),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// Smallest reachable total `>= start`.
    fn min_reachable_from(&self, start: usize) -> Option<usize> {
        self.entries
            .get(start..)?
            .iter()
            .position(Option::is_some)
            .map(|offset| start + offset)
    }

    /// Packs per size along the link chain from `total` to zero.
    ///
    /// Returns `None` if the chain is broken, which a correctly built table
    /// never produces.
    fn backtrace(&self, total: usize) -> Option<BTreeMap<u64, u64>> {
        let mut counts = BTreeMap::new();
        let mut cursor = total;
        while cursor > 0 {
            let link = self.entries.get(cursor).copied().flatten()?.link?;
            if link.predecessor >= cursor {
                return None;
            }
            *counts.entry(link.pack).or_insert(0) += 1;
            cursor = link.predecessor;
        }
        Some(counts)
    }

    #[cfg(test)]
    fn min_packs(&self, total: usize) -> Option<u64> {
        self.entries.get(total).copied().flatten().map(|r| r.min_packs)
    }
}
