//! # Packing Result
//!
//! The output of a successful optimization and its wire shape.
//!
//! Field names serialize in camelCase and the per-size count serializes as
//! `quantity`, matching the JSON contract the HTTP layer has always served:
//!
//! ```json
//! {"orderQuantity": 501, "totalItems": 750, "totalPacks": 2,
//!  "packs": [{"packSize": 500, "quantity": 1}, {"packSize": 250, "quantity": 1}],
//!  "waste": 249}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How many packs of one size a result ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackCount {
    /// The pack size.
    pub pack_size: u64,
    /// Number of packs of this size. Always greater than zero.
    #[serde(rename = "quantity")]
    pub count: u64,
}

/// The optimal packing for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingResult {
    /// The quantity that was ordered.
    pub order_quantity: u64,
    /// Items actually shipped. Never below `order_quantity`.
    pub total_items: u64,
    /// Packs actually shipped.
    pub total_packs: u64,
    /// Packs per size, largest size first, used sizes only.
    pub packs: Vec<PackCount>,
    /// `total_items - order_quantity`.
    pub waste: u64,
}

impl PackingResult {
    /// Assemble a result from per-size counts.
    ///
    /// Zero counts are dropped; the totals are derived from the counts so the
    /// arithmetic invariants hold by construction.
    pub(crate) fn from_counts(order_quantity: u64, counts: &BTreeMap<u64, u64>) -> Self {
        let packs: Vec<PackCount> = counts
            .iter()
            .rev()
            .filter(|(_, count)| **count > 0)
            .map(|(&pack_size, &count)| PackCount { pack_size, count })
            .collect();
        let total_items = packs.iter().map(|p| p.pack_size * p.count).sum();
        let total_packs = packs.iter().map(|p| p.count).sum();
        Self {
            order_quantity,
            total_items,
            total_packs,
            packs,
            waste: total_items.saturating_sub(order_quantity),
        }
    }

    /// Number of packs of `pack_size` in this result (zero if unused).
    pub fn count_of(&self, pack_size: u64) -> u64 {
        self.packs
            .iter()
            .find(|p| p.pack_size == pack_size)
            .map_or(0, |p| p.count)
    }
}

impl std::fmt::Display for PackingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let breakdown: Vec<String> = self
            .packs
            .iter()
            .map(|p| format!("{}x{}", p.count, p.pack_size))
            .collect();
        write!(
            f,
            "{} items in {} packs ({}), waste {}",
            self.total_items,
            self.total_packs,
            breakdown.join(" + "),
            self.waste
        )
    }
}
