//! Lineup snapshots: slot lists bound to pool indices.

use crate::pool::Pool;
use crate::roster::{RosterSpec, SlotKind};
use crate::solution::{round_to, signature, LineupPlayer, LineupSolution};

/// One roster slot, optionally bound to a pool item.
///
/// Anchored slots are locked at seed time and never swapped by any
/// later phase.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub kind: SlotKind,
    pub item: Option<usize>,
    pub anchored: bool,
}

/// A slot-list snapshot over one pool.
///
/// Each search phase takes a snapshot and returns a new one; lineups
/// are never mutated across phase boundaries.
#[derive(Debug, Clone)]
pub struct Lineup {
    pub slots: Vec<Slot>,
}

impl Lineup {
    /// An empty lineup with the spec's concrete slot list.
    pub fn from_spec(spec: &RosterSpec) -> Self {
        Self {
            slots: spec
                .slot_kinds()
                .into_iter()
                .map(|kind| Slot {
                    kind,
                    item: None,
                    anchored: false,
                })
                .collect(),
        }
    }

    /// Pool indices currently bound, as a membership mask.
    pub fn used_mask(&self, pool_len: usize) -> Vec<bool> {
        let mut used = vec![false; pool_len];
        for slot in &self.slots {
            if let Some(i) = slot.item {
                used[i] = true;
            }
        }
        used
    }

    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|s| s.item.is_some()).count()
    }

    pub fn total_price(&self, pool: &Pool) -> f64 {
        self.slots
            .iter()
            .filter_map(|s| s.item)
            .map(|i| pool.items()[i].price)
            .sum()
    }

    pub fn total_projection(&self, pool: &Pool) -> f64 {
        self.slots
            .iter()
            .filter_map(|s| s.item)
            .map(|i| pool.items()[i].projection)
            .sum()
    }

    /// Player-set identity of the bound items.
    pub fn signature(&self, pool: &Pool) -> String {
        signature(
            self.slots
                .iter()
                .filter_map(|s| s.item)
                .map(|i| pool.items()[i].name.as_str()),
        )
    }

    /// Converts the snapshot into the caller-facing payload.
    pub fn to_solution(&self, pool: &Pool, budget: f64) -> LineupSolution {
        let players: Vec<LineupPlayer> = self
            .slots
            .iter()
            .filter_map(|s| s.item)
            .map(|i| {
                let item = &pool.items()[i];
                LineupPlayer {
                    name: item.name.clone(),
                    position: item.position,
                    price: round_to(item.price, 2),
                    projection: round_to(item.projection, 4),
                    anchor: item.anchor,
                    excluded: item.excluded,
                }
            })
            .collect();

        let total_price = round_to(self.total_price(pool), 2);
        LineupSolution {
            total_projection: round_to(self.total_projection(pool), 4),
            within_budget: total_price <= budget,
            total_price,
            players,
        }
    }
}
