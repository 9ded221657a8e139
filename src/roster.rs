//! Roster slot specification: counts per position plus one flexible slot.

use serde::{Deserialize, Serialize};

use crate::pool::Position;

/// Positions a FLEX slot accepts.
pub const FLEX_POSITIONS: [Position; 3] = [Position::Rb, Position::Wr, Position::Te];

/// A slot-type rule: either an exact position or the flexible meta-slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Base(Position),
    Flex,
}

impl SlotKind {
    /// Whether an item at `position` may fill this slot.
    pub fn compatible(&self, position: Position) -> bool {
        match self {
            SlotKind::Base(p) => *p == position,
            SlotKind::Flex => FLEX_POSITIONS.contains(&position),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotKind::Base(p) => p.as_str(),
            SlotKind::Flex => "FLEX",
        }
    }
}

/// Slot counts for one roster.
///
/// The default is the standard 7-slot auction shape. Specs are resolved
/// to a concrete slot list once per request and never resized mid-solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSpec {
    pub qb: usize,
    pub rb: usize,
    pub wr: usize,
    pub te: usize,
    pub k: usize,
    pub dst: usize,
    pub flex: usize,
}

impl Default for RosterSpec {
    fn default() -> Self {
        Self {
            qb: 1,
            rb: 2,
            wr: 2,
            te: 1,
            k: 0,
            dst: 0,
            flex: 1,
        }
    }
}

impl RosterSpec {
    /// Total number of slots in the resolved list.
    pub fn total_slots(&self) -> usize {
        self.qb + self.rb + self.wr + self.te + self.k + self.dst + self.flex
    }

    fn base_count(&self, position: Position) -> usize {
        match position {
            Position::Qb => self.qb,
            Position::Rb => self.rb,
            Position::Wr => self.wr,
            Position::Te => self.te,
            Position::K => self.k,
            Position::Dst => self.dst,
        }
    }

    /// The concrete slot list: base slots in declaration order
    /// (QB, RB, WR, TE, K, DST), flexible slots last.
    pub fn slot_kinds(&self) -> Vec<SlotKind> {
        let mut kinds = Vec::with_capacity(self.total_slots());
        for position in Position::ALL {
            for _ in 0..self.base_count(position) {
                kinds.push(SlotKind::Base(position));
            }
        }
        for _ in 0..self.flex {
            kinds.push(SlotKind::Flex);
        }
        kinds
    }

    /// Applies caller overrides on top of this spec.
    pub fn merge(mut self, overrides: &RosterOverrides) -> Self {
        if let Some(qb) = overrides.qb {
            self.qb = qb;
        }
        if let Some(rb) = overrides.rb {
            self.rb = rb;
        }
        if let Some(wr) = overrides.wr {
            self.wr = wr;
        }
        if let Some(te) = overrides.te {
            self.te = te;
        }
        if let Some(k) = overrides.k {
            self.k = k;
        }
        if let Some(dst) = overrides.dst {
            self.dst = dst;
        }
        if let Some(flex) = overrides.flex {
            self.flex = flex;
        }
        self
    }
}

/// Partial roster override supplied by a caller; unset fields keep the
/// default count.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RosterOverrides {
    #[serde(default, alias = "QB")]
    pub qb: Option<usize>,
    #[serde(default, alias = "RB")]
    pub rb: Option<usize>,
    #[serde(default, alias = "WR")]
    pub wr: Option<usize>,
    #[serde(default, alias = "TE")]
    pub te: Option<usize>,
    #[serde(default, alias = "K")]
    pub k: Option<usize>,
    #[serde(default, alias = "DST")]
    pub dst: Option<usize>,
    #[serde(default, alias = "FLEX")]
    pub flex: Option<usize>,
}
