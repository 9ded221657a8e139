//! Solution payloads, player-set signatures, and ranking.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::pool::Position;

/// One bound player in a heuristic lineup payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupPlayer {
    pub name: String,
    pub position: Position,
    /// Rounded to 2 decimals.
    pub price: f64,
    /// Rounded to 4 decimals.
    pub projection: f64,
    pub anchor: bool,
    pub excluded: bool,
}

/// A heuristic-engine solution.
///
/// `within_budget` surfaces the documented degenerate case: cost
/// reduction can run out of cheaper swaps while the lineup still
/// exceeds the cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSolution {
    pub players: Vec<LineupPlayer>,
    pub total_price: f64,
    pub total_projection: f64,
    pub within_budget: bool,
}

impl LineupSolution {
    /// The player-set identity of this solution.
    pub fn signature(&self) -> String {
        signature(self.players.iter().map(|p| p.name.as_str()))
    }
}

/// One labeled row of an exact-engine solution table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotLine {
    pub slot: String,
    pub name: String,
    pub position: Position,
    pub price: f64,
    pub projection: f64,
}

/// An exact-engine solution at a given rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSolution {
    pub rank: usize,
    pub total_price: i64,
    pub total_projection: f64,
    pub slots: Vec<SlotLine>,
}

/// Order-independent identity of a player set.
///
/// Two solutions with the same players are the same solution regardless
/// of slot arrangement.
pub fn signature<'a, I: IntoIterator<Item = &'a str>>(names: I) -> String {
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_unstable();
    names.join("\u{1f}")
}

/// Deduplicates by player-set signature, sorts by total projection
/// descending, and truncates to `k`. Never pads.
pub fn rank_lineups(solutions: Vec<LineupSolution>, k: usize) -> Vec<LineupSolution> {
    let mut seen = HashSet::new();
    let mut distinct: Vec<LineupSolution> = solutions
        .into_iter()
        .filter(|s| seen.insert(s.signature()))
        .collect();
    distinct.sort_by(|a, b| b.total_projection.total_cmp(&a.total_projection));
    distinct.truncate(k);
    distinct
}

/// Rounds to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Clamps a caller-supplied budget to a finite non-negative value.
///
/// NaN and negative budgets become 0.0; `+inf` becomes `f64::MAX`, so
/// an unbounded budget behaves as "no effective cap".
pub(crate) fn sanitize_budget(budget: f64) -> f64 {
    if budget.is_nan() {
        return 0.0;
    }
    budget.clamp(0.0, f64::MAX)
}
