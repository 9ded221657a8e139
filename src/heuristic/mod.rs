//! Heuristic slot-aware engine.
//!
//! A deterministic local search over slot assignments: a cheapest-fit
//! seed is repaired toward the budget, upgraded by gain-per-cost swaps,
//! and diversified by single-slot perturbation into up to K distinct
//! lineups. Works for arbitrary roster specs, including the flexible
//! slot. Never fails; infeasibility produces partial or over-budget
//! lineups rather than errors.

mod config;
mod runner;
mod types;

pub use config::HeuristicConfig;
pub use runner::{optimize_heuristic, HeuristicRunner};
pub use types::{Lineup, Slot};
