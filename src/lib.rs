//! Auction lineup optimization engine.
//!
//! Selects a fixed-size roster from a priced, projected-value player
//! pool under a budget cap and positional slot requirements, returning
//! up to K mutually distinct solutions ranked by total projection.
//! Two constraint layers apply on top of the pool: excludes (removed
//! before solving) and anchors (at least one match must appear in every
//! solution).
//!
//! Two solving strategies are provided:
//!
//! - **Heuristic** ([`optimize_heuristic`]): a deterministic slot-aware
//!   local search — cheapest-fit seeding, budget repair, gain-per-cost
//!   upgrades, and single-slot diversification. Handles arbitrary
//!   roster specs including the flexible slot, and never fails:
//!   infeasible inputs yield partial or over-budget best-effort
//!   lineups.
//! - **Exact** ([`optimize_exact`]): a per-rank 0/1 integer program
//!   over a fixed 7-item roster shape, solved with HiGHS, banning each
//!   accepted player set from subsequent ranks. Unmatched anchors and
//!   backend failures are typed, caller-visible errors.
//!
//! Execution is single-threaded, synchronous, and request-scoped:
//! nothing is shared or persisted across optimization requests.

pub mod error;
pub mod exact;
pub mod heuristic;
pub mod pool;
pub mod roster;
pub mod solution;

pub use error::ExactError;
pub use exact::{optimize_exact, ExactConfig, ExactRunner};
pub use heuristic::{optimize_heuristic, HeuristicConfig, HeuristicRunner};
pub use pool::{Pool, Position, RawItem};
pub use roster::{RosterOverrides, RosterSpec};
pub use solution::{LineupSolution, RankedSolution};
