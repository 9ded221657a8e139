//! Exact Top-K engine.
//!
//! Formulates lineup selection as a 0/1 integer program — one binary
//! variable per pool item — and solves one program per rank, banning
//! each accepted player set from later ranks. The fixed 7-item roster
//! shape (1 QB, ≥2 RB, ≥2 WR, ≥1 TE) leaves the residual slot implicit
//! in the total-count constraint. The solver backend sits behind
//! [`SelectionSolver`]; the default is HiGHS via good_lp.

mod config;
mod model;
mod runner;
mod solver;

pub use config::ExactConfig;
pub use model::{SelectionConstraint, SelectionModel};
pub use runner::{optimize_exact, ExactRunner};
pub use solver::{
    HighsSolver, ScriptedSolver, SelectionOutcome, SelectionSolver, SolveStatus, SolverError,
};
