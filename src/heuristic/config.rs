//! Heuristic engine configuration.

use crate::roster::RosterSpec;

/// Configuration for the slot-aware local search engine.
///
/// The three iteration caps are safety valves against non-convergence,
/// not tuning knobs; termination is guaranteed by the cap, not by any
/// convergence proof.
#[derive(Debug, Clone)]
pub struct HeuristicConfig {
    /// Inclusive budget cap.
    pub budget: f64,

    /// Requested number of distinct solutions (may not be satisfiable).
    pub solutions: usize,

    /// Slot counts to fill.
    pub roster: RosterSpec,

    /// Hard cap on cost-reduction swaps while over budget.
    pub cost_reduction_iterations: usize,

    /// Hard cap on upgrade swaps while budget remains.
    pub upgrade_iterations: usize,

    /// Alternatives tried per slot during diversification.
    pub alternatives_per_slot: usize,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            budget: 180.0,
            solutions: 5,
            roster: RosterSpec::default(),
            cost_reduction_iterations: 200,
            upgrade_iterations: 600,
            alternatives_per_slot: 12,
        }
    }
}

impl HeuristicConfig {
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_solutions(mut self, solutions: usize) -> Self {
        self.solutions = solutions;
        self
    }

    pub fn with_roster(mut self, roster: RosterSpec) -> Self {
        self.roster = roster;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(format!("budget must be non-negative, got {}", self.budget));
        }
        if self.solutions == 0 {
            return Err("solutions must be at least 1".into());
        }
        if self.roster.total_slots() == 0 {
            return Err("roster must have at least one slot".into());
        }
        Ok(())
    }
}
