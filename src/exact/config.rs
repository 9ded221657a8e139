//! Exact engine configuration.

/// Configuration for the Top-K exact engine.
///
/// The roster shape is fixed at 7 items (1 QB, ≥2 RB, ≥2 WR, ≥1 TE);
/// the residual slot falls out of the total rather than an explicit
/// flex variable.
#[derive(Debug, Clone)]
pub struct ExactConfig {
    /// Inclusive budget cap.
    pub budget: f64,

    /// Requested number of ranked solutions (may not be satisfiable).
    pub solutions: usize,

    /// Raw anchor names; each must match at least one pool item.
    pub anchors: Vec<String>,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            budget: 180.0,
            solutions: 5,
            anchors: Vec::new(),
        }
    }
}

impl ExactConfig {
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_solutions(mut self, solutions: usize) -> Self {
        self.solutions = solutions;
        self
    }

    pub fn with_anchors(mut self, anchors: Vec<String>) -> Self {
        self.anchors = anchors;
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
        Ok(())
    }
}
