//! Solver-agnostic 0/1 selection formulation.

/// A linear constraint over binary selection variables.
#[derive(Debug, Clone)]
pub enum SelectionConstraint {
    /// `sum(coefficients[i] * x[i]) <= bound` over all items.
    WeightedAtMost { coefficients: Vec<f64>, bound: f64 },
    /// Exactly `count` of the indexed items selected.
    CountEqual { indices: Vec<usize>, count: usize },
    /// At least `count` of the indexed items selected.
    CountAtLeast { indices: Vec<usize>, count: usize },
    /// At most `count` of the indexed items selected.
    CountAtMost { indices: Vec<usize>, count: usize },
}

/// A maximization problem over one binary variable per item.
///
/// The modeling layer only; solving happens behind the
/// [`SelectionSolver`](super::SelectionSolver) trait.
#[derive(Debug, Clone)]
pub struct SelectionModel {
    pub num_items: usize,
    /// Objective coefficient per item (maximized).
    pub objective: Vec<f64>,
    pub constraints: Vec<SelectionConstraint>,
}

impl SelectionModel {
    pub fn new(objective: Vec<f64>) -> Self {
        Self {
            num_items: objective.len(),
            objective,
            constraints: Vec::new(),
        }
    }

    /// `sum(weights[i] * x[i]) <= bound`.
    pub fn weighted_at_most(&mut self, coefficients: Vec<f64>, bound: f64) {
        self.constraints
            .push(SelectionConstraint::WeightedAtMost { coefficients, bound });
    }

    pub fn count_equal(&mut self, indices: Vec<usize>, count: usize) {
        self.constraints
            .push(SelectionConstraint::CountEqual { indices, count });
    }

    pub fn count_at_least(&mut self, indices: Vec<usize>, count: usize) {
        self.constraints
            .push(SelectionConstraint::CountAtLeast { indices, count });
    }

    pub fn count_at_most(&mut self, indices: Vec<usize>, count: usize) {
        self.constraints
            .push(SelectionConstraint::CountAtMost { indices, count });
    }

    /// Validates the model for consistency.
    ///
    /// Checks coefficient lengths and that all indices are in range.
    pub fn validate(&self) -> Result<(), String> {
        if self.objective.len() != self.num_items {
            return Err(format!(
                "objective has {} coefficients for {} items",
                self.objective.len(),
                self.num_items
            ));
        }
        for constraint in &self.constraints {
            match constraint {
                SelectionConstraint::WeightedAtMost { coefficients, .. } => {
                    if coefficients.len() != self.num_items {
                        return Err(format!(
                            "weighted constraint has {} coefficients for {} items",
                            coefficients.len(),
                            self.num_items
                        ));
                    }
                }
                SelectionConstraint::CountEqual { indices, .. }
                | SelectionConstraint::CountAtLeast { indices, .. }
                | SelectionConstraint::CountAtMost { indices, .. } => {
                    if let Some(&bad) = indices.iter().find(|&&i| i >= self.num_items) {
                        return Err(format!("index {bad} out of range for {} items", self.num_items));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sizes_from_objective() {
        let model = SelectionModel::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(model.num_items, 3);
        assert!(model.constraints.is_empty());
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_coefficient_length() {
        let mut model = SelectionModel::new(vec![1.0, 2.0]);
        model.weighted_at_most(vec![1.0], 10.0);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut model = SelectionModel::new(vec![1.0, 2.0]);
        model.count_at_least(vec![0, 5], 1);
        let err = model.validate().unwrap_err();
        assert!(err.contains("index 5"));
    }

    #[test]
    fn test_constraint_builders() {
        let mut model = SelectionModel::new(vec![1.0; 4]);
        model.weighted_at_most(vec![2.0; 4], 10.0);
        model.count_equal(vec![0, 1], 1);
        model.count_at_least(vec![2], 1);
        model.count_at_most(vec![0, 1, 2, 3], 3);

        assert_eq!(model.constraints.len(), 4);
        assert!(model.validate().is_ok());
    }
}
