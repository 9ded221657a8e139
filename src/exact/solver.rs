//! Solver interface and the HiGHS-backed implementation.
//!
//! The integer-programming backend sits behind [`SelectionSolver`] so
//! the concrete solver is swappable and the rank loop is testable with
//! a scripted double.

use std::cell::RefCell;
use std::collections::VecDeque;

use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel};
use thiserror::Error;

use super::model::{SelectionConstraint, SelectionModel};

/// Status of a solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal selection found.
    Optimal,
    /// No selection satisfies the constraints (or the model is
    /// unbounded, which selection models cannot meaningfully be).
    Infeasible,
}

/// Result of one solver invocation.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub status: SolveStatus,
    /// Indices of the selected items (empty unless `Optimal`).
    pub chosen: Vec<usize>,
    /// Objective value of the selection.
    pub objective: f64,
}

impl SelectionOutcome {
    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            chosen: Vec::new(),
            objective: 0.0,
        }
    }
}

/// Backend failures that are errors, as opposed to infeasibility.
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    /// The backend is missing or could not be initialized.
    #[error("{0}")]
    Unavailable(String),
    /// The backend failed mid-computation.
    #[error("{0}")]
    Backend(String),
}

/// A swappable 0/1 selection solver.
pub trait SelectionSolver {
    fn name(&self) -> &'static str;

    /// Solves the model, blocking until the backend returns a status.
    fn solve(&self, model: &SelectionModel) -> Result<SelectionOutcome, SolverError>;
}

/// HiGHS-based exact solver via good_lp.
#[derive(Debug, Default, Clone)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionSolver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, model: &SelectionModel) -> Result<SelectionOutcome, SolverError> {
        model.validate().map_err(SolverError::Backend)?;

        if model.num_items == 0 {
            // Nothing to select; feasible only if no constraint demands
            // a selection.
            let demands_selection = model.constraints.iter().any(|c| match c {
                SelectionConstraint::CountEqual { count, .. }
                | SelectionConstraint::CountAtLeast { count, .. } => *count > 0,
                _ => false,
            });
            return Ok(if demands_selection {
                SelectionOutcome::infeasible()
            } else {
                SelectionOutcome {
                    status: SolveStatus::Optimal,
                    chosen: Vec::new(),
                    objective: 0.0,
                }
            });
        }

        let mut vars = variables!();
        let xs: Vec<_> = (0..model.num_items)
            .map(|_| vars.add(variable().binary()))
            .collect();

        let objective: Expression = xs
            .iter()
            .zip(model.objective.iter())
            .map(|(x, c)| *c * *x)
            .sum();

        let mut problem = vars.maximise(&objective).using(highs);

        for c in &model.constraints {
            match c {
                SelectionConstraint::WeightedAtMost { coefficients, bound } => {
                    let lhs: Expression = xs
                        .iter()
                        .zip(coefficients.iter())
                        .map(|(x, w)| *w * *x)
                        .sum();
                    let bound = *bound;
                    problem = problem.with(constraint!(lhs <= bound));
                }
                SelectionConstraint::CountEqual { indices, count } => {
                    let lhs = count_expression(&xs, indices);
                    let count = *count as f64;
                    problem = problem.with(constraint!(lhs == count));
                }
                SelectionConstraint::CountAtLeast { indices, count } => {
                    let lhs = count_expression(&xs, indices);
                    let count = *count as f64;
                    problem = problem.with(constraint!(lhs >= count));
                }
                SelectionConstraint::CountAtMost { indices, count } => {
                    let lhs = count_expression(&xs, indices);
                    let count = *count as f64;
                    problem = problem.with(constraint!(lhs <= count));
                }
            }
        }

        match problem.solve() {
            Ok(solution) => {
                let chosen: Vec<usize> = xs
                    .iter()
                    .enumerate()
                    .filter(|(_, x)| solution.value(**x) > 0.5)
                    .map(|(i, _)| i)
                    .collect();
                let objective = chosen.iter().map(|&i| model.objective[i]).sum();
                Ok(SelectionOutcome {
                    status: SolveStatus::Optimal,
                    chosen,
                    objective,
                })
            }
            Err(ResolutionError::Infeasible) | Err(ResolutionError::Unbounded) => {
                Ok(SelectionOutcome::infeasible())
            }
            Err(other) => Err(SolverError::Backend(other.to_string())),
        }
    }
}

fn count_expression(xs: &[good_lp::Variable], indices: &[usize]) -> Expression {
    indices.iter().map(|&i| Expression::from(xs[i])).sum()
}

/// A scripted solver double for exercising the rank loop without a
/// backend: returns queued outcomes in order, then infeasible.
pub struct ScriptedSolver {
    script: RefCell<VecDeque<Result<SelectionOutcome, SolverError>>>,
}

impl ScriptedSolver {
    pub fn new(outcomes: Vec<Result<SelectionOutcome, SolverError>>) -> Self {
        Self {
            script: RefCell::new(outcomes.into()),
        }
    }

    pub fn optimal(chosen: Vec<usize>, objective: f64) -> Result<SelectionOutcome, SolverError> {
        Ok(SelectionOutcome {
            status: SolveStatus::Optimal,
            chosen,
            objective,
        })
    }
}

impl SelectionSolver for ScriptedSolver {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&self, _model: &SelectionModel) -> Result<SelectionOutcome, SolverError> {
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(SelectionOutcome::infeasible()))
    }
}
