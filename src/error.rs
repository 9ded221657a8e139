//! Typed failure kinds for the exact engine.
//!
//! The heuristic engine never fails: it always returns a best-effort
//! list. The exact engine's terminal failures are caller-visible and
//! distinguishable by kind.

use thiserror::Error;

use crate::exact::SolverError;

/// Terminal failures of the exact engine.
#[derive(Debug, Error)]
pub enum ExactError {
    /// One or more anchor names matched nothing in the pool. Raised
    /// before any solve attempt; enumerates every unmatched name.
    #[error("anchors not found in the player pool (check spelling): {}", .0.join(", "))]
    AnchorsNotFound(Vec<String>),

    /// The optimization backend is missing or could not be initialized.
    #[error("optimization backend unavailable: {0}")]
    SolverUnavailable(String),

    /// The backend failed with an unexpected computation error.
    /// Infeasible and non-optimal statuses are not errors; they end the
    /// rank loop instead.
    #[error("optimization failed: {0}")]
    Solver(String),
}

impl From<SolverError> for ExactError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::Unavailable(message) => ExactError::SolverUnavailable(message),
            SolverError::Backend(message) => ExactError::Solver(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors_not_found_enumerates_names() {
        let err = ExactError::AnchorsNotFound(vec!["Foo Bar".into(), "Baz".into()]);
        let message = err.to_string();
        assert!(message.contains("Foo Bar"));
        assert!(message.contains("Baz"));
        assert!(message.contains("check spelling"));
    }

    #[test]
    fn test_solver_error_kinds_map_distinctly() {
        let unavailable: ExactError = SolverError::Unavailable("no backend".into()).into();
        let backend: ExactError = SolverError::Backend("numeric failure".into()).into();

        assert!(matches!(unavailable, ExactError::SolverUnavailable(_)));
        assert!(matches!(backend, ExactError::Solver(_)));
    }
}
