//! Top-K rank loop: one ILP per rank with iterative exclusion.

use tracing::{debug, info};

use super::config::ExactConfig;
use super::model::SelectionModel;
use super::solver::{HighsSolver, SelectionSolver, SolveStatus};
use crate::error::ExactError;
use crate::pool::{anchor_groups, Pool, Position, RawItem};
use crate::solution::{round_to, sanitize_budget, RankedSolution, SlotLine};

/// Fixed roster size of the exact formulation.
const ROSTER_SIZE: usize = 7;

/// Executes the exact engine.
pub struct ExactRunner;

impl ExactRunner {
    /// Produces up to `config.solutions` ranked lineups.
    ///
    /// Anchors are resolved before any solve; an unmatched anchor is a
    /// terminal error. A non-optimal solver status ends the loop and
    /// returns the ranks found so far — possibly none.
    pub fn run(
        pool: &Pool,
        config: &ExactConfig,
        solver: &dyn SelectionSolver,
    ) -> Result<Vec<RankedSolution>, ExactError> {
        config.validate().expect("invalid ExactConfig");

        let groups = anchor_groups(pool, &config.anchors);
        let unmatched: Vec<String> = groups
            .iter()
            .filter(|g| g.indices.is_empty())
            .map(|g| g.name.clone())
            .collect();
        if !unmatched.is_empty() {
            return Err(ExactError::AnchorsNotFound(unmatched));
        }

        let mut banned: Vec<Vec<usize>> = Vec::new();
        let mut solutions = Vec::new();

        for rank in 1..=config.solutions {
            let model = build_model(pool, config, &groups, &banned);
            let outcome = solver.solve(&model)?;
            if outcome.status != SolveStatus::Optimal {
                debug!(rank, "no further optimal selection; stopping");
                break;
            }

            info!(
                rank,
                projection = outcome.objective,
                players = outcome.chosen.len(),
                solver = solver.name(),
                "accepted lineup"
            );
            let solution = label_solution(pool, rank, &outcome.chosen);
            banned.push(outcome.chosen);
            solutions.push(solution);
        }

        Ok(solutions)
    }
}

/// Exact entry point: prepares the pool and solves with HiGHS.
pub fn optimize_exact(
    items: &[RawItem],
    budget: f64,
    k: usize,
    anchors: &[String],
) -> Result<Vec<RankedSolution>, ExactError> {
    let pool = Pool::prepare(items);
    let config = ExactConfig::default()
        .with_budget(sanitize_budget(budget))
        .with_solutions(k.max(1))
        .with_anchors(anchors.to_vec());
    ExactRunner::run(&pool, &config, &HighsSolver::new())
}

/// Builds the per-rank formulation.
///
/// Maximize projection subject to: price within budget, exactly 7
/// selected, 1 QB, ≥2 RB, ≥2 WR, ≥1 TE, at least one item per anchor
/// group, and for every previously accepted set S at most |S|−1 of its
/// members (forbidding exact repeats).
fn build_model(
    pool: &Pool,
    config: &ExactConfig,
    groups: &[crate::pool::AnchorGroup],
    banned: &[Vec<usize>],
) -> SelectionModel {
    let items = pool.items();
    let mut model = SelectionModel::new(items.iter().map(|i| i.projection).collect());

    model.weighted_at_most(items.iter().map(|i| i.price).collect(), config.budget);
    model.count_equal((0..items.len()).collect(), ROSTER_SIZE);

    let at_position = |position: Position| -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, i)| i.position == position)
            .map(|(i, _)| i)
            .collect()
    };
    model.count_equal(at_position(Position::Qb), 1);
    model.count_at_least(at_position(Position::Rb), 2);
    model.count_at_least(at_position(Position::Wr), 2);
    model.count_at_least(at_position(Position::Te), 1);

    for group in groups {
        model.count_at_least(group.indices.clone(), 1);
    }
    for set in banned {
        model.count_at_most(set.clone(), set.len().saturating_sub(1));
    }

    model
}

/// Derives the presentation slot labels for a selected set.
///
/// QB, RB1, RB2, WR1, WR2, TE take the highest-projected selections at
/// their positions; the residual item becomes FLEX. Labeling never
/// affects feasibility.
fn label_solution(pool: &Pool, rank: usize, chosen: &[usize]) -> RankedSolution {
    let items = pool.items();
    let mut remaining: Vec<usize> = chosen.to_vec();
    remaining.sort_by(|&a, &b| items[b].projection.total_cmp(&items[a].projection));

    let mut slots = Vec::with_capacity(ROSTER_SIZE);
    let labeled: [(&str, Position); 6] = [
        ("QB", Position::Qb),
        ("RB1", Position::Rb),
        ("RB2", Position::Rb),
        ("WR1", Position::Wr),
        ("WR2", Position::Wr),
        ("TE", Position::Te),
    ];
    for (label, position) in labeled {
        if let Some(at) = remaining.iter().position(|&i| items[i].position == position) {
            slots.push(slot_line(pool, label, remaining.remove(at)));
        }
    }
    // The highest-projected residual fills FLEX.
    if !remaining.is_empty() {
        slots.push(slot_line(pool, "FLEX", remaining.remove(0)));
    }

    let total_price: f64 = chosen.iter().map(|&i| items[i].price).sum();
    let total_projection: f64 = chosen.iter().map(|&i| items[i].projection).sum();
    RankedSolution {
        rank,
        total_price: total_price.round() as i64,
        total_projection: round_to(total_projection, 4),
        slots,
    }
}

fn slot_line(pool: &Pool, label: &str, index: usize) -> SlotLine {
    let item = &pool.items()[index];
    SlotLine {
        slot: label.to_string(),
        name: item.name.clone(),
        position: item.position,
        price: item.price,
        projection: item.projection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::solver::{ScriptedSolver, SolverError};

    fn reference_pool() -> Vec<RawItem> {
        vec![
            RawItem::new("QB1", "QB", 20.0, 25.0),
            RawItem::new("QB2", "QB", 15.0, 18.0),
            RawItem::new("RB1", "RB", 18.0, 20.0),
            RawItem::new("RB2", "RB", 10.0, 12.0),
            RawItem::new("RB3", "RB", 8.0, 9.0),
            RawItem::new("WR1", "WR", 22.0, 24.0),
            RawItem::new("WR2", "WR", 12.0, 14.0),
            RawItem::new("WR3", "WR", 9.0, 10.0),
            RawItem::new("TE1", "TE", 10.0, 11.0),
        ]
    }

    fn names(solution: &RankedSolution) -> Vec<&str> {
        solution.slots.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_reference_scenario_is_solved_optimally() {
        let solutions = optimize_exact(&reference_pool(), 90.0, 1, &[]).unwrap();

        assert_eq!(solutions.len(), 1);
        let best = &solutions[0];
        assert_eq!(best.rank, 1);
        assert_eq!(best.slots.len(), 7);
        assert_eq!(best.total_price, 87);
        assert_eq!(best.total_projection, 101.0);
        // Optimum drops QB2 and WR1.
        assert!(!names(best).contains(&"QB2"));
        assert!(!names(best).contains(&"WR1"));
    }

    #[test]
    fn test_slot_labels_follow_projection_order() {
        let solutions = optimize_exact(&reference_pool(), 90.0, 1, &[]).unwrap();
        let best = &solutions[0];

        let labels: Vec<&str> = best.slots.iter().map(|s| s.slot.as_str()).collect();
        assert_eq!(labels, vec!["QB", "RB1", "RB2", "WR1", "WR2", "TE", "FLEX"]);

        // RB1 label goes to the higher-projected back; FLEX takes the
        // residual third RB.
        assert_eq!(best.slots[1].name, "RB1");
        assert_eq!(best.slots[2].name, "RB2");
        assert_eq!(best.slots[3].name, "WR2");
        assert_eq!(best.slots[4].name, "WR3");
        assert_eq!(best.slots[6].slot, "FLEX");
        assert_eq!(best.slots[6].name, "RB3");
    }

    #[test]
    fn test_anchor_forces_inferior_player() {
        let solutions = optimize_exact(&reference_pool(), 90.0, 2, &["QB2".into()]).unwrap();

        assert!(!solutions.is_empty());
        for solution in &solutions {
            assert!(names(solution).contains(&"QB2"));
        }
        assert_eq!(solutions[0].total_projection, 98.0);
        assert_eq!(solutions[0].total_price, 86);
    }

    #[test]
    fn test_unmatched_anchor_fails_before_solving() {
        let err = optimize_exact(
            &reference_pool(),
            90.0,
            1,
            &["QB2".into(), "Nobody Home".into(), "Also Missing".into()],
        )
        .unwrap_err();

        match err {
            ExactError::AnchorsNotFound(missing) => {
                assert_eq!(missing, vec!["Nobody Home", "Also Missing"]);
            }
            other => panic!("expected AnchorsNotFound, got {other}"),
        }
    }

    #[test]
    fn test_banned_sets_yield_distinct_ranks() {
        let solutions = optimize_exact(&reference_pool(), 120.0, 3, &[]).unwrap();

        assert!(solutions.len() >= 2);
        let mut seen = std::collections::HashSet::new();
        for solution in &solutions {
            let mut set = names(solution);
            set.sort_unstable();
            assert!(seen.insert(set.join("|")), "duplicate player set");
        }
        for pair in solutions.windows(2) {
            assert!(pair[0].total_projection >= pair[1].total_projection);
            assert_eq!(pair[0].rank + 1, pair[1].rank);
        }
    }

    #[test]
    fn test_starvation_budget_returns_empty() {
        let solutions = optimize_exact(&reference_pool(), 50.0, 3, &[]).unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_non_finite_budget_is_sanitized() {
        // -inf clamps to a zero budget: infeasible, not a panic.
        let solutions = optimize_exact(&reference_pool(), f64::NEG_INFINITY, 1, &[]).unwrap();
        assert!(solutions.is_empty());

        let solutions = optimize_exact(&reference_pool(), f64::NAN, 1, &[]).unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_infeasible_pool_too_small_returns_empty() {
        let solutions = optimize_exact(
            &[RawItem::new("QB1", "QB", 1.0, 1.0)],
            100.0,
            1,
            &[],
        )
        .unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_excluded_player_never_selected() {
        let mut raw = reference_pool();
        raw[5] = raw[5].clone().excluded(); // WR1
        // Add a replacement so 7 players remain feasible.
        raw.push(RawItem::new("WR4", "WR", 5.0, 6.0));

        let solutions = optimize_exact(&raw, 90.0, 2, &[]).unwrap();

        assert!(!solutions.is_empty());
        for solution in &solutions {
            assert!(!names(solution).contains(&"WR1"));
        }
    }

    #[test]
    fn test_idempotent_across_runs() {
        let a = optimize_exact(&reference_pool(), 95.0, 3, &[]).unwrap();
        let b = optimize_exact(&reference_pool(), 95.0, 3, &[]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rank_loop_stops_on_scripted_non_optimal() {
        let pool = Pool::prepare(&reference_pool());
        let config = ExactConfig::default().with_budget(90.0).with_solutions(3);
        let solver = ScriptedSolver::new(vec![
            ScriptedSolver::optimal(vec![0, 2, 3, 5, 6, 8, 4], 100.0),
            // Second rank infeasible: loop must stop with one solution.
        ]);

        let solutions = ExactRunner::run(&pool, &config, &solver).unwrap();

        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].rank, 1);
    }

    #[test]
    fn test_rank_loop_propagates_solver_errors() {
        let pool = Pool::prepare(&reference_pool());
        let config = ExactConfig::default().with_budget(90.0).with_solutions(2);

        let unavailable = ScriptedSolver::new(vec![Err(SolverError::Unavailable(
            "HiGHS backend missing".into(),
        ))]);
        assert!(matches!(
            ExactRunner::run(&pool, &config, &unavailable),
            Err(ExactError::SolverUnavailable(_))
        ));

        let broken = ScriptedSolver::new(vec![Err(SolverError::Backend("boom".into()))]);
        assert!(matches!(
            ExactRunner::run(&pool, &config, &broken),
            Err(ExactError::Solver(_))
        ));
    }
}
