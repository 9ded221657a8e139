//! Slot-aware local search: seed, cost reduction, upgrade, diversify.

use tracing::debug;

use super::config::HeuristicConfig;
use super::types::Lineup;
use crate::pool::{Pool, RawItem};
use crate::roster::{RosterOverrides, RosterSpec};
use crate::solution::{rank_lineups, sanitize_budget, LineupSolution};

/// Executes the heuristic engine.
///
/// Never fails: infeasible slots stay unbound and an unrepairable
/// over-budget lineup is returned with `within_budget = false`.
pub struct HeuristicRunner;

impl HeuristicRunner {
    /// Runs the full phase pipeline and returns up to `config.solutions`
    /// distinct lineups, best projection first.
    pub fn run(pool: &Pool, config: &HeuristicConfig) -> Vec<LineupSolution> {
        config.validate().expect("invalid HeuristicConfig");

        let seeded = seed(pool, &config.roster);
        debug!(
            bound = seeded.bound_count(),
            price = seeded.total_price(pool),
            "seeded lineup"
        );

        let repaired = reduce_cost(pool, &seeded, config);
        let best = upgrade(pool, &repaired, config);
        debug!(
            price = best.total_price(pool),
            projection = best.total_projection(pool),
            "local search converged"
        );

        let lineups = diversify(pool, &best, config);
        let solutions = lineups
            .iter()
            .map(|l| l.to_solution(pool, config.budget))
            .collect();
        rank_lineups(solutions, config.solutions)
    }
}

/// Heuristic entry point: prepares the pool, merges roster overrides
/// over the default spec, and runs the engine.
pub fn optimize_heuristic(
    items: &[RawItem],
    budget: f64,
    k: usize,
    overrides: Option<RosterOverrides>,
) -> Vec<LineupSolution> {
    let pool = Pool::prepare(items);
    let roster = RosterSpec::default().merge(&overrides.unwrap_or_default());
    let config = HeuristicConfig::default()
        .with_budget(sanitize_budget(budget))
        .with_solutions(k.max(1))
        .with_roster(roster);
    HeuristicRunner::run(&pool, &config)
}

/// Builds the initial lineup: anchors first, then cheapest-fit fill.
///
/// Anchors bind to the first compatible empty slot in list order; since
/// base slots precede the flexible slot, base placements are preferred.
/// An anchor with no compatible empty slot is dropped from placement.
/// Remaining slots each take the cheapest compatible unused item, ties
/// broken by higher projection; a slot with no candidate stays unbound.
pub(crate) fn seed(pool: &Pool, spec: &RosterSpec) -> Lineup {
    let mut lineup = Lineup::from_spec(spec);

    for idx in pool.anchor_indices() {
        let position = pool.items()[idx].position;
        match lineup
            .slots
            .iter_mut()
            .find(|s| s.item.is_none() && s.kind.compatible(position))
        {
            Some(slot) => {
                slot.item = Some(idx);
                slot.anchored = true;
            }
            None => debug!(anchor = %pool.items()[idx].name, "no open slot for anchor"),
        }
    }

    for at in 0..lineup.slots.len() {
        if lineup.slots[at].item.is_some() {
            continue;
        }
        let used = lineup.used_mask(pool.len());
        let kind = lineup.slots[at].kind;
        let cheapest = pool
            .items()
            .iter()
            .enumerate()
            .filter(|(i, item)| !used[*i] && kind.compatible(item.position))
            .min_by(|(_, a), (_, b)| {
                a.price
                    .total_cmp(&b.price)
                    .then(b.projection.total_cmp(&a.projection))
            });
        if let Some((i, _)) = cheapest {
            lineup.slots[at].item = Some(i);
        }
    }

    lineup
}

/// Swaps toward the budget while it is exceeded.
///
/// Per iteration: for every bound non-anchored slot, the cheapest
/// compatible unused replacement strictly cheaper than the occupant is
/// a candidate; the single largest price reduction wins (tie: higher
/// replacement projection). Stops early when no cheaper swap exists,
/// which may leave the lineup over budget.
pub(crate) fn reduce_cost(pool: &Pool, lineup: &Lineup, config: &HeuristicConfig) -> Lineup {
    let mut current = lineup.clone();

    for _ in 0..config.cost_reduction_iterations {
        if current.total_price(pool) <= config.budget {
            break;
        }

        let used = current.used_mask(pool.len());
        let mut best: Option<(usize, usize, f64, f64)> = None; // slot, item, saving, projection

        for (at, slot) in current.slots.iter().enumerate() {
            let Some(occupant) = slot.item else { continue };
            if slot.anchored {
                continue;
            }
            let occupant = &pool.items()[occupant];

            let replacement = pool
                .items()
                .iter()
                .enumerate()
                .filter(|(i, item)| {
                    !used[*i] && slot.kind.compatible(item.position) && item.price < occupant.price
                })
                .min_by(|(_, a), (_, b)| {
                    a.price
                        .total_cmp(&b.price)
                        .then(b.projection.total_cmp(&a.projection))
                });

            if let Some((i, item)) = replacement {
                let saving = occupant.price - item.price;
                let better = match best {
                    None => true,
                    Some((_, _, s, p)) => {
                        saving > s || (saving == s && item.projection > p)
                    }
                };
                if better {
                    best = Some((at, i, saving, item.projection));
                }
            }
        }

        match best {
            Some((at, i, _, _)) => current.slots[at].item = Some(i),
            None => break,
        }
    }

    current
}

/// Spends the remaining budget on projection upgrades.
///
/// Per iteration: candidate swaps must strictly raise projection with a
/// positive price increase that fits the remaining budget; the highest
/// gain-per-unit-cost swap is applied. Stops when no candidate exists.
pub(crate) fn upgrade(pool: &Pool, lineup: &Lineup, config: &HeuristicConfig) -> Lineup {
    let mut current = lineup.clone();

    for _ in 0..config.upgrade_iterations {
        let remaining = config.budget - current.total_price(pool);
        if remaining <= 0.0 {
            break;
        }

        let used = current.used_mask(pool.len());
        let mut best: Option<(usize, usize, f64)> = None; // slot, item, score

        for (at, slot) in current.slots.iter().enumerate() {
            let Some(occupant) = slot.item else { continue };
            if slot.anchored {
                continue;
            }
            let occupant = &pool.items()[occupant];

            for (i, item) in pool.items().iter().enumerate() {
                if used[i] || !slot.kind.compatible(item.position) {
                    continue;
                }
                let price_delta = item.price - occupant.price;
                let projection_delta = item.projection - occupant.projection;
                if projection_delta <= 0.0 || price_delta <= 0.0 || price_delta > remaining {
                    continue;
                }
                let score = projection_delta / price_delta;
                if best.is_none_or(|(_, _, s)| score > s) {
                    best = Some((at, i, score));
                }
            }
        }

        match best {
            Some((at, i, _)) => current.slots[at].item = Some(i),
            None => break,
        }
    }

    current
}

/// Produces distinct lineups by perturbing the best one.
///
/// For each non-anchored bound slot in order, up to
/// `alternatives_per_slot` compatible unused items are substituted in
/// descending projection order; each perturbed lineup is re-upgraded
/// and kept when its player-set signature is new. Stops once
/// `config.solutions` distinct lineups are collected.
pub(crate) fn diversify(pool: &Pool, best: &Lineup, config: &HeuristicConfig) -> Vec<Lineup> {
    let mut collected = vec![best.clone()];
    let mut seen = std::collections::HashSet::new();
    seen.insert(best.signature(pool));

    'slots: for at in 0..best.slots.len() {
        if collected.len() >= config.solutions {
            break;
        }
        let slot = best.slots[at];
        if slot.item.is_none() || slot.anchored {
            continue;
        }

        let used = best.used_mask(pool.len());
        let mut alternatives: Vec<usize> = pool
            .items()
            .iter()
            .enumerate()
            .filter(|(i, item)| !used[*i] && slot.kind.compatible(item.position))
            .map(|(i, _)| i)
            .collect();
        alternatives.sort_by(|&a, &b| {
            pool.items()[b]
                .projection
                .total_cmp(&pool.items()[a].projection)
        });

        for alternative in alternatives.into_iter().take(config.alternatives_per_slot) {
            if collected.len() >= config.solutions {
                break 'slots;
            }
            let mut perturbed = best.clone();
            perturbed.slots[at].item = Some(alternative);
            let improved = upgrade(pool, &perturbed, config);
            if seen.insert(improved.signature(pool)) {
                collected.push(improved);
            }
        }
    }

    collected
}
