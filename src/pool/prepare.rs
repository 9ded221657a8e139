//! Working pool construction from raw input records.

use tracing::debug;

use super::matching::{normalize_name, simplify_key};
use super::types::{Item, Position, RawItem};

/// The validated candidate pool for one optimization request.
///
/// Holds only working items: malformed records are dropped, negative
/// numerics clamped to zero, duplicate names collapsed, and excluded
/// items removed. The pool is immutable for the duration of a solve;
/// engines refer to items by index.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    items: Vec<Item>,
}

impl Pool {
    /// Builds the working pool from raw records.
    ///
    /// Records missing a name, position, price, or projection are dropped
    /// silently. When two records normalize to the same name key, the one
    /// with the higher projection (then the lower price) wins, keeping the
    /// first-seen pool position.
    pub fn prepare(raw: &[RawItem]) -> Pool {
        let mut items: Vec<Item> = Vec::with_capacity(raw.len());
        let mut dropped = 0usize;
        let mut excluded = 0usize;

        for record in raw {
            let Some(item) = validate(record) else {
                dropped += 1;
                continue;
            };
            if item.excluded {
                excluded += 1;
                continue;
            }
            match items.iter().position(|i| i.name_key == item.name_key) {
                Some(at) => {
                    let kept = &items[at];
                    if item.projection > kept.projection
                        || (item.projection == kept.projection && item.price < kept.price)
                    {
                        items[at] = item;
                    }
                }
                None => items.push(item),
            }
        }

        debug!(
            items = items.len(),
            dropped, excluded, "prepared working pool"
        );
        Pool { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Indices of working items flagged as anchors.
    pub fn anchor_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.anchor)
            .map(|(i, _)| i)
            .collect()
    }

    /// A new pool keeping only the items the predicate accepts.
    pub fn retain<F: Fn(&Item) -> bool>(&self, keep: F) -> Pool {
        Pool {
            items: self.items.iter().filter(|i| keep(i)).cloned().collect(),
        }
    }
}

/// Validates one raw record into an [`Item`], or drops it.
fn validate(raw: &RawItem) -> Option<Item> {
    let name = raw.name.as_deref()?.trim();
    if name.is_empty() {
        return None;
    }
    let position: Position = raw.position.as_deref()?.parse().ok()?;
    let price = raw.price?;
    let projection = raw.projection?;
    if !price.is_finite() || !projection.is_finite() {
        return None;
    }

    let name_key = normalize_name(name);
    Some(Item {
        name: name.to_string(),
        simple_key: simplify_key(&name_key),
        name_key,
        position,
        price: price.max(0.0),
        projection: projection.max(0.0),
        anchor: raw.anchor,
        excluded: raw.exclude,
    })
}
