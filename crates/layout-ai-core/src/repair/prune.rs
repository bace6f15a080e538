//! Group-and-cap reduction shared by the repair passes

use std::cmp::Ordering;
use std::collections::HashMap;

/// Keep at most `cap(key)` items of every group, preferring low scores.
///
/// Items are grouped by `key`. Within a group that exceeds its cap, items are
/// stably sorted by ascending `score(index, item)` (the index is the item's
/// position in the input) and the first `cap` survive. Groups without a cap
/// are kept whole. Survivors are returned in their original order.
pub fn prune_by_capacity<T, S>(
    items: Vec<T>,
    key: impl Fn(&T) -> String,
    cap: impl Fn(&str) -> Option<usize>,
    score: impl Fn(usize, &T) -> S,
) -> Vec<T>
where
    S: PartialOrd,
{
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let group_key = key(item);
        match group_index.get(&group_key) {
            Some(&g) => groups[g].1.push(index),
            None => {
                group_index.insert(group_key.clone(), groups.len());
                groups.push((group_key, vec![index]));
            }
        }
    }

    let mut keep = vec![true; items.len()];
    for (group_key, members) in &groups {
        let Some(limit) = cap(group_key) else {
            continue;
        };
        if members.len() <= limit {
            continue;
        }

        let mut scored: Vec<(S, usize)> = members
            .iter()
            .map(|&index| (score(index, &items[index]), index))
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        for (_, index) in scored.into_iter().skip(limit) {
            keep[index] = false;
        }
        tracing::debug!(
            "Capped '{}' at {} (had {})",
            group_key,
            limit,
            members.len()
        );
    }

    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, kept)| kept.then_some(item))
        .collect()
}
