// 🔗 Inner Join - explicit key-matched merge of two collections
// Unmatched keys on either side are dropped, never filled

use std::collections::HashMap;
use std::hash::Hash;

/// Join `left` and `right` on the keys produced by `left_key`/`right_key`.
///
/// Output follows `left` order; a left row matching several right rows
/// produces one output per match, in `right` order.
pub fn inner_join<L, R, K, O>(
    left: &[L],
    right: &[R],
    left_key: impl Fn(&L) -> K,
    right_key: impl Fn(&R) -> K,
    combine: impl Fn(&L, &R) -> O,
) -> Vec<O>
where
    K: Eq + Hash,
{
    let mut index: HashMap<K, Vec<&R>> = HashMap::with_capacity(right.len());
    for row in right {
        index.entry(right_key(row)).or_default().push(row);
    }

    let mut joined = Vec::new();
    for l in left {
        if let Some(matches) = index.get(&left_key(l)) {
            for r in matches {
                joined.push(combine(l, *r));
            }
        }
    }

    joined
}
