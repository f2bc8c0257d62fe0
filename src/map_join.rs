//! Generic map join (§4.C), shared by the binding and property-binding
//! joiners: union the key sets of two maps and join the values found under
//! each key, falling back to a per-key default when a key is present on only
//! one side.

use std::collections::HashMap;
use std::hash::Hash;

/// Joins `m1` and `m2` over the union of their keys.
///
/// `join_one` is called for every key with `(Some(v1), Some(v2))`,
/// `(Some(v1), None)` or `(None, Some(v2))`. It never sees `(None, None)`,
/// since a key only appears in the union because it was present on at least
/// one side.
pub fn join_maps<K, V1, V2, O>(
    m1: &HashMap<K, V1>,
    m2: &HashMap<K, V2>,
    mut join_one: impl FnMut(&K, Option<&V1>, Option<&V2>) -> O,
) -> HashMap<K, O>
where
    K: Eq + Hash + Clone,
{
    let mut keys: Vec<&K> = m1.keys().collect();
    for k in m2.keys() {
        if !m1.contains_key(k) {
            keys.push(k);
        }
    }
    keys.into_iter().map(|k| (k.clone(), join_one(k, m1.get(k), m2.get(k)))).collect()
}
