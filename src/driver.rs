//! N-ary driver `mapAndJoin` (§4.I): evaluates a set of concrete values
//! under per-value path conditions and right-folds their effects together.

use crate::completion::Completion;
use crate::effects::{join_effects, Effects};
use crate::realm::Realm;
use crate::value::Value;

/// §4.I: for each `v` in `values`, derive `cond = cond_factory(v)`,
/// evaluate `f` for effects under that condition, then right-fold the
/// resulting effects records together with [`join_effects`].
///
/// # Panics
/// If `values` has fewer than two elements: joining requires at least two
/// branches (§7, a programmer error to call this with a singleton or empty
/// set).
pub fn map_and_join<T>(
    realm: &dyn Realm,
    values: &[T],
    cond_factory: impl Fn(&T) -> Value,
    mut f: impl FnMut(&T) -> Completion,
) -> Value {
    assert!(values.len() > 1, "mapAndJoin: requires at least two values to join");

    let mut acc: Option<Effects> = None;
    for v in values {
        let cond = cond_factory(v);
        let mut thunk = || f(v);
        let effects = realm.evaluate_for_effects(&cond, &mut thunk);
        acc = Some(match acc {
            None => effects,
            Some(current) => join_effects(realm, &cond, &effects, &current),
        });
    }

    let effects = acc.expect("mapAndJoin: loop runs at least twice per the length precondition");
    realm.apply_effects(&effects)
}
