//! The composer: glues a pending, possibly partially-abrupt completion onto
//! freshly observed effects (§4.H).

use crate::completion::Completion;
use crate::effects::{join_effects, Effects};
use crate::realm::Realm;
use crate::value::{join_value_padded, Value};

/// §4.H: compose a (possibly absent) pending completion `left` with a
/// freshly produced `right`.
///
/// A plain value on the left is treated as an implicit `Normal`. An abrupt
/// leaf on the left dominates: `right` is discarded entirely (invariant 8).
/// When `left` is `JoinedNormalAndAbrupt` and `right` is too, this is the
/// splice case: rather than mutating `right.composed_with` in place (as the
/// REDESIGN FLAGS call out), a new node is built carrying `right`'s
/// cond/consequent/alternate and `left`'s composed_with /
/// path_conditions_at_creation / saved_effects.
pub fn compose_completions(left: Option<&Completion>, right: &Completion) -> Completion {
    let left = match left {
        None => return right.clone(),
        Some(c) => c,
    };

    match left {
        Completion::JoinedNormalAndAbrupt {
            cond: left_cond,
            composed_with,
            path_conditions_at_creation,
            saved_effects,
            ..
        } => match right {
            Completion::JoinedNormalAndAbrupt { cond, consequent, alternate, .. } => {
                Completion::JoinedNormalAndAbrupt {
                    cond: cond.clone(),
                    consequent: consequent.clone(),
                    alternate: alternate.clone(),
                    composed_with: composed_with.clone(),
                    path_conditions_at_creation: path_conditions_at_creation.clone(),
                    saved_effects: saved_effects.clone(),
                }
            }
            _ => {
                let new_consequent = compose_completions(Some(left_branch(left, true)), right);
                let new_alternate = compose_completions(Some(left_branch(left, false)), right);
                let mut rebuilt = Completion::joined_normal_and_abrupt(left_cond.clone(), new_consequent, new_alternate);
                if let Completion::JoinedNormalAndAbrupt {
                    composed_with: rebuilt_cw,
                    path_conditions_at_creation: rebuilt_pc,
                    saved_effects: rebuilt_se,
                    ..
                } = &mut rebuilt
                {
                    *rebuilt_cw = composed_with.clone();
                    *rebuilt_pc = path_conditions_at_creation.clone();
                    *rebuilt_se = saved_effects.clone();
                }
                rebuilt
            }
        },
        other if other.is_abrupt() => other.clone(),
        _ => right.clone(),
    }
}

fn left_branch(left: &Completion, consequent: bool) -> &Completion {
    match left {
        Completion::JoinedNormalAndAbrupt { consequent: c, alternate: a, .. } => {
            if consequent {
                c
            } else {
                a
            }
        }
        _ => unreachable!("left_branch called on a non-JoinedNormalAndAbrupt completion"),
    }
}

/// §4.H: distribute a completion tree over observed effects `e`.
///
/// An abrupt leaf discards `e` and returns a fresh empty-effects carrying
/// just that completion (whatever `e` would have applied never ran on that
/// path). `Normal` replaces `e`'s result slot. A `JoinedNormalAndAbrupt`
/// recurses on both branches and rejoins via [`join_effects`].
pub fn compose_with_effects(realm: &dyn Realm, completion: &Completion, e: &Effects) -> Effects {
    match completion {
        Completion::JoinedNormalAndAbrupt { cond, consequent, alternate, .. } => {
            let e1 = compose_with_effects(realm, consequent, e);
            let e2 = compose_with_effects(realm, alternate, e);
            join_effects(realm, cond, &e1, &e2)
        }
        Completion::Normal(_) => e.shallow_clone_with_result(completion.clone()),
        abrupt => Effects {
            result: abrupt.clone(),
            generator: crate::generator::Generator::empty(),
            bindings: std::collections::HashMap::new(),
            properties: std::collections::HashMap::new(),
            created_objects: std::collections::HashSet::new(),
            can_be_applied: true,
        },
    }
}

/// A predicate over completion leaves used by
/// [`join_values_of_selected_completions`] to decide which leaves contribute
/// a value to the fold.
pub trait CompletionSelector {
    fn select(&self, leaf: &Completion) -> Option<Value>;
}

impl<F: Fn(&Completion) -> Option<Value>> CompletionSelector for F {
    fn select(&self, leaf: &Completion) -> Option<Value> {
        self(leaf)
    }
}

/// §4.H: folds a completion tree into a single value, joining selected
/// leaves and treating unselected ones as [`Value::Empty`].
///
/// A `JoinedNormalAndAbrupt` with a non-empty `composed_with` re-derives its
/// join condition from `composed_with` via
/// [`join_condition_for_selected_completions`] and re-joins the tree's own
/// value against the composed completion's value under that condition,
/// since `composed_with` represents effects layered on *after* this node was
/// created.
pub fn join_values_of_selected_completions(realm: &dyn Realm, sel: &dyn CompletionSelector, c: &Completion) -> Value {
    match c {
        Completion::JoinedAbrupt { cond, consequent, alternate } => {
            let a = join_values_of_selected_completions(realm, sel, consequent);
            let b = join_values_of_selected_completions(realm, sel, alternate);
            join_value_padded(realm, cond, Some(&a), Some(&b))
        }
        Completion::JoinedNormalAndAbrupt { cond, consequent, alternate, composed_with, .. } => {
            let a = join_values_of_selected_completions(realm, sel, consequent);
            let b = join_values_of_selected_completions(realm, sel, alternate);
            let base = join_value_padded(realm, cond, Some(&a), Some(&b));
            match composed_with {
                Some(cw) => {
                    let cw_cond = join_condition_for_selected_completions(realm, sel, cw);
                    let cw_value = join_values_of_selected_completions(realm, sel, cw);
                    join_value_padded(realm, &cw_cond, Some(&base), Some(&cw_value))
                }
                None => base,
            }
        }
        leaf => sel.select(leaf).unwrap_or(Value::Empty),
    }
}

/// Derives the abstract condition under which `c`'s selected leaves apply,
/// mirroring [`join_values_of_selected_completions`]'s own recursion but
/// folding booleans instead of values.
pub fn join_condition_for_selected_completions(realm: &dyn Realm, sel: &dyn CompletionSelector, c: &Completion) -> Value {
    match c {
        Completion::JoinedAbrupt { cond, consequent, alternate } | Completion::JoinedNormalAndAbrupt { cond, consequent, alternate, .. } => {
            let a = join_condition_for_selected_completions(realm, sel, consequent);
            let b = join_condition_for_selected_completions(realm, sel, alternate);
            join_value_padded(realm, cond, Some(&a), Some(&b))
        }
        leaf => Value::boolean(sel.select(leaf).is_some()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_realm::MockRealm;
    use std::rc::Rc;

    #[test]
    fn absent_left_yields_right() {
        let right = Completion::Normal(Value::number(1.0));
        assert!(matches!(compose_completions(None, &right), Completion::Normal(_)));
    }

    #[test]
    fn abrupt_left_dominates_and_discards_right() {
        let left = Completion::Return(Value::number(1.0));
        let right = Completion::Normal(Value::number(2.0));
        let composed = compose_completions(Some(&left), &right);
        assert!(matches!(composed, Completion::Return(_)));
    }

    #[test]
    fn splice_case_carries_lefts_composed_with_onto_rights_shape() {
        let realm = MockRealm::new();
        let cond1 = realm.fresh_abstract_condition("a");
        let cond2 = realm.fresh_abstract_condition("b");

        let marker = Rc::new(Completion::Normal(Value::number(99.0)));
        let left = Completion::JoinedNormalAndAbrupt {
            cond: cond1,
            consequent: Rc::new(Completion::Normal(Value::number(1.0))),
            alternate: Rc::new(Completion::Return(Value::number(2.0))),
            composed_with: Some(marker.clone()),
            path_conditions_at_creation: vec![],
            saved_effects: None,
        };
        let right = Completion::JoinedNormalAndAbrupt {
            cond: cond2,
            consequent: Rc::new(Completion::Normal(Value::number(3.0))),
            alternate: Rc::new(Completion::Return(Value::number(4.0))),
            composed_with: None,
            path_conditions_at_creation: vec![],
            saved_effects: None,
        };

        let composed = compose_completions(Some(&left), &right);
        match composed {
            Completion::JoinedNormalAndAbrupt { composed_with, .. } => {
                assert!(composed_with.is_some());
                assert!(Rc::ptr_eq(&composed_with.unwrap(), &marker));
            }
            other => panic!("expected a spliced JoinedNormalAndAbrupt, got {other:?}"),
        }
    }
}
