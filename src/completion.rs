//! Completions and the completion joiner (§3, §4.F).

use std::rc::Rc;

use crate::effects::Effects;
use crate::realm::Realm;
use crate::value::{join_value, join_value_for_throw, Value};

/// Opaque identity of a `break`/`continue` target (a loop or a label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(pub u32);

/// Opaque source location carried by `Throw` completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation(pub u32);

/// The outcome of evaluating a fragment of the analysed program.
///
/// `JoinedNormalAndAbrupt.composed_with` makes this a DAG rather than a
/// strict tree (§9); sharing is expressed with `Rc` since the core is
/// single-threaded end to end (§5).
#[derive(Debug, Clone)]
pub enum Completion {
    Normal(Value),
    Throw(Value, SourceLocation),
    Return(Value),
    Break(Value, LabelId),
    Continue(Value, LabelId),
    JoinedAbrupt {
        cond: Value,
        consequent: Rc<Completion>,
        alternate: Rc<Completion>,
    },
    JoinedNormalAndAbrupt {
        cond: Value,
        consequent: Rc<Completion>,
        alternate: Rc<Completion>,
        composed_with: Option<Rc<Completion>>,
        path_conditions_at_creation: Vec<Value>,
        saved_effects: Option<Rc<Effects>>,
    },
}

impl Completion {
    pub fn joined_normal_and_abrupt(cond: Value, consequent: Completion, alternate: Completion) -> Completion {
        Completion::JoinedNormalAndAbrupt {
            cond,
            consequent: Rc::new(consequent),
            alternate: Rc::new(alternate),
            composed_with: None,
            path_conditions_at_creation: Vec::new(),
            saved_effects: None,
        }
    }

    /// §3: "any leaf other than `Normal`, or a `JoinedAbrupt`". A
    /// `JoinedNormalAndAbrupt` is not classified abrupt: by construction it
    /// always has a normal path reachable through it.
    pub fn is_abrupt(&self) -> bool {
        !matches!(self, Completion::Normal(_) | Completion::JoinedNormalAndAbrupt { .. })
    }

    /// `Rc`-sharing clone into a fresh node, used when building joined
    /// parents.
    pub fn shared(self) -> Rc<Completion> {
        Rc::new(self)
    }
}

/// §4.F: join two completions under `cond`.
///
/// Short-circuits on a statically known `cond`, collapses like-kinded
/// leaves into a single leaf, and otherwise builds a tagged join node.
pub fn join_completions(realm: &dyn Realm, cond: &Value, c1: &Completion, c2: &Completion) -> Completion {
    if let Some(known) = cond.known_bool() {
        return if known { c1.clone() } else { c2.clone() };
    }

    #[cfg(feature = "metrics")]
    let record_collapse = || crate::stats::record_completions_collapsed();
    #[cfg(not(feature = "metrics"))]
    let record_collapse = || ();

    match (c1, c2) {
        (Completion::Break(v1, t1), Completion::Break(v2, t2)) if t1 == t2 => {
            record_collapse();
            Completion::Break(join_value(realm, cond, Some(v1), Some(v2)), *t1)
        }
        (Completion::Continue(_, t1), Completion::Continue(_, t2)) if t1 == t2 => {
            record_collapse();
            Completion::Continue(Value::Empty, *t1)
        }
        (Completion::Return(v1), Completion::Return(v2)) => {
            record_collapse();
            Completion::Return(join_value(realm, cond, Some(v1), Some(v2)))
        }
        (Completion::Throw(v1, loc), Completion::Throw(v2, _)) => {
            record_collapse();
            Completion::Throw(join_value_for_throw(realm, cond, v1, v2), *loc)
        }
        (Completion::Normal(v1), Completion::Normal(v2)) => {
            record_collapse();
            Completion::Normal(join_value(realm, cond, Some(v1), Some(v2)))
        }
        _ => {
            if c1.is_abrupt() && c2.is_abrupt() {
                tracing::trace!("joining two abrupt completions of differing kind into JoinedAbrupt");
                #[cfg(feature = "metrics")]
                crate::stats::record_completions_joined();
                Completion::JoinedAbrupt {
                    cond: cond.clone(),
                    consequent: Rc::new(c1.clone()),
                    alternate: Rc::new(c2.clone()),
                }
            } else {
                tracing::trace!("joining a normal-carrying mix into JoinedNormalAndAbrupt");
                #[cfg(feature = "metrics")]
                crate::stats::record_completions_joined();
                Completion::joined_normal_and_abrupt(cond.clone(), c1.clone(), c2.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_realm::MockRealm;

    #[test]
    fn collapses_equal_target_breaks() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let l = LabelId(1);
        let joined = join_completions(
            &realm,
            &cond,
            &Completion::Break(Value::number(3.0), l),
            &Completion::Break(Value::number(4.0), l),
        );
        match joined {
            Completion::Break(v, t) => {
                assert_eq!(t, l);
                assert!(realm.is_conditional(&v));
            }
            other => panic!("expected a collapsed Break, got {other:?}"),
        }
    }

    #[test]
    fn differing_break_targets_do_not_collapse() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let joined = join_completions(
            &realm,
            &cond,
            &Completion::Break(Value::number(3.0), LabelId(1)),
            &Completion::Break(Value::number(4.0), LabelId(2)),
        );
        assert!(matches!(joined, Completion::JoinedAbrupt { .. }));
    }

    #[test]
    fn two_returns_collapse_to_one_return() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let joined = join_completions(
            &realm,
            &cond,
            &Completion::Return(Value::number(1.0)),
            &Completion::Return(Value::number(2.0)),
        );
        assert!(matches!(joined, Completion::Return(_)));
    }

    #[test]
    fn normal_and_abrupt_mix_produces_joined_normal_and_abrupt() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let joined = join_completions(
            &realm,
            &cond,
            &Completion::Normal(Value::number(1.0)),
            &Completion::Return(Value::number(2.0)),
        );
        assert!(matches!(joined, Completion::JoinedNormalAndAbrupt { .. }));
        assert!(!joined.is_abrupt());
    }

    #[test]
    fn short_circuits_on_concrete_true() {
        let realm = MockRealm::new();
        let cond = Value::boolean(true);
        let c1 = Completion::Normal(Value::number(1.0));
        let c2 = Completion::Normal(Value::number(2.0));
        let joined = join_completions(&realm, &cond, &c1, &c2);
        assert!(matches!(joined, Completion::Normal(Value::Concrete(crate::value::ConcreteValue::Number(n))) if n == 1.0));
    }
}
