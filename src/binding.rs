//! Variable bindings and the binding joiner (§4.D).

use std::collections::HashMap;

use crate::generator::Generator;
use crate::map_join::join_maps;
use crate::realm::Realm;
use crate::value::{join_value, Value};

/// Opaque identity of a variable binding slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(pub u32);

/// A binding's value together with whether it has *leaked*: become
/// reachable from code outside the branch that can observe or mutate it
/// before the join completes, which forces its joined value to `undefined`
/// (§4.D, rule 3).
#[derive(Debug, Clone)]
pub struct BindingEntry {
    pub value: Value,
    pub has_leaked: bool,
}

/// The possibly-rewritten per-branch generators plus the joined bindings
/// map that `joinBindings` returns (§4.D).
pub struct JoinedBindings {
    pub g1: Generator,
    pub g2: Generator,
    pub bindings: HashMap<BindingId, BindingEntry>,
}

/// §4.D: join two per-branch binding deltas under `cond`.
///
/// A binding missing from one delta takes its current (pre-branch) value
/// and leak flag from the realm. When exactly one side has leaked, the
/// un-leaked side's value is written as a compensating binding-assignment
/// onto the *leaked* side's generator, wrapping it rather than mutating it,
/// so generators already captured by other effects records are unaffected.
pub fn join_bindings(
    realm: &dyn Realm,
    cond: &Value,
    g1: &Generator,
    m1: &HashMap<BindingId, BindingEntry>,
    g2: &Generator,
    m2: &HashMap<BindingId, BindingEntry>,
) -> JoinedBindings {
    let mut g1_out = g1.clone();
    let mut g2_out = g2.clone();

    let bindings = join_maps(m1, m2, |id, e1, e2| {
        let current = || realm.current_binding(*id);
        let (v1, l1) = match e1 {
            Some(e) => (e.value.clone(), e.has_leaked),
            None => {
                let c = current();
                (c.value, c.has_leaked)
            }
        };
        let (v2, l2) = match e2 {
            Some(e) => (e.value.clone(), e.has_leaked),
            None => {
                let c = current();
                (c.value, c.has_leaked)
            }
        };

        let leaked = l1 || l2;
        if l1 != l2 {
            #[cfg(feature = "metrics")]
            crate::stats::record_leak_reconciliation();
            if l1 {
                g1_out = g1_out.with_binding_assignment(*id, v2.clone());
            } else {
                g2_out = g2_out.with_binding_assignment(*id, v1.clone());
            }
        }

        let value = if leaked { realm.undefined_value() } else { join_value(realm, cond, Some(&v1), Some(&v2)) };
        BindingEntry { value, has_leaked: leaked }
    });

    JoinedBindings { g1: g1_out, g2: g2_out, bindings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_realm::MockRealm;

    #[test]
    fn leak_asymmetry_wraps_the_leaked_side_with_the_unleaked_value() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let b = BindingId(1);

        let mut m1 = HashMap::new();
        m1.insert(b, BindingEntry { value: Value::number(5.0), has_leaked: false });
        let mut m2 = HashMap::new();
        m2.insert(b, BindingEntry { value: Value::number(9.0), has_leaked: true });

        let joined = join_bindings(&realm, &cond, &Generator::empty(), &m1, &Generator::empty(), &m2);

        assert!(joined.g1.is_empty(), "left did not leak, its generator stays untouched");
        assert!(!joined.g2.is_empty(), "right leaked, so right's generator is wrapped");

        let entry = &joined.bindings[&b];
        assert!(entry.has_leaked);
        assert!(matches!(entry.value, Value::Concrete(crate::value::ConcreteValue::Undefined)));
    }

    #[test]
    fn unleaked_binding_joins_its_value_normally() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let b = BindingId(1);

        let mut m1 = HashMap::new();
        m1.insert(b, BindingEntry { value: Value::number(1.0), has_leaked: false });
        let mut m2 = HashMap::new();
        m2.insert(b, BindingEntry { value: Value::number(2.0), has_leaked: false });

        let joined = join_bindings(&realm, &cond, &Generator::empty(), &m1, &Generator::empty(), &m2);
        assert!(joined.g1.is_empty());
        assert!(joined.g2.is_empty());
        let entry = &joined.bindings[&b];
        assert!(!entry.has_leaked);
        assert!(realm.is_conditional(&entry.value));
    }

    #[test]
    fn binding_missing_from_one_delta_falls_back_to_current_for_that_side() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let b = realm.register_current_binding(Value::number(42.0), false);

        let mut m1 = HashMap::new();
        m1.insert(b, BindingEntry { value: Value::number(42.0), has_leaked: false });

        let joined = join_bindings(&realm, &cond, &Generator::empty(), &m1, &Generator::empty(), &HashMap::new());
        let entry = &joined.bindings[&b];
        assert!(matches!(entry.value, Value::Concrete(crate::value::ConcreteValue::Number(n)) if n == 42.0));
    }
}
