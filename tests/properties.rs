use std::collections::{HashMap, HashSet};

use branch_join_core::binding::{join_bindings, BindingEntry, BindingId};
use branch_join_core::compose::compose_completions;
use branch_join_core::completion::{join_completions, Completion, LabelId};
use branch_join_core::descriptor::{join_descriptor, DataDescriptor, Descriptor};
use branch_join_core::effects::{join_effects, Effects};
use branch_join_core::generator::Generator;
use branch_join_core::testing::mock_realm::MockRealm;
use branch_join_core::value::{join_value, join_values, ConcreteValue, JoinPayload, ObjectId, Value};
use proptest::prelude::*;

fn empty_effects(result: Completion) -> Effects {
    Effects {
        result,
        generator: Generator::empty(),
        bindings: HashMap::new(),
        properties: HashMap::new(),
        created_objects: HashSet::new(),
        can_be_applied: true,
    }
}

proptest! {
    /// Invariant 1: short-circuit soundness. Bindings differ across `e1`/`e2`
    /// too, so a short-circuit that only checked the completion (and still
    /// merged bindings/properties/generator underneath) would fail this.
    #[test]
    fn prop_short_circuit_soundness(a in -1000.0f64..1000.0, b in -1000.0f64..1000.0) {
        let realm = MockRealm::new();
        let bid = BindingId(1);
        let mut e1 = empty_effects(Completion::Normal(Value::number(a)));
        e1.bindings.insert(bid, BindingEntry { value: Value::number(a), has_leaked: false });
        let mut e2 = empty_effects(Completion::Normal(Value::number(b)));
        e2.bindings.insert(bid, BindingEntry { value: Value::number(b), has_leaked: false });

        let joined_true = join_effects(&realm, &Value::boolean(true), &e1, &e2);
        prop_assert!(matches!(joined_true.result, Completion::Normal(Value::Concrete(ConcreteValue::Number(n))) if n == a));
        prop_assert!(matches!(joined_true.bindings[&bid].value, Value::Concrete(ConcreteValue::Number(n)) if n == a));

        let joined_false = join_effects(&realm, &Value::boolean(false), &e1, &e2);
        prop_assert!(matches!(joined_false.result, Completion::Normal(Value::Concrete(ConcreteValue::Number(n))) if n == b));
        prop_assert!(matches!(joined_false.bindings[&bid].value, Value::Concrete(ConcreteValue::Number(n)) if n == b));
    }

    /// Invariant 2: identity on equal concrete values.
    #[test]
    fn prop_identity_on_equal_values(v in -1000.0f64..1000.0) {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let joined = join_value(&realm, &cond, Some(&Value::number(v)), Some(&Value::number(v)));
        prop_assert!(matches!(joined, Value::Concrete(ConcreteValue::Number(n)) if n == v));

        let payload_joined = join_values(
            &realm,
            &cond,
            Some(&JoinPayload::Value(Value::number(v))),
            Some(&JoinPayload::Value(Value::number(v))),
        );
        match payload_joined {
            JoinPayload::Value(Value::Concrete(ConcreteValue::Number(n))) => prop_assert_eq!(n, v),
            other => prop_assert!(false, "expected an unwrapped number payload, got {:?}", other),
        }
    }

    /// Invariant 3: two `Return`s always collapse, never split into a
    /// `JoinedNormalAndAbrupt`.
    #[test]
    fn prop_returns_always_collapse(a in -1000.0f64..1000.0, b in -1000.0f64..1000.0) {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let joined = join_completions(&realm, &cond, &Completion::Return(Value::number(a)), &Completion::Return(Value::number(b)));
        prop_assert!(matches!(joined, Completion::Return(_)));
    }

    /// Invariant 4: `Break`s with differing targets never collapse.
    #[test]
    fn prop_break_targets_discriminate(t1 in 0u32..50, t2 in 0u32..50) {
        prop_assume!(t1 != t2);
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let joined = join_completions(
            &realm,
            &cond,
            &Completion::Break(Value::number(1.0), LabelId(t1)),
            &Completion::Break(Value::number(2.0), LabelId(t2)),
        );
        prop_assert!(matches!(joined, Completion::JoinedAbrupt { .. }));
    }

    /// Invariant 5: created-object sets union exactly.
    #[test]
    fn prop_created_objects_union_exactly(left in proptest::collection::hash_set(0u64..50, 0..8), right in proptest::collection::hash_set(0u64..50, 0..8)) {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let mut e1 = empty_effects(Completion::Normal(Value::undefined()));
        e1.created_objects = left.iter().map(|id| ObjectId(*id)).collect();
        let mut e2 = empty_effects(Completion::Normal(Value::undefined()));
        e2.created_objects = right.iter().map(|id| ObjectId(*id)).collect();

        let joined = join_effects(&realm, &cond, &e1, &e2);
        let expected: HashSet<ObjectId> = left.union(&right).map(|id| ObjectId(*id)).collect();
        prop_assert_eq!(joined.created_objects, expected);
    }

    /// Invariant 6: leak monotonicity.
    #[test]
    fn prop_leak_monotonicity(l1 in any::<bool>(), l2 in any::<bool>(), v1 in -100.0f64..100.0, v2 in -100.0f64..100.0) {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let b = BindingId(1);
        let mut m1 = HashMap::new();
        m1.insert(b, BindingEntry { value: Value::number(v1), has_leaked: l1 });
        let mut m2 = HashMap::new();
        m2.insert(b, BindingEntry { value: Value::number(v2), has_leaked: l2 });

        let joined = join_bindings(&realm, &cond, &Generator::empty(), &m1, &Generator::empty(), &m2);
        let entry = &joined.bindings[&b];
        prop_assert_eq!(entry.has_leaked, l1 || l2);
        if entry.has_leaked {
            prop_assert!(matches!(entry.value, Value::Concrete(ConcreteValue::Undefined)));
        }
    }

    /// Invariant 8: composer left-abrupt dominance.
    #[test]
    fn prop_composer_left_abrupt_dominance(x in -1000.0f64..1000.0, right_is_normal in any::<bool>(), y in -1000.0f64..1000.0) {
        let left = Completion::Throw(Value::number(x), branch_join_core::completion::SourceLocation(0));
        let right = if right_is_normal { Completion::Normal(Value::number(y)) } else { Completion::Return(Value::number(y)) };
        let composed = compose_completions(Some(&left), &right);
        prop_assert!(matches!(composed, Completion::Throw(Value::Concrete(ConcreteValue::Number(n)), _) if n == x));
    }
}

#[test]
fn invariant_7_descriptor_symmetry_for_equal_data_descriptors() {
    let realm = MockRealm::new();
    let cond = realm.fresh_abstract_condition("a");
    let d = Descriptor::Data(DataDescriptor { value: Value::number(5.0), writable: true, enumerable: true, configurable: true });
    let joined = join_descriptor(&realm, &cond, Some(&d), Some(&d)).unwrap();
    match joined {
        Descriptor::Data(joined_data) => assert!(matches!(joined_data.value, Value::Concrete(ConcreteValue::Number(n)) if n == 5.0)),
        other => panic!("expected a data descriptor, got {other:?}"),
    }
}

#[test]
fn invariant_9_generator_wrap_preserves_order() {
    let g = Generator::opaque(branch_join_core::generator::OpaqueEffectId(1))
        .appended(&Generator::opaque(branch_join_core::generator::OpaqueEffectId(2)));
    let wrapped = g.with_binding_assignment(BindingId(9), Value::number(1.0));
    let order = wrapped.entries_in_order();
    assert_eq!(order.len(), 3);
    assert_eq!(order[2], branch_join_core::generator::EmittedEntry::BindingAssignment(BindingId(9)));
    assert_eq!(order[..2], g.entries_in_order()[..]);
}
