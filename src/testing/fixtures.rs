//! Canned inputs for the scenarios used throughout this crate's test suite,
//! so integration tests read as "run scenario N, check the invariant" rather
//! than re-deriving the same trees by hand each time.

use std::collections::HashMap;

use crate::binding::{BindingEntry, BindingId};
use crate::completion::{Completion, LabelId};
use crate::descriptor::{DataDescriptor, Descriptor};
use crate::property::{PropertyBinding, PropertyKey};
use crate::testing::mock_realm::MockRealm;
use crate::value::{ObjectId, Value};

/// S1: simple value join inputs, an abstract condition plus the two
/// "equal" and "distinct" pairs the scenario exercises.
///
/// # Example
///
/// ```
/// use branch_join_core::testing::fixtures::s1_simple_value_join;
/// use branch_join_core::value::{join_value, ConcreteValue, Value};
///
/// let (realm, cond, equal_pair, _distinct_pair) = s1_simple_value_join();
/// let joined = join_value(&realm, &cond, Some(&equal_pair.0), Some(&equal_pair.1));
/// assert!(matches!(joined, Value::Concrete(ConcreteValue::Number(n)) if n == 1.0));
/// ```
#[must_use]
pub fn s1_simple_value_join() -> (MockRealm, Value, (Value, Value), (Value, Value)) {
    let realm = MockRealm::new();
    let cond = realm.fresh_abstract_condition("alpha");
    (realm, cond, (Value::number(1.0), Value::number(1.0)), (Value::number(1.0), Value::number(2.0)))
}

/// S2: equal-target and differing-target `Break` completions.
#[must_use]
pub fn s2_equal_target_break() -> (MockRealm, Value, Completion, Completion) {
    let realm = MockRealm::new();
    let cond = realm.fresh_abstract_condition("alpha");
    let l = LabelId(1);
    (realm, cond, Completion::Break(Value::number(3.0), l), Completion::Break(Value::number(4.0), l))
}

#[must_use]
pub fn s2_differing_target_break() -> (MockRealm, Value, Completion, Completion) {
    let realm = MockRealm::new();
    let cond = realm.fresh_abstract_condition("alpha");
    (
        realm,
        cond,
        Completion::Break(Value::number(3.0), LabelId(1)),
        Completion::Break(Value::number(4.0), LabelId(2)),
    )
}

/// S3: a property created only on the right branch. `m1` has no entry,
/// the object was created on the right (`c2`), so the right descriptor
/// passes through verbatim.
#[must_use]
pub fn s3_property_created_only_on_right()
-> (MockRealm, Value, PropertyBinding, HashMap<PropertyBinding, Option<Descriptor>>, HashMap<PropertyBinding, Option<Descriptor>>)
{
    let realm = MockRealm::new();
    let cond = realm.fresh_abstract_condition("alpha");
    let object = ObjectId(1);
    let binding = PropertyBinding { object, key: PropertyKey::String("x".into()) };
    let m1 = HashMap::new();
    let mut m2 = HashMap::new();
    m2.insert(
        binding.clone(),
        Some(Descriptor::Data(DataDescriptor { value: Value::number(7.0), writable: true, enumerable: true, configurable: true })),
    );
    (realm, cond, binding, m1, m2)
}

/// S4: a property deleted on the left branch; the pre-branch descriptor
/// is registered on the realm so the joiner can materialize against it.
#[must_use]
pub fn s4_property_deleted_on_left()
-> (MockRealm, Value, PropertyBinding, HashMap<PropertyBinding, Option<Descriptor>>, HashMap<PropertyBinding, Option<Descriptor>>)
{
    let realm = MockRealm::new();
    let cond = realm.fresh_abstract_condition("alpha");
    let object = ObjectId(2);
    let binding = PropertyBinding { object, key: PropertyKey::String("y".into()) };
    realm.register_current_descriptor(
        binding.clone(),
        Descriptor::Data(DataDescriptor { value: Value::number(10.0), writable: true, enumerable: true, configurable: true }),
    );
    let mut m1 = HashMap::new();
    m1.insert(binding.clone(), None);
    let m2 = HashMap::new();
    (realm, cond, binding, m1, m2)
}

/// S5: leak asymmetry; left did not leak (value 5), right did (value 9).
#[must_use]
pub fn s5_leak_asymmetry() -> (MockRealm, Value, BindingId, HashMap<BindingId, BindingEntry>, HashMap<BindingId, BindingEntry>) {
    let realm = MockRealm::new();
    let cond = realm.fresh_abstract_condition("alpha");
    let b = BindingId(1);
    let mut m1 = HashMap::new();
    m1.insert(b, BindingEntry { value: Value::number(5.0), has_leaked: false });
    let mut m2 = HashMap::new();
    m2.insert(b, BindingEntry { value: Value::number(9.0), has_leaked: true });
    (realm, cond, b, m1, m2)
}

/// S6: `mapAndJoin` over a three-element set, `condFactory(v) = (x === v)`
/// (modeled here as a fresh abstract condition per value, since the concrete
/// equality primitive is out of scope) and `f(v) = Normal(v*2)`.
#[must_use]
pub fn s6_three_element_map_and_join() -> (MockRealm, Vec<f64>) {
    (MockRealm::new(), vec![1.0, 2.0, 3.0])
}
