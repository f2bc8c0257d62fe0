//! Property descriptors and the descriptor joiner (§4.B).

use crate::realm::Realm;
use crate::value::{join_value, join_value_padded, Value};

/// A data property's attributes.
#[derive(Debug, Clone)]
pub struct DataDescriptor {
    pub value: Value,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

/// An accessor property's attributes.
#[derive(Debug, Clone)]
pub struct AccessorDescriptor {
    pub get: Value,
    pub set: Value,
    pub enumerable: bool,
    pub configurable: bool,
}

/// A descriptor that could not be collapsed to a single kind; carries both
/// branches and the condition that picks between them.
#[derive(Debug, Clone)]
pub struct JoinedDescriptor {
    pub cond: Value,
    pub consequent: Box<Descriptor>,
    pub alternate: Box<Descriptor>,
}

#[derive(Debug, Clone)]
pub enum Descriptor {
    Data(DataDescriptor),
    Accessor(AccessorDescriptor),
    Joined(JoinedDescriptor),
}

impl Descriptor {
    pub fn is_data(&self) -> bool {
        matches!(self, Descriptor::Data(_))
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self, Descriptor::Accessor(_))
    }
}

/// Structural, attribute-by-attribute equality. Two descriptors of different
/// kinds are never equal; this does not attempt value-level equality beyond
/// what `Value`'s own `PartialEq`-free representation allows, so the core
/// calls out to the realm for the value comparison.
pub fn equal_descriptors(realm: &dyn Realm, a: &Descriptor, b: &Descriptor) -> bool {
    match (a, b) {
        (Descriptor::Data(x), Descriptor::Data(y)) => {
            x.writable == y.writable
                && x.enumerable == y.enumerable
                && x.configurable == y.configurable
                && realm.strict_equals(&x.value, &y.value)
        }
        (Descriptor::Accessor(x), Descriptor::Accessor(y)) => {
            x.enumerable == y.enumerable
                && x.configurable == y.configurable
                && realm.strict_equals(&x.get, &y.get)
                && realm.strict_equals(&x.set, &y.set)
        }
        _ => false,
    }
}

/// §4.B: join two descriptors under `cond`.
///
/// Two data descriptors collapse into a single data descriptor whose
/// attributes are joined component-wise (booleans via [`join_value`]'s
/// concrete-equality shortcut is not applicable to plain `bool`s, so
/// differing booleans simply force the whole descriptor to stay structurally
/// joined rather than collapsing, matching the case table's "same kind,
/// same attributes" requirement). Two accessor descriptors behave
/// symmetrically. Anything else (mixed kinds, or same kind with differing
/// non-value attributes) becomes a [`JoinedDescriptor`].
pub fn join_descriptor(realm: &dyn Realm, cond: &Value, d1: Option<&Descriptor>, d2: Option<&Descriptor>) -> Option<Descriptor> {
    match (d1, d2) {
        (None, None) => None,
        (Some(Descriptor::Data(x)), Some(Descriptor::Data(y)))
            if x.writable == y.writable && x.enumerable == y.enumerable && x.configurable == y.configurable =>
        {
            Some(Descriptor::Data(DataDescriptor {
                value: join_value(realm, cond, Some(&x.value), Some(&y.value)),
                writable: x.writable,
                enumerable: x.enumerable,
                configurable: x.configurable,
            }))
        }
        (Some(Descriptor::Accessor(x)), Some(Descriptor::Accessor(y)))
            if x.enumerable == y.enumerable && x.configurable == y.configurable =>
        {
            Some(Descriptor::Accessor(AccessorDescriptor {
                get: join_value(realm, cond, Some(&x.get), Some(&y.get)),
                set: join_value(realm, cond, Some(&x.set), Some(&y.set)),
                enumerable: x.enumerable,
                configurable: x.configurable,
            }))
        }
        _ => {
            let (consequent, alternate) = match (d1, d2) {
                (Some(a), Some(b)) => (a.clone(), b.clone()),
                (Some(a), None) => (a.clone(), materialize_against_empty(a)),
                (None, Some(b)) => (materialize_against_empty(b), b.clone()),
                (None, None) => unreachable!(),
            };
            #[cfg(feature = "metrics")]
            crate::stats::record_descriptor_materialized();
            Some(Descriptor::Joined(JoinedDescriptor {
                cond: cond.clone(),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            }))
        }
    }
}

/// Builds a placeholder on the missing side of a one-sided descriptor join:
/// same attributes as the present side, value forced to [`Value::Empty`] so
/// the hole is visible rather than silently defaulted.
fn materialize_against_empty(present: &Descriptor) -> Descriptor {
    match present {
        Descriptor::Data(d) => Descriptor::Data(DataDescriptor {
            value: Value::Empty,
            writable: d.writable,
            enumerable: d.enumerable,
            configurable: d.configurable,
        }),
        Descriptor::Accessor(a) => Descriptor::Accessor(AccessorDescriptor {
            get: Value::Empty,
            set: Value::Empty,
            enumerable: a.enumerable,
            configurable: a.configurable,
        }),
        Descriptor::Joined(j) => Descriptor::Joined(j.clone()),
    }
}

/// Exposed for the property-binding joiner, which needs to pad a deletion
/// marker against the realm's last-known descriptor using the same rule used
/// internally above, but against a value (not a whole descriptor) on each
/// attribute.
pub fn join_descriptor_value_padded(realm: &dyn Realm, cond: &Value, v1: Option<&Value>, v2: Option<&Value>) -> Value {
    join_value_padded(realm, cond, v1, v2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_realm::MockRealm;

    fn data(value: Value) -> Descriptor {
        Descriptor::Data(DataDescriptor { value, writable: true, enumerable: true, configurable: true })
    }

    #[test]
    fn same_attribute_data_descriptors_collapse() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let joined = join_descriptor(&realm, &cond, Some(&data(Value::number(1.0))), Some(&data(Value::number(2.0))))
            .unwrap();
        assert!(joined.is_data());
    }

    #[test]
    fn differing_attributes_force_a_joined_descriptor() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let writable = data(Value::number(1.0));
        let mut not_writable = data(Value::number(1.0));
        if let Descriptor::Data(d) = &mut not_writable {
            d.writable = false;
        }
        let joined = join_descriptor(&realm, &cond, Some(&writable), Some(&not_writable)).unwrap();
        assert!(matches!(joined, Descriptor::Joined(_)));
    }

    #[test]
    fn one_sided_descriptor_materializes_empty_value_on_the_other_side() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        let joined = join_descriptor(&realm, &cond, Some(&data(Value::number(1.0))), None).unwrap();
        match joined {
            Descriptor::Joined(j) => match *j.alternate {
                Descriptor::Data(d) => assert!(d.value.is_empty()),
                _ => panic!("expected a data descriptor on the materialized side"),
            },
            _ => panic!("expected a Joined descriptor"),
        }
    }

    #[test]
    fn both_absent_joins_to_none() {
        let realm = MockRealm::new();
        let cond = realm.fresh_abstract_condition("a");
        assert!(join_descriptor(&realm, &cond, None, None).is_none());
    }
}
