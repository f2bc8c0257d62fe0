//! Object property bindings and the property-binding joiner (§4.E).

use std::collections::{HashMap, HashSet};

use crate::descriptor::{join_descriptor, Descriptor};
use crate::realm::Realm;
use crate::value::{ObjectId, Value};

/// A symbolic property key (the object model's own key representation is
/// out of scope; this core treats keys opaquely).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(std::rc::Rc<str>),
    Index(u32),
}

/// Identifies one property slot on one object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyBinding {
    pub object: ObjectId,
    pub key: PropertyKey,
}

/// §4.E: join two per-branch property-descriptor deltas under `cond`.
///
/// `c1`/`c2` are the sets of objects created fresh on each branch: a
/// binding whose object was created only on the other branch needs no
/// reconciliation at all, since the slot simply did not exist before the
/// branch point.
pub fn join_property_bindings(
    realm: &dyn Realm,
    cond: &Value,
    m1: &HashMap<PropertyBinding, Option<Descriptor>>,
    m2: &HashMap<PropertyBinding, Option<Descriptor>>,
    c1: &HashSet<ObjectId>,
    c2: &HashSet<ObjectId>,
) -> HashMap<PropertyBinding, Option<Descriptor>> {
    let mut keys: Vec<&PropertyBinding> = m1.keys().collect();
    for b in m2.keys() {
        if !m1.contains_key(b) {
            keys.push(b);
        }
    }

    keys.into_iter()
        .map(|b| {
            if !m1.contains_key(b) && c2.contains(&b.object) {
                return (b.clone(), m2.get(b).cloned().flatten());
            }
            if !m2.contains_key(b) && c1.contains(&b.object) {
                return (b.clone(), m1.get(b).cloned().flatten());
            }

            let d1 = resolve_side(realm, b, m1);
            let d2 = resolve_side(realm, b, m2);
            (b.clone(), join_descriptor(realm, cond, d1.as_ref(), d2.as_ref()))
        })
        .collect()
}

/// Resolves one side's descriptor for a property binding that did not take
/// the verbatim "created only on the other branch" shortcut above.
///
/// - An entry present with `Some(desc)`: the branch wrote this descriptor.
/// - An entry present with `None` (a deletion marker): the property was
///   deleted on this branch; materialize the pre-branch descriptor with its
///   value slot replaced by [`Value::Empty`].
/// - No entry at all: the branch made no write; use the pre-branch
///   descriptor unchanged.
fn resolve_side(
    realm: &dyn Realm,
    binding: &PropertyBinding,
    delta: &HashMap<PropertyBinding, Option<Descriptor>>,
) -> Option<Descriptor> {
    match delta.get(binding) {
        Some(Some(desc)) => Some(desc.clone()),
        Some(None) => realm.current_descriptor(binding).map(|d| clone_with_empty_value(&d)),
        None => realm.current_descriptor(binding),
    }
}

fn clone_with_empty_value(d: &Descriptor) -> Descriptor {
    use crate::descriptor::{AccessorDescriptor, DataDescriptor};
    match d {
        Descriptor::Data(data) => Descriptor::Data(DataDescriptor { value: Value::Empty, ..data.clone() }),
        Descriptor::Accessor(a) => {
            Descriptor::Accessor(AccessorDescriptor { get: Value::Empty, set: Value::Empty, ..a.clone() })
        }
        Descriptor::Joined(j) => Descriptor::Joined(j.clone()),
    }
}
