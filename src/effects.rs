//! The effects record and the effects joiner (§4.G).

use std::collections::{HashMap, HashSet};

use crate::binding::{join_bindings, BindingEntry, BindingId};
use crate::completion::{join_completions, Completion};
use crate::descriptor::Descriptor;
use crate::generator::Generator;
use crate::property::{join_property_bindings, PropertyBinding};
use crate::realm::Realm;
use crate::value::ObjectId;

/// The five-tuple of everything a branch's evaluation could have produced,
/// plus a flag marking whether it is still safe to apply (§3).
///
/// `Effects` is immutable after construction; [`Effects::shallow_clone_with_result`]
/// is the one sanctioned way to derive a variant that differs only in its
/// completion.
#[derive(Debug, Clone)]
pub struct Effects {
    pub result: Completion,
    pub generator: Generator,
    pub bindings: HashMap<BindingId, BindingEntry>,
    pub properties: HashMap<PropertyBinding, Option<Descriptor>>,
    pub created_objects: HashSet<ObjectId>,
    pub can_be_applied: bool,
}

impl Effects {
    pub fn shallow_clone_with_result(&self, result: Completion) -> Effects {
        Effects {
            result,
            generator: self.generator.clone(),
            bindings: self.bindings.clone(),
            properties: self.properties.clone(),
            created_objects: self.created_objects.clone(),
            can_be_applied: self.can_be_applied,
        }
    }
}

/// §4.G: orchestrates the completion, binding, property-binding, and
/// generator joiners to produce one merged effects record.
///
/// Short-circuits on a statically known `cond`, same as the completion
/// joiner (§4.F): a concretely-true `cond` returns `e1` verbatim rather than
/// merging bindings/properties/generator that don't need merging at all.
///
/// # Panics
/// If either input's `can_be_applied` is `false` (§7: applying effects
/// twice, or joining effects that were already consumed, is a programmer
/// error).
pub fn join_effects(realm: &dyn Realm, cond: &crate::value::Value, e1: &Effects, e2: &Effects) -> Effects {
    assert!(e1.can_be_applied, "joinEffects: left effects record has already been applied or consumed");
    assert!(e2.can_be_applied, "joinEffects: right effects record has already been applied or consumed");

    if let Some(known) = cond.known_bool() {
        return if known { e1.clone() } else { e2.clone() };
    }

    let result = join_completions(realm, cond, &e1.result, &e2.result);

    let joined_bindings = join_bindings(realm, cond, &e1.generator, &e1.bindings, &e2.generator, &e2.bindings);

    let properties = join_property_bindings(
        realm,
        cond,
        &e1.properties,
        &e2.properties,
        &e1.created_objects,
        &e2.created_objects,
    );

    let generator = Generator::joined(cond, &joined_bindings.g1, &joined_bindings.g2);

    let created_objects = e1.created_objects.union(&e2.created_objects).cloned().collect();

    Effects {
        result,
        generator,
        bindings: joined_bindings.bindings,
        properties,
        created_objects,
        can_be_applied: true,
    }
}
