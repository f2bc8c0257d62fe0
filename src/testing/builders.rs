//! Fluent builders for assembling test fixtures: bindings and effects
//! records, without hand-writing every field at each call site.

use std::collections::{HashMap, HashSet};

use crate::binding::{BindingEntry, BindingId};
use crate::completion::Completion;
use crate::descriptor::Descriptor;
use crate::effects::Effects;
use crate::generator::Generator;
use crate::property::PropertyBinding;
use crate::value::{ObjectId, Value};

/// A fluent builder for a single branch's binding delta
/// (`Map<BindingId, BindingEntry>`).
///
/// # Example
///
/// ```
/// use branch_join_core::binding::BindingId;
/// use branch_join_core::testing::BindingMapBuilder;
/// use branch_join_core::value::Value;
///
/// let m = BindingMapBuilder::new()
///     .with(BindingId(1), Value::number(5.0), false)
///     .build();
/// assert_eq!(m.len(), 1);
/// ```
#[derive(Default)]
pub struct BindingMapBuilder {
    entries: HashMap<BindingId, BindingEntry>,
}

impl BindingMapBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    #[must_use]
    pub fn with(mut self, id: BindingId, value: Value, has_leaked: bool) -> Self {
        self.entries.insert(id, BindingEntry { value, has_leaked });
        self
    }

    #[must_use]
    pub fn build(self) -> HashMap<BindingId, BindingEntry> {
        self.entries
    }
}

/// A fluent builder for a single branch's property-binding delta.
#[derive(Default)]
pub struct PropertyMapBuilder {
    entries: HashMap<PropertyBinding, Option<Descriptor>>,
}

impl PropertyMapBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    #[must_use]
    pub fn with_write(mut self, binding: PropertyBinding, descriptor: Descriptor) -> Self {
        self.entries.insert(binding, Some(descriptor));
        self
    }

    /// Records a deletion: the property binding is present in the map but
    /// mapped to `None`, distinct from being absent entirely.
    #[must_use]
    pub fn with_deletion(mut self, binding: PropertyBinding) -> Self {
        self.entries.insert(binding, None);
        self
    }

    #[must_use]
    pub fn build(self) -> HashMap<PropertyBinding, Option<Descriptor>> {
        self.entries
    }
}

/// A fluent builder for an [`Effects`] record, defaulting every field to its
/// empty/identity value so a test only has to set what it cares about.
///
/// # Example
///
/// ```
/// use branch_join_core::completion::Completion;
/// use branch_join_core::testing::EffectsBuilder;
/// use branch_join_core::value::Value;
///
/// let effects = EffectsBuilder::new(Completion::Normal(Value::number(1.0))).build();
/// assert!(effects.can_be_applied);
/// ```
pub struct EffectsBuilder {
    result: Completion,
    generator: Generator,
    bindings: HashMap<BindingId, BindingEntry>,
    properties: HashMap<PropertyBinding, Option<Descriptor>>,
    created_objects: HashSet<ObjectId>,
    can_be_applied: bool,
}

impl EffectsBuilder {
    #[must_use]
    pub fn new(result: Completion) -> Self {
        Self {
            result,
            generator: Generator::empty(),
            bindings: HashMap::new(),
            properties: HashMap::new(),
            created_objects: HashSet::new(),
            can_be_applied: true,
        }
    }

    #[must_use]
    pub fn with_generator(mut self, generator: Generator) -> Self {
        self.generator = generator;
        self
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: HashMap<BindingId, BindingEntry>) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: HashMap<PropertyBinding, Option<Descriptor>>) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn with_created_object(mut self, object: ObjectId) -> Self {
        self.created_objects.insert(object);
        self
    }

    #[must_use]
    pub fn already_applied(mut self) -> Self {
        self.can_be_applied = false;
        self
    }

    #[must_use]
    pub fn build(self) -> Effects {
        Effects {
            result: self.result,
            generator: self.generator,
            bindings: self.bindings,
            properties: self.properties,
            created_objects: self.created_objects,
            can_be_applied: self.can_be_applied,
        }
    }
}
