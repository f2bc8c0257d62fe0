//! A standalone [`Realm`] implementation with no interpreter behind it,
//! used by this crate's own unit and integration tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::binding::{BindingEntry, BindingId};
use crate::completion::Completion;
use crate::descriptor::Descriptor;
use crate::effects::Effects;
use crate::generator::Generator;
use crate::property::PropertyBinding;
use crate::realm::{ConditionalFlags, Realm};
use crate::value::{strict_equals_concrete, ConcreteValue, Value};

/// The handful of shapes a mock abstract term can take. Neither variant is
/// ever statically decidable: `fresh_abstract_condition` and the
/// conditionals `conditional_of` builds are always genuinely unknown, which
/// is what makes this realm exercise the non-short-circuiting paths of the
/// join algorithms.
#[derive(Debug)]
enum MockTerm {
    FreshCondition { label: String, id: u64 },
    Conditional { cond: Value, consequent: Value, alternate: Value, flags: ConditionalFlags },
}

impl fmt::Debug for MockAbstractTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

struct MockAbstractTerm(MockTerm);

impl crate::value::AbstractTerm for MockAbstractTerm {
    fn might_not_be_true(&self) -> bool {
        true
    }

    fn might_not_be_false(&self) -> bool {
        true
    }
}

/// A realm with no backing interpreter: bindings and property descriptors
/// are whatever the test registers, conditions are opaque tokens, and
/// `apply_effects`/`evaluate_for_effects` are simple counted stand-ins.
pub struct MockRealm {
    next_id: Cell<u64>,
    bindings: RefCell<HashMap<BindingId, BindingEntry>>,
    descriptors: RefCell<HashMap<PropertyBinding, Descriptor>>,
    applied_effects: Cell<usize>,
    evaluations: Cell<usize>,
}

impl MockRealm {
    pub fn new() -> Self {
        MockRealm {
            next_id: Cell::new(0),
            bindings: RefCell::new(HashMap::new()),
            descriptors: RefCell::new(HashMap::new()),
            applied_effects: Cell::new(0),
            evaluations: Cell::new(0),
        }
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    /// Produces an undecidable abstract condition, distinguishable in debug
    /// output by `label` but otherwise opaque.
    pub fn fresh_abstract_condition(&self, label: &str) -> Value {
        let id = self.next_id();
        Value::Abstract(Rc::new(MockAbstractTerm(MockTerm::FreshCondition { label: label.to_string(), id })))
    }

    /// Registers a binding's pre-branch value/leak state and returns the id
    /// it was registered under.
    pub fn register_current_binding(&self, value: Value, has_leaked: bool) -> BindingId {
        let id = BindingId(self.next_id() as u32);
        self.bindings.borrow_mut().insert(id, BindingEntry { value, has_leaked });
        id
    }

    /// Registers a property binding's pre-branch descriptor.
    pub fn register_current_descriptor(&self, binding: PropertyBinding, descriptor: Descriptor) {
        self.descriptors.borrow_mut().insert(binding, descriptor);
    }

    /// `true` if `v` is a conditional this realm's `conditional_of` built
    /// (as opposed to, say, a concrete value returned by an identity
    /// shortcut).
    pub fn is_conditional(&self, v: &Value) -> bool {
        match v {
            Value::Abstract(term) => format!("{term:?}").contains("Conditional"),
            _ => false,
        }
    }

    pub fn applied_effects_count(&self) -> usize {
        self.applied_effects.get()
    }

    pub fn evaluate_for_effects_count(&self) -> usize {
        self.evaluations.get()
    }
}

impl Default for MockRealm {
    fn default() -> Self {
        Self::new()
    }
}

impl Realm for MockRealm {
    fn undefined_value(&self) -> Value {
        Value::undefined()
    }

    fn strict_equals(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Concrete(x), Value::Concrete(y)) => strict_equals_concrete(x, y),
            (Value::Empty, Value::Empty) => true,
            _ => false,
        }
    }

    fn conditional_of(&self, cond: &Value, consequent: &Value, alternate: &Value, flags: ConditionalFlags) -> Value {
        Value::Abstract(Rc::new(MockAbstractTerm(MockTerm::Conditional {
            cond: cond.clone(),
            consequent: consequent.clone(),
            alternate: alternate.clone(),
            flags,
        })))
    }

    fn current_binding(&self, id: BindingId) -> BindingEntry {
        self.bindings
            .borrow()
            .get(&id)
            .cloned()
            .unwrap_or(BindingEntry { value: Value::Concrete(ConcreteValue::Undefined), has_leaked: false })
    }

    fn current_descriptor(&self, binding: &PropertyBinding) -> Option<Descriptor> {
        self.descriptors.borrow().get(binding).cloned()
    }

    fn apply_effects(&self, effects: &Effects) -> Value {
        self.applied_effects.set(self.applied_effects.get() + 1);
        match &effects.result {
            Completion::Normal(v) => v.clone(),
            _ => Value::undefined(),
        }
    }

    fn evaluate_for_effects(&self, _cond: &Value, thunk: &mut dyn FnMut() -> Completion) -> Effects {
        self.evaluations.set(self.evaluations.get() + 1);
        Effects {
            result: thunk(),
            generator: Generator::empty(),
            bindings: HashMap::new(),
            properties: HashMap::new(),
            created_objects: std::collections::HashSet::new(),
            can_be_applied: true,
        }
    }
}
