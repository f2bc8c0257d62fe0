//! # branch-join-core
//!
//! The branch-join core of a partial evaluator: reconciles two forked
//! abstract program states into one sound state that conservatively
//! represents both.
//!
//! ## Key Features
//!
//! - **Value joiner** ([`value`]): `cond ? v1 : v2` with an identity
//!   shortcut for strictly-equal concretes.
//! - **Descriptor joiner** ([`descriptor`]): joins property descriptors,
//!   materializing a placeholder on whichever side lacks one.
//! - **Completion joiner** ([`completion`]): collapses like-kinded control
//!   flow outcomes, otherwise builds a tagged join node.
//! - **Binding joiner** ([`binding`]): reconciles variable values and
//!   *leaked* flags, emitting compensating generator entries on asymmetric
//!   leaks.
//! - **Property-binding joiner** ([`property`]): the object-property
//!   analogue of the binding joiner.
//! - **Effects joiner** ([`effects`]): orchestrates all of the above plus
//!   generator join and created-object union into one effects record.
//! - **Composer** ([`compose`]): glues a pending completion onto freshly
//!   observed effects, with an immutable-rebuild splice for nested joins.
//! - **N-ary driver** ([`driver`]): right-folds effects across an
//!   arbitrary number of concrete branches.
//!
//! ## Quick Start
//!
//! ```
//! use branch_join_core::testing::mock_realm::MockRealm;
//! use branch_join_core::value::{join_value, Value};
//!
//! let realm = MockRealm::new();
//! let cond = realm.fresh_abstract_condition("x > 0");
//!
//! // Equal concretes collapse to the shared value.
//! let same = join_value(&realm, &cond, Some(&Value::number(1.0)), Some(&Value::number(1.0)));
//! assert!(matches!(same, Value::Concrete(_)));
//!
//! // Distinct concretes become a conditional.
//! let distinct = join_value(&realm, &cond, Some(&Value::number(1.0)), Some(&Value::number(2.0)));
//! assert!(realm.is_conditional(&distinct));
//! ```
//!
//! ## Core Concepts
//!
//! ### `Value`
//!
//! The opaque symbolic term every join operates over ([`value::Value`]).
//! Concrete values compare via ECMAScript `===` semantics; abstract terms
//! are supplied by the collaborating [`realm::Realm`] and treated
//! opaquely.
//!
//! ### `Effects`
//!
//! The five-tuple (completion, side-effect generator, binding deltas,
//! property-binding deltas, and created-object set) that one branch's
//! evaluation produces ([`effects::Effects`]). Joining two of these is the
//! crate's central operation.
//!
//! ### Collaborator interface
//!
//! This core never evaluates expressions or touches a real object model;
//! it reads and writes through the [`realm::Realm`] trait, supplied by the
//! surrounding interpreter. [`testing::mock_realm::MockRealm`] is a
//! standalone implementation used by this crate's own tests.
//!
//! ## Ambient diagnostics
//!
//! With the `metrics` feature (on by default), [`stats`] exposes
//! process-global counters for join decisions (collapses, structural
//! joins, leak reconciliations, descriptor materializations), useful for
//! understanding how much abstraction a given program run accumulates.

pub mod binding;
pub mod compose;
pub mod completion;
pub mod descriptor;
pub mod driver;
pub mod effects;
pub mod generator;
pub mod map_join;
pub mod property;
pub mod realm;
pub mod testing;
pub mod value;

#[cfg(feature = "metrics")]
pub mod stats;

pub use binding::{join_bindings, BindingEntry, BindingId, JoinedBindings};
pub use compose::{compose_completions, compose_with_effects, join_condition_for_selected_completions, join_values_of_selected_completions, CompletionSelector};
pub use completion::{join_completions, Completion, LabelId, SourceLocation};
pub use descriptor::{join_descriptor, AccessorDescriptor, DataDescriptor, Descriptor, JoinedDescriptor};
pub use driver::map_and_join;
pub use effects::{join_effects, Effects};
pub use generator::{EmittedEntry, Generator, GeneratorEntry, OpaqueEffectId};
pub use map_join::join_maps;
pub use property::{join_property_bindings, PropertyBinding, PropertyKey};
pub use realm::{ConditionalFlags, Realm};
pub use value::{join_array, join_entry_array, join_value, join_values, AbstractTerm, ConcreteValue, Entry, JoinPayload, ObjectId, Value};
