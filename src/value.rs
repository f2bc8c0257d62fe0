//! Symbolic values and the value joiner.
//!
//! This module defines [`Value`], the opaque symbolic term every other join
//! operates over, and [`join_value`]/[`join_array`], the component the rest
//! of the core builds on (§4.A of the design doc).
//!
//! The interpreter's expression evaluator and object model are out of scope
//! here; [`ConcreteValue`] carries just enough shape (booleans, numbers,
//! strings, object references) to let the join algorithms and their tests be
//! exercised end to end without a real runtime behind them.

use std::fmt;
use std::rc::Rc;

use crate::realm::{ConditionalFlags, Realm};

/// A runtime datum produced by fully concrete evaluation.
///
/// Strict-equals comparison of two `ConcreteValue`s follows ECMAScript's
/// `===`: `NaN` is never equal to anything, including itself, and `+0`/`-0`
/// compare equal.
#[derive(Debug, Clone)]
pub enum ConcreteValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    Object(ObjectId),
}

/// Opaque object identity (the object model itself lives outside this core).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

impl PartialEq for ConcreteValue {
    fn eq(&self, other: &Self) -> bool {
        strict_equals_concrete(self, other)
    }
}

/// ECMAScript `===` semantics for concrete values, used by the default
/// [`Realm::strict_equals`] and directly by tests.
pub fn strict_equals_concrete(a: &ConcreteValue, b: &ConcreteValue) -> bool {
    match (a, b) {
        (ConcreteValue::Undefined, ConcreteValue::Undefined) => true,
        (ConcreteValue::Null, ConcreteValue::Null) => true,
        (ConcreteValue::Boolean(x), ConcreteValue::Boolean(y)) => x == y,
        (ConcreteValue::Number(x), ConcreteValue::Number(y)) => x == y, // NaN != NaN falls out of f64
        (ConcreteValue::String(x), ConcreteValue::String(y)) => x == y,
        (ConcreteValue::Object(x), ConcreteValue::Object(y)) => x == y,
        _ => false,
    }
}

/// A symbolic expression produced by abstract evaluation.
///
/// The core never constructs these itself (that is
/// [`Realm::conditional_of`]'s job) but reads the two predicates it needs to
/// short-circuit joins.
pub trait AbstractTerm: fmt::Debug {
    /// `false` only if this term is statically known to always be `true`.
    fn might_not_be_true(&self) -> bool;
    /// `false` only if this term is statically known to always be `false`.
    fn might_not_be_false(&self) -> bool;
}

/// The opaque symbolic term every join in this crate operates over.
#[derive(Debug, Clone)]
pub enum Value {
    /// "No value at all", distinct from the concrete `undefined`.
    Empty,
    Concrete(ConcreteValue),
    Abstract(Rc<dyn AbstractTerm>),
}

impl Value {
    pub fn undefined() -> Self {
        Value::Concrete(ConcreteValue::Undefined)
    }

    pub fn boolean(b: bool) -> Self {
        Value::Concrete(ConcreteValue::Boolean(b))
    }

    pub fn number(n: f64) -> Self {
        Value::Concrete(ConcreteValue::Number(n))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, Value::Abstract(_))
    }

    /// Statically known boolean value of a condition, if any: `Some(true)`
    /// for a concrete truthy boolean or an abstract term that cannot be
    /// false, `Some(false)` for the mirror case, `None` otherwise.
    ///
    /// Only `Boolean` concretes are treated as decidable conditions; the
    /// core never needs to coerce other concrete types to boolean.
    pub fn known_bool(&self) -> Option<bool> {
        match self {
            Value::Concrete(ConcreteValue::Boolean(b)) => Some(*b),
            Value::Abstract(a) => {
                if !a.might_not_be_true() {
                    Some(true)
                } else if !a.might_not_be_false() {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// One entry of a key/value-shaped array join (the "map-entry pair" shape
/// from §4.A).
#[derive(Debug, Clone)]
pub struct Entry {
    pub key: Value,
    pub value: Value,
}

/// The heterogeneous "value or array" argument `joinValues` accepts,
/// reified as a sum type per the REDESIGN FLAGS rather than sniffed at
/// runtime from the first element's shape.
#[derive(Debug, Clone)]
pub enum JoinPayload {
    Value(Value),
    ValueArray(Vec<Value>),
    EntryArray(Vec<Entry>),
}

/// §4.A: join two optional values under `cond`.
///
/// Returns `v1` unchanged when both sides are present, neither is abstract,
/// and they are strictly equal; otherwise builds `cond ? v1 : v2` via
/// [`Realm::conditional_of`], treating an absent side as `undefined`.
pub fn join_value(realm: &dyn Realm, cond: &Value, v1: Option<&Value>, v2: Option<&Value>) -> Value {
    join_value_with_flags(realm, cond, v1, v2, ConditionalFlags::default())
}

pub fn join_value_with_flags(
    realm: &dyn Realm,
    cond: &Value,
    v1: Option<&Value>,
    v2: Option<&Value>,
    flags: ConditionalFlags,
) -> Value {
    if let (Some(a), Some(b)) = (v1, v2) {
        if !a.is_abstract() && !b.is_abstract() && realm.strict_equals(a, b) {
            return a.clone();
        }
    }
    let undef = realm.undefined_value();
    let a = v1.unwrap_or(&undef);
    let b = v2.unwrap_or(&undef);
    realm.conditional_of(cond, a, b, flags)
}

/// Variant of [`join_value`] used by the `Throw` collapse in the completion
/// joiner (§4.F, Open Question resolution in §9): both sides are always
/// genuinely present thrown values, so the identity shortcut that recognizes
/// equal concrete values is skipped and a conditional is always built.
pub fn join_value_for_throw(realm: &dyn Realm, cond: &Value, v1: &Value, v2: &Value) -> Value {
    realm.conditional_of(cond, v1, v2, ConditionalFlags::default())
}

/// Join two optional values, padding a missing side with [`Value::Empty`]
/// rather than `undefined`. Used by array-join padding and by the descriptor
/// joiner's "materialize against empty" case.
pub fn join_value_padded(realm: &dyn Realm, cond: &Value, v1: Option<&Value>, v2: Option<&Value>) -> Value {
    if let (Some(a), Some(b)) = (v1, v2) {
        if !a.is_abstract() && !b.is_abstract() && realm.strict_equals(a, b) {
            return a.clone();
        }
    }
    let a = v1.cloned().unwrap_or(Value::Empty);
    let b = v2.cloned().unwrap_or(Value::Empty);
    realm.conditional_of(cond, &a, &b, ConditionalFlags::default())
}

/// §4.A array join: pads the shorter side with `Empty` and joins
/// element-wise. A `{undefined, undefined}` entry pair is propagated
/// unchanged so sparse array holes survive the join.
pub fn join_array(realm: &dyn Realm, cond: &Value, a1: Option<&[Value]>, a2: Option<&[Value]>) -> Vec<Value> {
    let len = a1.map_or(0, |a| a.len()).max(a2.map_or(0, |a| a.len()));
    (0..len)
        .map(|i| {
            let v1 = a1.and_then(|a| a.get(i));
            let v2 = a2.and_then(|a| a.get(i));
            join_value_padded(realm, cond, v1, v2)
        })
        .collect()
}

/// Entry-array variant of [`join_array`] for the `{key, value}` map-entry
/// shape.
pub fn join_entry_array(realm: &dyn Realm, cond: &Value, a1: Option<&[Entry]>, a2: Option<&[Entry]>) -> Vec<Entry> {
    let len = a1.map_or(0, |a| a.len()).max(a2.map_or(0, |a| a.len()));
    (0..len)
        .map(|i| {
            let e1 = a1.and_then(|a| a.get(i));
            let e2 = a2.and_then(|a| a.get(i));
            if let (Some(x), Some(y)) = (e1, e2) {
                if is_undefined(&x.key) && is_undefined(&y.key) && is_undefined(&x.value) && is_undefined(&y.value) {
                    return Entry { key: x.key.clone(), value: x.value.clone() };
                }
            }
            let key = join_value_padded(realm, cond, e1.map(|e| &e.key), e2.map(|e| &e.key));
            let value = join_value_padded(realm, cond, e1.map(|e| &e.value), e2.map(|e| &e.value));
            Entry { key, value }
        })
        .collect()
}

fn is_undefined(v: &Value) -> bool {
    matches!(v, Value::Concrete(ConcreteValue::Undefined))
}

/// §6 interface #3: join a heterogeneous [`JoinPayload`].
///
/// # Panics
/// If one side is an array shape and the other is a plain value (the
/// structural precondition from §7: a programmer error, not a recoverable
/// one).
pub fn join_values(realm: &dyn Realm, cond: &Value, p1: Option<&JoinPayload>, p2: Option<&JoinPayload>) -> JoinPayload {
    match (p1, p2) {
        (Some(JoinPayload::Value(_)) | None, Some(JoinPayload::Value(_)) | None) => {
            let v1 = match p1 {
                Some(JoinPayload::Value(v)) => Some(v),
                _ => None,
            };
            let v2 = match p2 {
                Some(JoinPayload::Value(v)) => Some(v),
                _ => None,
            };
            JoinPayload::Value(join_value(realm, cond, v1, v2))
        }
        (Some(JoinPayload::ValueArray(_)) | None, Some(JoinPayload::ValueArray(_)) | None) => {
            let a1 = match p1 {
                Some(JoinPayload::ValueArray(a)) => Some(a.as_slice()),
                _ => None,
            };
            let a2 = match p2 {
                Some(JoinPayload::ValueArray(a)) => Some(a.as_slice()),
                _ => None,
            };
            JoinPayload::ValueArray(join_array(realm, cond, a1, a2))
        }
        (Some(JoinPayload::EntryArray(_)) | None, Some(JoinPayload::EntryArray(_)) | None) => {
            let a1 = match p1 {
                Some(JoinPayload::EntryArray(a)) => Some(a.as_slice()),
                _ => None,
            };
            let a2 = match p2 {
                Some(JoinPayload::EntryArray(a)) => Some(a.as_slice()),
                _ => None,
            };
            JoinPayload::EntryArray(join_entry_array(realm, cond, a1, a2))
        }
        _ => panic!("joinValues: array shape paired with a non-array (or mismatched array shape) payload"),
    }
}
