//! A concrete, minimal side-effect log sufficient to exercise
//! `joinGenerators`, `appendGenerator`, `emitBindingAssignment`, and the
//! wrap-then-append ordering invariant (§9 expansion).
//!
//! The generator's own opcode set (what an effect actually *does* when
//! replayed) is out of scope; this core only orders and nests entries, most
//! of which are [`GeneratorEntry::Opaque`] as far as it's concerned.

use std::rc::Rc;

use crate::binding::BindingId;
use crate::value::Value;

/// Identity of an effect this core does not interpret (a property write, a
/// console call, whatever the interpreter's effect log actually holds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpaqueEffectId(pub u32);

#[derive(Debug, Clone)]
pub enum GeneratorEntry {
    Opaque(OpaqueEffectId),
    BindingAssignment { binding: BindingId, value: Value },
    /// Replays `inner` in order, then nothing further of its own; used to
    /// wrap a generator that must not be mutated in place (§4.D).
    Nested(Rc<Generator>),
    /// `cond ? left : right`, exactly one branch of which applies on
    /// replay.
    Joined { cond: Value, left: Rc<Generator>, right: Rc<Generator> },
}

/// An ordered, append-only log of observable effects (§3, §9 expansion).
///
/// `Generator` is a plain immutable value: every operation below returns a
/// new `Generator` rather than mutating `self`, which is what lets the
/// binding joiner's wrap-then-append trick (§4.D) share the original log
/// with other `Effects` records that must not observe the rewrite.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    entries: Vec<GeneratorEntry>,
}

/// A fully flattened entry, used by test assertions to check ordering
/// without reasoning about `Nested`/`Joined` structure directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmittedEntry {
    Opaque(OpaqueEffectId),
    BindingAssignment(BindingId),
}

impl Generator {
    pub fn empty() -> Self {
        Generator { entries: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn opaque(id: OpaqueEffectId) -> Self {
        Generator { entries: vec![GeneratorEntry::Opaque(id)] }
    }

    /// `appendGenerator`-by-construction: builds a new generator whose
    /// entries are `self`'s, in order, followed by `other`'s.
    pub fn appended(&self, other: &Generator) -> Generator {
        if other.is_empty() {
            return self.clone();
        }
        Generator { entries: vec![GeneratorEntry::Nested(Rc::new(self.clone())), GeneratorEntry::Nested(Rc::new(other.clone()))] }
    }

    /// `joinGenerators(cond, g1, g2)`: wraps the two branch generators under
    /// `cond`, unless both are empty (§4.G), in which case the result is
    /// itself empty.
    pub fn joined(cond: &Value, g1: &Generator, g2: &Generator) -> Generator {
        if g1.is_empty() && g2.is_empty() {
            return Generator::empty();
        }
        Generator {
            entries: vec![GeneratorEntry::Joined { cond: cond.clone(), left: Rc::new(g1.clone()), right: Rc::new(g2.clone()) }],
        }
    }

    /// `emitBindingAssignment`, wrap-then-append form: the result replays
    /// every entry of `self` in original order, then the new assignment.
    /// `self` is left untouched: any other `Effects` still holding it sees
    /// no change (§4.D, invariant 9).
    pub fn with_binding_assignment(&self, binding: BindingId, value: Value) -> Generator {
        Generator {
            entries: vec![
                GeneratorEntry::Nested(Rc::new(self.clone())),
                GeneratorEntry::BindingAssignment { binding, value },
            ],
        }
    }

    /// Flattens the log into emission order: `Nested` replays its inner log
    /// in place, `Joined` replays `left` then `right`, not because both
    /// apply on any one path, but because this is purely a structural
    /// ordering view used to check that one branch's entries never
    /// interleave with the other's.
    pub fn entries_in_order(&self) -> Vec<EmittedEntry> {
        let mut out = Vec::new();
        flatten_into(&self.entries, &mut out);
        out
    }
}

fn flatten_into(entries: &[GeneratorEntry], out: &mut Vec<EmittedEntry>) {
    for entry in entries {
        match entry {
            GeneratorEntry::Opaque(id) => out.push(EmittedEntry::Opaque(*id)),
            GeneratorEntry::BindingAssignment { binding, .. } => out.push(EmittedEntry::BindingAssignment(*binding)),
            GeneratorEntry::Nested(inner) => flatten_into(&inner.entries, out),
            GeneratorEntry::Joined { left, right, .. } => {
                flatten_into(&left.entries, out);
                flatten_into(&right.entries, out);
            }
        }
    }
}
