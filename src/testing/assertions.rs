//! Structural assertions over completions and generators.
//!
//! Scenario tests built from a couple of `match` arms quickly become
//! unreadable once a completion tree has more than one or two joins in it;
//! these assertions let a test state the *shape* it expects directly.

use std::fmt::Debug;

use crate::completion::Completion;
use crate::generator::{EmittedEntry, Generator};

/// Assert that two completions have the same top-level shape (same variant,
/// and for leaves, structurally equal payload via the provided `values_eq`).
/// Join conditions themselves are opaque abstract terms, so this does not
/// attempt to compare them, only the shape.
///
/// # Panics
/// If the completions' variants differ.
pub fn assert_completions_same_shape(actual: &Completion, expected: &Completion) {
    let (a, e) = (shape_tag(actual), shape_tag(expected));
    assert_eq!(a, e, "completion shape mismatch:\n  expected: {expected:?}\n  actual:   {actual:?}");
}

fn shape_tag(c: &Completion) -> &'static str {
    match c {
        Completion::Normal(_) => "Normal",
        Completion::Throw(_, _) => "Throw",
        Completion::Return(_) => "Return",
        Completion::Break(_, _) => "Break",
        Completion::Continue(_, _) => "Continue",
        Completion::JoinedAbrupt { .. } => "JoinedAbrupt",
        Completion::JoinedNormalAndAbrupt { .. } => "JoinedNormalAndAbrupt",
    }
}

/// Assert that a completion is abrupt (per [`Completion::is_abrupt`]).
///
/// # Panics
/// If `completion` is not abrupt.
pub fn assert_abrupt(completion: &Completion) {
    assert!(completion.is_abrupt(), "expected an abrupt completion, got: {completion:?}");
}

/// Assert that a generator's flattened emission order matches `expected`
/// exactly (§9, invariant 9: wrapping preserves order and never interleaves
/// branches).
///
/// # Panics
/// If the flattened orders differ.
pub fn assert_generator_order(generator: &Generator, expected: &[EmittedEntry]) {
    let actual = generator.entries_in_order();
    assert_eq!(
        actual, expected,
        "generator emission order mismatch:\n  expected: {expected:?}\n  actual:   {actual:?}"
    );
}

/// Assert that a generator is empty.
///
/// # Panics
/// If `generator` has any entries.
pub fn assert_generator_empty(generator: &Generator) {
    assert!(generator.is_empty(), "expected an empty generator, got {} flattened entries", generator.entries_in_order().len());
}

/// Assert that two option-wrapped values are equal, with a message that
/// names which side was unexpectedly present or absent.
///
/// # Panics
/// If the two options differ.
pub fn assert_options_equal<T: Debug + PartialEq>(actual: Option<&T>, expected: Option<&T>) {
    match (actual, expected) {
        (Some(a), Some(e)) => assert_eq!(a, e, "value mismatch:\n  expected: {e:?}\n  actual:   {a:?}"),
        (None, None) => {}
        (Some(a), None) => panic!("expected absent, got present: {a:?}"),
        (None, Some(e)) => panic!("expected present ({e:?}), got absent"),
    }
}
