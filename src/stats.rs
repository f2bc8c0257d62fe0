//! Join-decision counters, gated behind the `metrics` feature (§2 ambient
//! components). These exist purely for observability: nothing in the core
//! reads them back to make decisions, so they're implemented as free
//! functions over process-global atomics rather than threaded through every
//! join signature, keeping the §6 external interface exactly as specified.

use std::sync::atomic::{AtomicU64, Ordering};

static COMPLETIONS_COLLAPSED: AtomicU64 = AtomicU64::new(0);
static COMPLETIONS_JOINED: AtomicU64 = AtomicU64::new(0);
static LEAK_RECONCILIATIONS: AtomicU64 = AtomicU64::new(0);
static DESCRIPTORS_MATERIALIZED: AtomicU64 = AtomicU64::new(0);

/// A point-in-time snapshot of the counters below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub completions_collapsed: u64,
    pub completions_joined: u64,
    pub leak_reconciliations: u64,
    pub descriptors_materialized: u64,
}

pub fn snapshot() -> JoinStats {
    JoinStats {
        completions_collapsed: COMPLETIONS_COLLAPSED.load(Ordering::Relaxed),
        completions_joined: COMPLETIONS_JOINED.load(Ordering::Relaxed),
        leak_reconciliations: LEAK_RECONCILIATIONS.load(Ordering::Relaxed),
        descriptors_materialized: DESCRIPTORS_MATERIALIZED.load(Ordering::Relaxed),
    }
}

/// Resets every counter to zero. Intended for test isolation only.
pub fn reset() {
    COMPLETIONS_COLLAPSED.store(0, Ordering::Relaxed);
    COMPLETIONS_JOINED.store(0, Ordering::Relaxed);
    LEAK_RECONCILIATIONS.store(0, Ordering::Relaxed);
    DESCRIPTORS_MATERIALIZED.store(0, Ordering::Relaxed);
}

pub(crate) fn record_completions_collapsed() {
    COMPLETIONS_COLLAPSED.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_completions_joined() {
    COMPLETIONS_JOINED.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_leak_reconciliation() {
    LEAK_RECONCILIATIONS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_descriptor_materialized() {
    DESCRIPTORS_MATERIALIZED.fetch_add(1, Ordering::Relaxed);
}
