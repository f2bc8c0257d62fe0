//! Testing utilities for the branch-join core.
//!
//! This module provides the facility the core's own test suite is built on,
//! and that any consumer crate can reuse: a standalone [`mock_realm`]
//! implementing [`crate::realm::Realm`] without a real interpreter behind
//! it, plus builders, canned fixtures, and structural assertions so scenario
//! tests read declaratively rather than hand-assembling trees inline.
//!
//! # Quick Start
//!
//! ```
//! use branch_join_core::testing::mock_realm::MockRealm;
//! use branch_join_core::value::{join_value, Value};
//!
//! let realm = MockRealm::new();
//! let cond = realm.fresh_abstract_condition("x > 0");
//! let joined = join_value(&realm, &cond, Some(&Value::number(1.0)), Some(&Value::number(2.0)));
//! assert!(realm.is_conditional(&joined));
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod mock_realm;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
