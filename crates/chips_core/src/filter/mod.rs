//! Constraint-driven filtering over chip collections.
//!
//! # Responsibility
//! - Derive the displayed collection from the original one for a typed
//!   constraint.
//! - Stay pure: no store access, no notification side effects.

pub mod chip_filter;
