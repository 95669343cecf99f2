//! Domain model for the filterable chip list.
//!
//! # Responsibility
//! - Define the record shared by the original, displayed and selected
//!   collections.
//!
//! # Invariants
//! - Every chip is identified by a stable `ChipId`.
//! - Chips are shared by `Arc` and never mutated after construction.

pub mod chip;
