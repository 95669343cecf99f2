//! Collection ownership and change propagation.
//!
//! # Responsibility
//! - Hold the source-of-truth chip collections for one list session.
//! - Serialize mutations and fan out change notifications to observers.
//!
//! # Invariants
//! - No global registry: observers live as long as their store.

pub mod chip_store;
