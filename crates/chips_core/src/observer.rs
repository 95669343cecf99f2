//! Callback contracts consumed by the presentation layer.
//!
//! # Responsibility
//! - Define the zero-argument change signal for the displayed collection.
//! - Define the selection callback fired after a chip is taken.
//!
//! # Invariants
//! - Change observers receive no diff; they re-query the store, which is
//!   already unlocked and fully updated when the signal fires.

use crate::model::chip::Chip;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Receives one signal per logical change of the displayed collection.
pub trait ChipChangeObserver: Send + Sync {
    fn on_displayed_changed(&self);
}

impl<F> ChipChangeObserver for F
where
    F: Fn() + Send + Sync,
{
    fn on_displayed_changed(&self) {
        self()
    }
}

/// Receives the chip chosen by an item activation.
pub trait ChipSelectionListener: Send + Sync {
    fn on_chip_selected(&self, chip: &Arc<Chip>);
}

impl<F> ChipSelectionListener for F
where
    F: Fn(&Arc<Chip>) + Send + Sync,
{
    fn on_chip_selected(&self, chip: &Arc<Chip>) {
        self(chip)
    }
}

/// Registration handle returned by `ChipStore::add_change_observer`.
///
/// Ids are unique per store instance and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl Display for ObserverId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}
