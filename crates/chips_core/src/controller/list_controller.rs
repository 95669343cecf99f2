//! List controller wiring text and activation events to the store.
//!
//! # Responsibility
//! - Re-filter on every constraint change and publish the result.
//! - Resolve an activated position, take the chip and report the selection.
//!
//! # Invariants
//! - Holds no filtering state between calls; each change recomputes from the
//!   full original collection.
//! - The selection listener fires only after a successful take.

use crate::filter::chip_filter::filter_chips;
use crate::model::chip::Chip;
use crate::observer::ChipSelectionListener;
use crate::store::chip_store::{ChipStore, StoreResult};
use log::{info, warn};
use std::sync::Arc;

/// Mediates user-facing list events; contains no matching logic itself.
pub struct ListController {
    store: Arc<ChipStore>,
    listener: Arc<dyn ChipSelectionListener>,
}

impl ListController {
    pub fn new(store: Arc<ChipStore>, listener: Arc<dyn ChipSelectionListener>) -> Self {
        Self { store, listener }
    }

    /// Store shared with presentation adapters.
    pub fn store(&self) -> &Arc<ChipStore> {
        &self.store
    }

    /// Recomputes displayed chips for raw `constraint` text.
    ///
    /// Returns the new displayed count. Observers are notified once.
    pub fn on_constraint_changed(&self, constraint: &str) -> usize {
        self.store
            .replace_displayed_with(|original| filter_chips(constraint, original))
    }

    /// Takes the chip shown at `position` and reports it to the listener.
    ///
    /// # Errors
    /// - `OutOfRange` when `position` was captured before the displayed
    ///   collection shrank. The listener is not called and state is unchanged.
    pub fn on_item_activated(&self, position: usize) -> StoreResult<Arc<Chip>> {
        let chip = self.store.take_chip_at(position).map_err(|err| {
            warn!(
                "event=item_activate module=controller status=error position={} reason=out_of_range",
                position
            );
            err
        })?;

        info!(
            "event=item_activate module=controller status=ok position={} chip_id={}",
            position,
            chip.id()
        );
        self.listener.on_chip_selected(&chip);
        Ok(chip)
    }
}
