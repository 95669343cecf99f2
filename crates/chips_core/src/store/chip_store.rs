//! Chip collections and change-observer registry.
//!
//! # Responsibility
//! - Own the original, displayed and selected chip collections.
//! - Notify registered observers after every committed displayed change.
//!
//! # Invariants
//! - Collections and observers share one mutex; read-then-write sequences
//!   (resolve + take, read original + replace displayed) run under it.
//! - Notifications fire after the lock is released, exactly once per observer
//!   per logical change, and only when `displayed` changed (except
//!   `set_displayed`, which always counts as a change).
//! - `selected` and `displayed` never share a chip. Taking a chip also removes
//!   it from `original`, so re-filtering cannot bring it back.
//! - `selected` may hold chips that never were in `original` (pre-selection).

use crate::model::chip::{Chip, ChipId};
use crate::observer::{ChipChangeObserver, ObserverId};
use log::{debug, error};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for positional access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Position is outside `[0, len)` of the displayed collection.
    OutOfRange { index: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "position {index} is out of range for {len} displayed chips")
            }
        }
    }
}

impl Error for StoreError {}

#[derive(Default)]
struct StoreState {
    original: Vec<Arc<Chip>>,
    displayed: Vec<Arc<Chip>>,
    selected: Vec<Arc<Chip>>,
    observers: BTreeMap<ObserverId, Arc<dyn ChipChangeObserver>>,
    next_observer_id: u64,
}

impl StoreState {
    fn chip_at(&self, index: usize) -> StoreResult<Arc<Chip>> {
        self.displayed
            .get(index)
            .cloned()
            .ok_or(StoreError::OutOfRange {
                index,
                len: self.displayed.len(),
            })
    }

    /// Moves `chip` into `selected`. Returns whether `displayed` changed.
    fn take(&mut self, chip: &Arc<Chip>) -> bool {
        let displayed_changed = remove_by_id(&mut self.displayed, chip.id()).is_some();
        remove_by_id(&mut self.original, chip.id());
        if position_of(&self.selected, chip.id()).is_none() {
            self.selected.push(Arc::clone(chip));
        }
        displayed_changed
    }

    /// Drops selected chips and repeated ids, keeping first occurrences.
    fn displayable(&self, chips: Vec<Arc<Chip>>) -> Vec<Arc<Chip>> {
        let mut seen = self.selected.iter().map(|chip| chip.id()).collect::<HashSet<_>>();
        chips
            .into_iter()
            .filter(|chip| seen.insert(chip.id()))
            .collect()
    }
}

/// Session-scoped store backing one filterable chip list.
#[derive(Default)]
pub struct ChipStore {
    state: Mutex<StoreState>,
}

impl ChipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose displayed collection starts as the full original.
    ///
    /// Repeated ids keep their first occurrence only.
    pub fn with_chips(original: Vec<Arc<Chip>>) -> Self {
        let original = unique_by_id(original);
        let displayed = original.clone();
        Self {
            state: Mutex::new(StoreState {
                original,
                displayed,
                ..StoreState::default()
            }),
        }
    }

    /// Replaces the displayed collection in full and notifies once.
    ///
    /// Selected chips and repeated ids are dropped from `chips`.
    pub fn set_displayed(&self, chips: Vec<Arc<Chip>>) {
        self.commit(|state| {
            state.displayed = state.displayable(chips);
            debug!(
                "event=displayed_replace module=store status=ok displayed={}",
                state.displayed.len()
            );
            ((), true)
        });
    }

    /// Derives a new displayed collection from `original` under the store lock.
    ///
    /// Returns the new displayed count. Notifies once. Selected chips and
    /// repeated ids in the derived sequence are dropped.
    pub fn replace_displayed_with<F>(&self, derive: F) -> usize
    where
        F: FnOnce(&[Arc<Chip>]) -> Vec<Arc<Chip>>,
    {
        self.commit(|state| {
            let derived = derive(&state.original);
            state.displayed = state.displayable(derived);
            debug!(
                "event=displayed_replace module=store status=ok original={} displayed={}",
                state.original.len(),
                state.displayed.len()
            );
            (state.displayed.len(), true)
        })
    }

    /// Moves `chip` from displayed (and original) into selected.
    ///
    /// A chip that is not displayed (taken twice, or filtered out by the
    /// current constraint) is still removed from `original` and recorded as
    /// selected; only the notification is skipped. Returns whether
    /// `displayed` changed.
    pub fn take_chip(&self, chip: &Arc<Chip>) -> bool {
        self.commit(|state| {
            let changed = state.take(chip);
            debug!(
                "event=chip_take module=store status=ok chip_id={} displayed_changed={}",
                chip.id(),
                changed
            );
            (changed, changed)
        })
    }

    /// Resolves the chip at `index` and takes it in one critical section.
    ///
    /// # Errors
    /// - `OutOfRange` when `index` is stale or invalid; state is untouched.
    pub fn take_chip_at(&self, index: usize) -> StoreResult<Arc<Chip>> {
        self.commit(|state| match state.chip_at(index) {
            Ok(chip) => {
                let changed = state.take(&chip);
                debug!(
                    "event=chip_take module=store status=ok index={} chip_id={}",
                    index,
                    chip.id()
                );
                (Ok(chip), changed)
            }
            Err(err) => {
                debug!(
                    "event=chip_take module=store status=error index={} displayed={}",
                    index,
                    state.displayed.len()
                );
                (Err(err), false)
            }
        })
    }

    /// Returns the displayed chip at `index`.
    pub fn chip_at(&self, index: usize) -> StoreResult<Arc<Chip>> {
        self.lock().chip_at(index)
    }

    /// Number of displayed chips.
    pub fn count(&self) -> usize {
        self.lock().displayed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Appends a chip to the original collection.
    ///
    /// Displayed is untouched until the next re-filter, so nothing is
    /// notified. Returns `false` when the chip is already original or selected.
    pub fn add_chip(&self, chip: Arc<Chip>) -> bool {
        let mut state = self.lock();
        if position_of(&state.original, chip.id()).is_some()
            || position_of(&state.selected, chip.id()).is_some()
        {
            return false;
        }
        state.original.push(chip);
        true
    }

    /// Removes a chip from original and displayed.
    pub fn remove_chip(&self, id: ChipId) -> Option<Arc<Chip>> {
        self.commit(|state| {
            let from_original = remove_by_id(&mut state.original, id);
            let from_displayed = remove_by_id(&mut state.displayed, id);
            let changed = from_displayed.is_some();
            (from_original.or(from_displayed), changed)
        })
    }

    /// Records a chip as selected without a user activation.
    ///
    /// The chip does not need to belong to `original`. Returns `false` when it
    /// is already selected.
    pub fn preselect_chip(&self, chip: Arc<Chip>) -> bool {
        self.commit(|state| {
            if position_of(&state.selected, chip.id()).is_some() {
                return (false, false);
            }
            let changed = state.take(&chip);
            (true, changed)
        })
    }

    /// Moves a selected chip back into the original collection.
    ///
    /// It reappears in displayed on the next re-filter; nothing is notified.
    pub fn release_chip(&self, id: ChipId) -> Option<Arc<Chip>> {
        let mut state = self.lock();
        let chip = remove_by_id(&mut state.selected, id)?;
        if position_of(&state.original, id).is_none() {
            state.original.push(Arc::clone(&chip));
        }
        Some(chip)
    }

    pub fn original_chips(&self) -> Vec<Arc<Chip>> {
        self.lock().original.clone()
    }

    pub fn displayed_chips(&self) -> Vec<Arc<Chip>> {
        self.lock().displayed.clone()
    }

    pub fn selected_chips(&self) -> Vec<Arc<Chip>> {
        self.lock().selected.clone()
    }

    /// Registers an observer. No notification is sent.
    pub fn add_change_observer(&self, observer: Arc<dyn ChipChangeObserver>) -> ObserverId {
        let mut state = self.lock();
        let id = ObserverId::new(state.next_observer_id);
        state.next_observer_id += 1;
        state.observers.insert(id, observer);
        id
    }

    /// Unregisters an observer. Returns `false` for unknown ids.
    pub fn remove_change_observer(&self, id: ObserverId) -> bool {
        self.lock().observers.remove(&id).is_some()
    }

    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // Observers run outside the lock, so a poisoned guard still holds
        // fully committed state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `mutate` under the lock, then notifies if it reported a change.
    fn commit<R>(&self, mutate: impl FnOnce(&mut StoreState) -> (R, bool)) -> R {
        let (result, observers) = {
            let mut state = self.lock();
            let (result, changed) = mutate(&mut *state);
            let observers = if changed {
                state
                    .observers
                    .iter()
                    .map(|(id, observer)| (*id, Arc::clone(observer)))
                    .collect::<Vec<_>>()
            } else {
                Vec::new()
            };
            (result, observers)
        };

        notify(&observers);
        result
    }
}

fn notify(observers: &[(ObserverId, Arc<dyn ChipChangeObserver>)]) {
    for (id, observer) in observers {
        let outcome = catch_unwind(AssertUnwindSafe(|| observer.on_displayed_changed()));
        if outcome.is_err() {
            error!(
                "event=observer_notify module=store status=error observer={} reason=panic",
                id
            );
        }
    }
}

fn position_of(chips: &[Arc<Chip>], id: ChipId) -> Option<usize> {
    chips.iter().position(|chip| chip.id() == id)
}

fn unique_by_id(chips: Vec<Arc<Chip>>) -> Vec<Arc<Chip>> {
    let mut seen = HashSet::new();
    chips.into_iter().filter(|chip| seen.insert(chip.id())).collect()
}

fn remove_by_id(chips: &mut Vec<Arc<Chip>>, id: ChipId) -> Option<Arc<Chip>> {
    position_of(chips, id).map(|index| chips.remove(index))
}
