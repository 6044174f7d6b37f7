//! Shared per-cell content and loading state.
//!
//! Every write locks the whole map and updates only the slot of its own index,
//! so concurrent runs for different cells always merge into the latest state.

use std::{
    collections::{hash_map::Entry, BTreeMap, HashMap},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use shared::domain::{CellIndex, CellView, Quote};
use tracing::warn;

#[derive(Debug, Clone)]
enum CellSlot {
    Loading { message: Option<String> },
    Filled(Quote),
}

impl CellSlot {
    fn view(&self) -> CellView {
        match self {
            CellSlot::Loading { message } => CellView::Loading {
                message: message.clone(),
            },
            CellSlot::Filled(quote) => CellView::Filled(quote.clone()),
        }
    }
}

/// An absent slot is an empty cell.
#[derive(Debug, Default)]
pub struct CellStore {
    slots: RwLock<HashMap<CellIndex, CellSlot>>,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<CellIndex, CellSlot>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CellIndex, CellSlot>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn view(&self, index: CellIndex) -> CellView {
        self.read()
            .get(&index)
            .map(CellSlot::view)
            .unwrap_or_default()
    }

    /// True when the cell holds no quote, whether or not a run is active.
    pub fn is_empty(&self, index: CellIndex) -> bool {
        !matches!(self.read().get(&index), Some(CellSlot::Filled(_)))
    }

    /// True when the cell is empty and has no active run.
    pub fn is_launchable(&self, index: CellIndex) -> bool {
        !self.read().contains_key(&index)
    }

    pub fn is_loading(&self, index: CellIndex) -> bool {
        matches!(self.read().get(&index), Some(CellSlot::Loading { .. }))
    }

    /// Marks `index` as loading if it is empty and idle. Returns false when a
    /// run is already active or the cell is filled.
    pub fn try_begin_run(&self, index: CellIndex) -> bool {
        match self.write().entry(index) {
            Entry::Vacant(slot) => {
                slot.insert(CellSlot::Loading { message: None });
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn set_stage_message(&self, index: CellIndex, message: String) {
        match self.write().get_mut(&index) {
            Some(CellSlot::Loading { message: current }) => *current = Some(message),
            _ => warn!(
                index = index.get(),
                "stage message for a cell without an active run"
            ),
        }
    }

    /// Writes the quote and drops the loading state in one update.
    pub fn complete_run(&self, index: CellIndex, quote: Quote) {
        let mut slots = self.write();
        if matches!(slots.get(&index), Some(CellSlot::Loading { .. })) {
            slots.insert(index, CellSlot::Filled(quote));
        } else {
            warn!(
                index = index.get(),
                "run completion for a cell without an active run"
            );
        }
    }

    /// Views of all 300 cells in index order.
    pub fn snapshot(&self) -> Vec<CellView> {
        let slots = self.read();
        CellIndex::all()
            .map(|index| slots.get(&index).map(CellSlot::view).unwrap_or_default())
            .collect()
    }

    /// Views of every cell that is loading or filled.
    pub fn occupied(&self) -> BTreeMap<CellIndex, CellView> {
        self.read()
            .iter()
            .map(|(index, slot)| (*index, slot.view()))
            .collect()
    }

    pub fn loading_count(&self) -> usize {
        self.read()
            .values()
            .filter(|slot| matches!(slot, CellSlot::Loading { .. }))
            .count()
    }

    pub fn filled_count(&self) -> usize {
        self.read()
            .values()
            .filter(|slot| matches!(slot, CellSlot::Filled(_)))
            .count()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
