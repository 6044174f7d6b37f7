use std::sync::Arc;

use fetch_sim::{CellStore, FetchPipeline};
use shared::{
    domain::{CellIndex, CellView},
    input::KeyInput,
};
use tracing::debug;

use crate::{GridState, KeyOutcome};

/// Starts fetch runs on behalf of a [`GridSession`].
pub trait FetchLauncher {
    /// Returns false when the launch was refused, for example because the
    /// cell was claimed by another run in the meantime.
    fn launch(&self, index: CellIndex) -> bool;
}

impl FetchLauncher for Arc<FetchPipeline> {
    fn launch(&self, index: CellIndex) -> bool {
        FetchPipeline::launch(self, index).is_some()
    }
}

impl<L: FetchLauncher + ?Sized> FetchLauncher for &L {
    fn launch(&self, index: CellIndex) -> bool {
        (**self).launch(index)
    }
}

/// Interaction state bound to the cell store it reads and the launcher that
/// writes to it.
pub struct GridSession<L> {
    state: GridState,
    cells: Arc<CellStore>,
    launcher: L,
}

impl<L: FetchLauncher> GridSession<L> {
    pub fn new(cells: Arc<CellStore>, launcher: L) -> Self {
        Self {
            state: GridState::new(),
            cells,
            launcher,
        }
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn cells(&self) -> &CellStore {
        &self.cells
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn handle_key(&mut self, input: &KeyInput) -> KeyOutcome {
        let outcome = self.state.handle_key(input, self.cells.as_ref());
        for index in &outcome.launches {
            if !self.launcher.launch(*index) {
                debug!(index = index.get(), "launch refused");
            }
        }
        outcome
    }

    pub fn cell_view(&self, index: CellIndex) -> CellView {
        self.cells.view(index)
    }

    /// View of the focused cell, `None` until navigation is activated.
    pub fn focused_view(&self) -> Option<(CellIndex, CellView)> {
        let focus = self.state.focus()?;
        Some((focus, self.cells.view(focus)))
    }
}

impl GridSession<Arc<FetchPipeline>> {
    pub fn with_pipeline(pipeline: Arc<FetchPipeline>) -> Self {
        Self::new(pipeline.store(), pipeline)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
