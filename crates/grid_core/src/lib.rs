//! Keyboard-driven focus and selection over the 300-cell grid.
//!
//! [`GridState::handle_key`] applies one key press synchronously and reports
//! whether the press was consumed plus the cells that should start a fetch.
//! It only reads cell contents, through [`CellLookup`], and never writes them.

use std::collections::BTreeSet;

use fetch_sim::CellStore;
use shared::{
    domain::{CellIndex, Direction},
    input::{Key, KeyInput},
};
use tracing::debug;

pub mod session;

pub use session::{FetchLauncher, GridSession};

pub trait CellLookup {
    /// True when `index` holds no quote and has no active run.
    fn is_launchable(&self, index: CellIndex) -> bool;
}

impl CellLookup for CellStore {
    fn is_launchable(&self, index: CellIndex) -> bool {
        CellStore::is_launchable(self, index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The environment's default action for the key should be suppressed.
    pub consumed: bool,
    pub launches: Vec<CellIndex>,
}

impl KeyOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed() -> Self {
        Self {
            consumed: true,
            launches: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Toggle,
    Activate,
    Clear,
    SelectAll,
}

impl Command {
    fn from_input(input: &KeyInput) -> Option<Self> {
        match &input.key {
            Key::ArrowUp => Some(Command::Move(Direction::Up)),
            Key::ArrowDown => Some(Command::Move(Direction::Down)),
            Key::ArrowLeft => Some(Command::Move(Direction::Left)),
            Key::ArrowRight => Some(Command::Move(Direction::Right)),
            Key::Char('x' | 'X') => Some(Command::Toggle),
            Key::Space => Some(Command::Activate),
            Key::Escape => Some(Command::Clear),
            Key::Char('a' | 'A') if input.modifiers.command() => Some(Command::SelectAll),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    focus: Option<CellIndex>,
    selection: BTreeSet<CellIndex>,
    anchor: Option<CellIndex>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Option<CellIndex> {
        self.focus
    }

    pub fn selection(&self) -> &BTreeSet<CellIndex> {
        &self.selection
    }

    pub fn anchor(&self) -> Option<CellIndex> {
        self.anchor
    }

    pub fn is_selected(&self, index: CellIndex) -> bool {
        self.selection.contains(&index)
    }

    pub fn handle_key(
        &mut self,
        input: &KeyInput,
        cells: &(impl CellLookup + ?Sized),
    ) -> KeyOutcome {
        // The first key press of any kind only activates navigation.
        let Some(focus) = self.focus else {
            self.focus = Some(CellIndex::FIRST);
            debug!(key = %input, "keyboard navigation activated");
            return KeyOutcome::consumed();
        };

        let Some(command) = Command::from_input(input) else {
            return KeyOutcome::ignored();
        };

        match command {
            Command::Move(direction) => self.move_focus(focus, direction, input.modifiers.shift),
            Command::Toggle => self.toggle(focus),
            Command::Activate => return self.activate(focus, cells),
            Command::Clear => {
                self.selection.clear();
                self.anchor = None;
                debug!("selection cleared");
            }
            Command::SelectAll => {
                self.selection = CellIndex::all().collect();
                self.anchor = None;
                debug!("all cells selected");
            }
        }
        KeyOutcome::consumed()
    }

    fn move_focus(&mut self, focus: CellIndex, direction: Direction, extend: bool) {
        let Some(next) = focus.step(direction) else {
            return;
        };

        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(focus);
                self.selection = BTreeSet::from([focus]);
            }
            // Only the visited cell joins the selection; no range fill.
            self.selection.insert(next);
        } else {
            self.anchor = None;
        }

        self.focus = Some(next);
        debug!(
            from = focus.get(),
            to = next.get(),
            extend,
            selected = self.selection.len(),
            "focus moved"
        );
    }

    fn toggle(&mut self, focus: CellIndex) {
        if !self.selection.remove(&focus) {
            self.selection.insert(focus);
        }
        self.anchor = None;
    }

    fn activate(&self, focus: CellIndex, cells: &(impl CellLookup + ?Sized)) -> KeyOutcome {
        let launches = if self.selection.is_empty() {
            vec![focus]
        } else {
            self.selection.iter().copied().collect()
        }
        .into_iter()
        .filter(|index| cells.is_launchable(*index))
        .collect::<Vec<_>>();

        debug!(
            selected = self.selection.len(),
            launching = launches.len(),
            "activate"
        );
        KeyOutcome {
            consumed: true,
            launches,
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
