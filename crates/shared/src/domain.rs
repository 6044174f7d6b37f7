use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

pub const GRID_ROWS: usize = 100;
pub const GRID_COLUMNS: usize = 3;
pub const CELL_COUNT: usize = GRID_ROWS * GRID_COLUMNS;

/// Position of a cell in the 100 x 3 grid, numbered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CellIndex(usize);

impl CellIndex {
    pub const FIRST: CellIndex = CellIndex(0);

    pub fn new(index: usize) -> Result<Self, GridError> {
        if index < CELL_COUNT {
            Ok(Self(index))
        } else {
            Err(GridError::IndexOutOfRange {
                index,
                limit: CELL_COUNT,
            })
        }
    }

    pub fn from_position(row: usize, col: usize) -> Option<Self> {
        (row < GRID_ROWS && col < GRID_COLUMNS).then_some(Self(row * GRID_COLUMNS + col))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn row(self) -> usize {
        self.0 / GRID_COLUMNS
    }

    pub fn col(self) -> usize {
        self.0 % GRID_COLUMNS
    }

    /// Neighbouring cell in `direction`, or `None` at the grid edge. Rows and
    /// columns never wrap.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (row, col) = (self.row(), self.col());
        match direction {
            Direction::Up => row.checked_sub(1).map(|row| Self(row * GRID_COLUMNS + col)),
            Direction::Down => Self::from_position(row + 1, col),
            Direction::Left => col.checked_sub(1).map(|col| Self(row * GRID_COLUMNS + col)),
            Direction::Right => Self::from_position(row, col + 1),
        }
    }

    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT).map(CellIndex)
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = GridError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CellIndex> for usize {
    fn from(value: CellIndex) -> Self {
        value.0
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
    pub tags: Vec<String>,
}

const PREVIEW_MAX_WORDS: usize = 5;

impl Quote {
    /// Short form shown inside a grid cell: the opening words of the text,
    /// quoted and followed by an ellipsis.
    pub fn preview(&self) -> String {
        let words = self
            .text
            .split(' ')
            .take(PREVIEW_MAX_WORDS)
            .collect::<Vec<_>>();
        format!("\"{}...\"", words.join(" "))
    }
}

/// What an adapter sees for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CellView {
    #[default]
    Empty,
    Loading {
        message: Option<String>,
    },
    Filled(Quote),
}

impl CellView {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellView::Empty)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CellView::Loading { .. })
    }

    pub fn quote(&self) -> Option<&Quote> {
        match self {
            CellView::Filled(quote) => Some(quote),
            _ => None,
        }
    }

    /// Text rendered inside the cell.
    pub fn label(&self) -> String {
        match self {
            CellView::Empty => "Empty".to_string(),
            CellView::Loading { message } => message
                .clone()
                .unwrap_or_else(|| "Loading...".to_string()),
            CellView::Filled(quote) => quote.preview(),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
