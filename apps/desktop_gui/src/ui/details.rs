use shared::domain::{CellIndex, CellView, Quote};

pub const NO_FOCUS_TEXT: &str = "Press space to activate keyboard navigation";
pub const EMPTY_CELL_TEXT: &str = "Cell is empty";

/// What the details panel shows for the focused cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsContent {
    Inactive,
    Empty,
    Quote(Quote),
}

impl DetailsContent {
    pub fn from_focus(focused: Option<(CellIndex, CellView)>) -> Self {
        match focused {
            None => DetailsContent::Inactive,
            Some((_, CellView::Filled(quote))) => DetailsContent::Quote(quote),
            // A loading cell has no quote yet.
            Some((_, CellView::Empty | CellView::Loading { .. })) => DetailsContent::Empty,
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            DetailsContent::Inactive => Some(NO_FOCUS_TEXT),
            DetailsContent::Empty => Some(EMPTY_CELL_TEXT),
            DetailsContent::Quote(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/details_tests.rs"]
mod tests;
