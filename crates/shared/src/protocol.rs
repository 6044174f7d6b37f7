use serde::{Deserialize, Serialize};

use crate::domain::{CellIndex, Quote};

/// Progress notifications broadcast by the fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum FetchEvent {
    Started {
        index: CellIndex,
    },
    StageEntered {
        index: CellIndex,
        stage: u8,
        message: String,
    },
    Filled {
        index: CellIndex,
        quote: Quote,
    },
}

impl FetchEvent {
    pub fn index(&self) -> CellIndex {
        match self {
            FetchEvent::Started { index }
            | FetchEvent::StageEntered { index, .. }
            | FetchEvent::Filled { index, .. } => *index,
        }
    }
}
