//! Backend commands queued from UI to backend worker.

use shared::domain::CellIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Launch { index: CellIndex },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Launch { .. } => "launch",
        }
    }
}
