//! Command orchestration from grid key handling to the backend command queue.

use std::cell::RefCell;

use crossbeam_channel::{Sender, TrySendError};
use grid_core::FetchLauncher;
use shared::domain::CellIndex;

use crate::backend_bridge::commands::BackendCommand;

pub const QUEUE_FULL_STATUS: &str = "UI command queue is full; please retry";
pub const DISCONNECTED_STATUS: &str =
    "Backend command processor disconnected (possible startup/runtime failure)";

/// Queues `cmd` without blocking the UI thread. On failure returns the status
/// line to show.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), &'static str> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(QUEUE_FULL_STATUS),
        Err(TrySendError::Disconnected(_)) => Err(DISCONNECTED_STATUS),
    }
}

/// Launcher handed to the grid session; launches travel to the backend worker
/// as [`BackendCommand::Launch`].
pub struct QueueLauncher {
    cmd_tx: Sender<BackendCommand>,
    failure: RefCell<Option<&'static str>>,
}

impl QueueLauncher {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            cmd_tx,
            failure: RefCell::new(None),
        }
    }

    /// Most recent dispatch failure since the last call.
    pub fn take_failure(&self) -> Option<&'static str> {
        self.failure.borrow_mut().take()
    }
}

impl FetchLauncher for QueueLauncher {
    fn launch(&self, index: CellIndex) -> bool {
        match dispatch_backend_command(&self.cmd_tx, BackendCommand::Launch { index }) {
            Ok(()) => true,
            Err(status) => {
                tracing::warn!(index = index.get(), "{status}");
                self.failure.replace(Some(status));
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
