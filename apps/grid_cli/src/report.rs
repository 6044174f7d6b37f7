use std::io::Write;

use anyhow::Context;
use grid_core::{FetchLauncher, GridSession};
use serde::Serialize;
use shared::{
    domain::{CellIndex, CellView},
    protocol::FetchEvent,
};
use tokio::sync::broadcast::{error::RecvError, Receiver};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellEntry {
    pub index: CellIndex,
    pub view: CellView,
}

/// Final state of a headless session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridReport {
    pub focus: Option<CellIndex>,
    pub selection: Vec<CellIndex>,
    pub launched: usize,
    pub cells: Vec<CellEntry>,
}

impl GridReport {
    pub fn capture<L: FetchLauncher>(session: &GridSession<L>, launched: usize) -> Self {
        Self {
            focus: session.state().focus(),
            selection: session.state().selection().iter().copied().collect(),
            launched,
            cells: session
                .cells()
                .occupied()
                .into_iter()
                .map(|(index, view)| CellEntry { index, view })
                .collect(),
        }
    }

    pub fn write_json(&self, out: &mut impl Write, pretty: bool) -> anyhow::Result<()> {
        let written = if pretty {
            serde_json::to_writer_pretty(&mut *out, self)
        } else {
            serde_json::to_writer(&mut *out, self)
        };
        written.context("failed to serialize grid report")?;
        writeln!(out)?;
        Ok(())
    }
}

/// Writes every pipeline event as one JSON line until `expected` runs have
/// filled. Stops early if the receiver lagged and events were lost.
pub async fn stream_events(
    events: &mut Receiver<FetchEvent>,
    expected: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut filled = 0;
    while filled < expected {
        match events.recv().await {
            Ok(event) => {
                if matches!(event, FetchEvent::Filled { .. }) {
                    filled += 1;
                }
                serde_json::to_writer(&mut *out, &event).context("failed to serialize event")?;
                writeln!(out)?;
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event stream lagged; remaining events dropped");
                return Ok(());
            }
            Err(RecvError::Closed) => return Ok(()),
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
