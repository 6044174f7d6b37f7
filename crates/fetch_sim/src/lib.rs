//! Simulated per-cell quote fetching.
//!
//! A launched run walks through five timed stages, publishing each stage's
//! message into the shared [`CellStore`], and finally writes a quote drawn from
//! the fixed corpus. Runs for different cells are independent tokio tasks.

use std::sync::{Arc, Mutex, PoisonError};

use shared::{domain::CellIndex, protocol::FetchEvent};
use tokio::{
    runtime::Handle,
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

pub mod config;
pub mod random;
pub mod stage;
pub mod store;

pub use config::{load_settings, Settings};
pub use random::{RandomSource, RngSource};
pub use stage::{FetchRun, RunPlan, Stage};
pub use store::CellStore;

const EVENT_CHANNEL_CAPACITY: usize = 1024;

pub struct FetchPipeline {
    store: Arc<CellStore>,
    random: Mutex<Box<dyn RandomSource>>,
    settings: Settings,
    events: broadcast::Sender<FetchEvent>,
}

impl FetchPipeline {
    /// Pipeline over a fresh store, seeded from `settings.seed` when set.
    pub fn new(settings: Settings) -> Arc<Self> {
        let random: Box<dyn RandomSource> = match settings.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        };
        Self::new_with_dependencies(settings, Arc::new(CellStore::new()), random)
    }

    pub fn new_with_dependencies(
        settings: Settings,
        store: Arc<CellStore>,
        random: Box<dyn RandomSource>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            store,
            random: Mutex::new(random),
            settings,
            events,
        })
    }

    pub fn store(&self) -> Arc<CellStore> {
        Arc::clone(&self.store)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<FetchEvent> {
        self.events.subscribe()
    }

    /// Starts a run for `index` on the current tokio runtime.
    ///
    /// Returns `None` without side effects when the cell already has an
    /// active run, already holds a quote, or no runtime is entered.
    pub fn launch(&self, index: CellIndex) -> Option<JoinHandle<()>> {
        let Ok(runtime) = Handle::try_current() else {
            warn!(index = index.get(), "fetch launch outside a tokio runtime ignored");
            return None;
        };
        if !self.store.try_begin_run(index) {
            debug!(
                index = index.get(),
                "fetch launch suppressed; cell is loading or filled"
            );
            return None;
        }

        let plan = {
            let mut random = self.random.lock().unwrap_or_else(PoisonError::into_inner);
            RunPlan::draw(random.as_mut(), &self.settings)
        };
        info!(
            index = index.get(),
            page = plan.page,
            total_ms = plan.total_delay().as_millis() as u64,
            "fetch run started"
        );
        let _ = self.events.send(FetchEvent::Started { index });

        let run = FetchRun::new(index, plan);
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        Some(runtime.spawn(drive_run(run, store, events)))
    }

    /// Resolves once no cell has an active run.
    pub async fn wait_idle(&self) {
        let mut events = self.events.subscribe();
        while self.store.loading_count() > 0 {
            match events.recv().await {
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    }
}

async fn drive_run(
    mut run: FetchRun,
    store: Arc<CellStore>,
    events: broadcast::Sender<FetchEvent>,
) {
    let index = run.index();
    while let Some((stage, message, delay)) = run.current() {
        debug!(
            index = index.get(),
            stage = stage.number(),
            delay_ms = delay.as_millis() as u64,
            "{message}"
        );
        store.set_stage_message(index, message.clone());
        let _ = events.send(FetchEvent::StageEntered {
            index,
            stage: stage.number(),
            message,
        });
        tokio::time::sleep(delay).await;
        run.advance();
    }

    let quote = run.plan().quote.clone();
    store.complete_run(index, quote.clone());
    info!(index = index.get(), author = %quote.author, "fetch run filled");
    let _ = events.send(FetchEvent::Filled { index, quote });
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
