use super::*;

use std::{collections::VecDeque, ops::RangeInclusive, time::Duration};

use shared::{corpus::QUOTES, domain::CellView};
use tokio::time::Instant;

struct ScriptedRandom {
    page: u32,
    delays_ms: VecDeque<u64>,
    quotes: VecDeque<usize>,
}

impl ScriptedRandom {
    fn new(page: u32, delays_ms: &[u64], quotes: &[usize]) -> Box<Self> {
        Box::new(Self {
            page,
            delays_ms: delays_ms.iter().copied().collect(),
            quotes: quotes.iter().copied().collect(),
        })
    }
}

impl RandomSource for ScriptedRandom {
    fn page_number(&mut self, _pages: RangeInclusive<u32>) -> u32 {
        self.page
    }

    fn stage_delay(&mut self, min: Duration, _max: Duration) -> Duration {
        self.delays_ms
            .pop_front()
            .map(Duration::from_millis)
            .unwrap_or(min)
    }

    fn quote_index(&mut self, _len: usize) -> usize {
        self.quotes.pop_front().unwrap_or(0)
    }
}

fn cell(index: usize) -> CellIndex {
    CellIndex::new(index).expect("cell index")
}

fn scripted_pipeline(random: Box<ScriptedRandom>) -> Arc<FetchPipeline> {
    FetchPipeline::new_with_dependencies(Settings::default(), Arc::new(CellStore::new()), random)
}

#[tokio::test(start_paused = true)]
async fn run_reports_five_stages_in_order_with_their_delays() {
    let pipeline = scripted_pipeline(ScriptedRandom::new(
        7,
        &[1200, 1500, 2400, 1800, 1300],
        &[3],
    ));
    let mut events = pipeline.subscribe_events();
    let start = Instant::now();
    pipeline.launch(cell(4)).expect("run launched");

    let mut stages = Vec::new();
    let filled_at = loop {
        match events.recv().await.expect("event") {
            FetchEvent::Started { index } => assert_eq!(index, cell(4)),
            FetchEvent::StageEntered {
                index,
                stage,
                message,
            } => {
                assert_eq!(index, cell(4));
                stages.push((stage, message, start.elapsed().as_millis()));
            }
            FetchEvent::Filled { index, quote } => {
                assert_eq!(index, cell(4));
                assert_eq!(quote, QUOTES[3].to_quote());
                break start.elapsed().as_millis();
            }
        }
    };

    assert_eq!(
        stages,
        vec![
            (1, "Starting fetch...".to_string(), 0),
            (2, "Logging in...".to_string(), 1200),
            (3, "Browsing to page 7...".to_string(), 2700),
            (4, "Selecting random quote...".to_string(), 5100),
            (5, "Selected.".to_string(), 6900),
        ]
    );
    assert_eq!(filled_at, 8200);
    assert_eq!(
        pipeline.store().view(cell(4)),
        CellView::Filled(QUOTES[3].to_quote())
    );
}

#[tokio::test(start_paused = true)]
async fn store_tracks_the_current_stage_while_loading() {
    let pipeline = scripted_pipeline(ScriptedRandom::new(2, &[1200; 5], &[0]));
    let store = pipeline.store();
    let handle = pipeline.launch(cell(10)).expect("run launched");

    assert_eq!(store.view(cell(10)), CellView::Loading { message: None });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        store.view(cell(10)),
        CellView::Loading {
            message: Some("Starting fetch...".to_string())
        }
    );

    tokio::time::sleep(Duration::from_millis(2400)).await;
    assert_eq!(
        store.view(cell(10)),
        CellView::Loading {
            message: Some("Browsing to page 2...".to_string())
        }
    );

    handle.await.expect("run task");
    assert!(!store.is_loading(cell(10)));
    assert_eq!(store.view(cell(10)), CellView::Filled(QUOTES[0].to_quote()));
}

#[tokio::test(start_paused = true)]
async fn relaunching_a_loading_or_filled_cell_is_suppressed() {
    let pipeline = scripted_pipeline(ScriptedRandom::new(1, &[], &[5, 6]));
    let handle = pipeline.launch(cell(2)).expect("first launch");
    assert!(pipeline.launch(cell(2)).is_none());

    handle.await.expect("run task");
    assert!(pipeline.launch(cell(2)).is_none());

    let store = pipeline.store();
    assert_eq!(store.filled_count(), 1);
    assert_eq!(store.view(cell(2)), CellView::Filled(QUOTES[5].to_quote()));
}

#[tokio::test(start_paused = true)]
async fn wait_idle_returns_once_every_run_has_filled() {
    let pipeline = FetchPipeline::new(Settings {
        seed: Some(11),
        ..Settings::default()
    });
    let start = Instant::now();
    for index in [0, 1, 2, 150, 299] {
        pipeline.launch(cell(index)).expect("run launched");
    }

    pipeline.wait_idle().await;

    let store = pipeline.store();
    assert_eq!(store.loading_count(), 0);
    assert_eq!(store.filled_count(), 5);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(5 * 1200));
    assert!(elapsed <= Duration::from_millis(5 * 2400 + 5));
}

#[tokio::test(start_paused = true)]
async fn wait_idle_without_runs_returns_immediately() {
    let pipeline = FetchPipeline::new(Settings::default());
    let start = Instant::now();
    pipeline.wait_idle().await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn run_started_event_precedes_first_stage() {
    let pipeline = scripted_pipeline(ScriptedRandom::new(3, &[], &[]));
    let mut events = pipeline.subscribe_events();
    pipeline.launch(cell(8)).expect("run launched");

    assert_eq!(
        events.recv().await.expect("event"),
        FetchEvent::Started { index: cell(8) }
    );
    match events.recv().await.expect("event") {
        FetchEvent::StageEntered { stage, .. } => assert_eq!(stage, 1),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn launch_outside_a_runtime_leaves_the_cell_empty() {
    let pipeline = scripted_pipeline(ScriptedRandom::new(1, &[], &[]));
    let mut events = pipeline.subscribe_events();

    assert!(pipeline.launch(cell(11)).is_none());
    let store = pipeline.store();
    assert_eq!(store.view(cell(11)), CellView::Empty);
    assert!(store.is_launchable(cell(11)));
    assert!(events.try_recv().is_err());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("runtime");
    runtime.block_on(async {
        pipeline.launch(cell(11)).expect("run launched");
        pipeline.wait_idle().await;
    });
    assert_eq!(store.filled_count(), 1);
}
