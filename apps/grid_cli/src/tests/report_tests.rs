use super::*;

use std::sync::Arc;

use fetch_sim::{FetchPipeline, Settings};
use serde_json::Value;
use shared::input::parse_key_sequence;

fn seeded_pipeline(seed: u64) -> Arc<FetchPipeline> {
    FetchPipeline::new(Settings {
        seed: Some(seed),
        ..Settings::default()
    })
}

fn replay(session: &mut GridSession<Arc<FetchPipeline>>, keys: &str) -> usize {
    parse_key_sequence(keys)
        .expect("keys")
        .iter()
        .map(|key| session.handle_key(key).launches.len())
        .sum()
}

#[tokio::test(start_paused = true)]
async fn report_lists_focus_selection_and_filled_cells() {
    let pipeline = seeded_pipeline(4);
    let mut session = GridSession::with_pipeline(Arc::clone(&pipeline));
    let launched = replay(&mut session, "space,right,shift+down,space");
    assert_eq!(launched, 2);

    pipeline.wait_idle().await;
    let report = GridReport::capture(&session, launched);

    assert_eq!(report.focus, CellIndex::new(4).ok());
    assert_eq!(
        report.selection,
        vec![CellIndex::new(1).expect("index"), CellIndex::new(4).expect("index")]
    );
    assert_eq!(report.cells.len(), 2);
    assert!(report
        .cells
        .iter()
        .all(|entry| matches!(entry.view, CellView::Filled(_))));

    let mut out = Vec::new();
    report.write_json(&mut out, false).expect("json");
    let json: Value = serde_json::from_slice(&out).expect("valid json");
    assert_eq!(json["focus"], 4);
    assert_eq!(json["selection"], serde_json::json!([1, 4]));
    assert_eq!(json["launched"], 2);
    assert_eq!(json["cells"][0]["index"], 1);
    assert_eq!(json["cells"][0]["view"]["type"], "filled");
    assert!(json["cells"][0]["view"]["payload"]["author"].is_string());
}

#[test]
fn untouched_session_reports_no_focus_and_no_cells() {
    let pipeline = seeded_pipeline(1);
    let session = GridSession::with_pipeline(pipeline);
    let report = GridReport::capture(&session, 0);

    let mut out = Vec::new();
    report.write_json(&mut out, true).expect("json");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.ends_with('\n'));
    assert!(text.contains('\n'), "pretty output spans lines");

    let json: Value = serde_json::from_str(&text).expect("valid json");
    assert!(json["focus"].is_null());
    assert_eq!(json["selection"], serde_json::json!([]));
    assert_eq!(json["cells"], serde_json::json!([]));
}

#[tokio::test(start_paused = true)]
async fn event_stream_ends_after_every_run_fills() {
    let pipeline = seeded_pipeline(8);
    let mut events = pipeline.subscribe_events();
    let mut session = GridSession::with_pipeline(Arc::clone(&pipeline));
    let launched = replay(&mut session, "space,x,down,x,space");
    assert_eq!(launched, 2);

    let mut out = Vec::new();
    stream_events(&mut events, launched, &mut out)
        .await
        .expect("stream");

    let lines = String::from_utf8(out).expect("utf8");
    let parsed = lines
        .lines()
        .map(|line| serde_json::from_str::<FetchEvent>(line).expect("event line"))
        .collect::<Vec<_>>();
    // Started plus five stages plus the fill, for each of the two runs.
    assert_eq!(parsed.len(), 14);
    assert_eq!(
        parsed
            .iter()
            .filter(|event| matches!(event, FetchEvent::Filled { .. }))
            .count(),
        2
    );
    assert_eq!(pipeline.store().filled_count(), 2);
}
