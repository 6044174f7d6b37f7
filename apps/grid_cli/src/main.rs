use std::{io, path::PathBuf, sync::Arc};

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use fetch_sim::{load_settings, FetchPipeline};
use grid_core::GridSession;
use shared::input::parse_key_sequence;
use tracing_subscriber::EnvFilter;

use crate::report::{stream_events, GridReport};

#[derive(Parser, Debug)]
#[command(
    name = "grid-cli",
    about = "Replay a key sequence against the quote grid and print the final state"
)]
struct Args {
    /// Comma- or space-separated keys, e.g. "space,shift+ArrowDown,space".
    #[arg(long)]
    keys: String,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    pretty: bool,
    /// Also print each fetch event as a JSON line before the report.
    #[arg(long)]
    events: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let keys = parse_key_sequence(&args.keys).context("invalid --keys")?;
    let mut settings = load_settings(args.config.as_deref())?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let pipeline = FetchPipeline::new(settings);
    let mut events = args.events.then(|| pipeline.subscribe_events());
    let mut session = GridSession::with_pipeline(Arc::clone(&pipeline));

    let mut launched = 0;
    for key in &keys {
        let outcome = session.handle_key(key);
        tracing::debug!(%key, consumed = outcome.consumed, launches = outcome.launches.len(), "key");
        launched += outcome.launches.len();
    }
    tracing::info!(keys = keys.len(), launched, "key sequence applied; waiting for runs");

    let mut stdout = io::stdout().lock();
    if let Some(events) = events.as_mut() {
        stream_events(events, launched, &mut stdout).await?;
    }
    pipeline.wait_idle().await;

    GridReport::capture(&session, launched).write_json(&mut stdout, args.pretty)
}
