//! LogoMagic Pro host binary.
//!
//! Reads one JSON command per stdin line and writes one JSON response per
//! stdout line. Runtime events are interleaved on stdout as `{"event": …}`
//! lines; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{error, info};

use lm_runtime::bootstrap::tracing::init_tracing_subscriber;
use lm_runtime::bootstrap::{load_config_or_default, wire_dependencies, AppRuntime};
use lm_runtime::commands::{handle_line, CommandResponse};
use lm_runtime::events::{ChannelEventEmitter, HostEvent};

#[derive(Debug, Parser)]
#[command(name = "logomagic", version, about = "LogoMagic Pro request service")]
struct Cli {
    /// Path to config.toml (defaults to LOGOMAGIC_CONFIG or the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not mount the inspiration gallery at startup
    #[arg(long)]
    no_gallery: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_tracing_subscriber().context("Failed to initialize tracing")?;

    let config = load_config_or_default(cli.config)?;
    let deps = wire_dependencies(&config)?;

    let (emitter, events) = ChannelEventEmitter::channel();
    let emitter = Arc::new(emitter);
    let runtime = AppRuntime::new(config, deps, emitter.clone(), emitter);

    let (response_tx, response_rx) = mpsc::unbounded_channel::<CommandResponse>();
    let writer = tokio::spawn(write_output(response_rx, events));

    if !cli.no_gallery {
        runtime.mount_gallery().await;
    }
    info!("LogoMagic runtime ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&runtime, &line).await;
        if response_tx.send(response).is_err() {
            error!("Output writer stopped; exiting");
            break;
        }
    }

    runtime.shutdown().await;
    drop(response_tx);
    writer.await.context("Output writer panicked")??;
    Ok(())
}

/// Writes responses and events to stdout until the response channel closes,
/// then flushes the events already queued.
async fn write_output(
    mut responses: UnboundedReceiver<CommandResponse>,
    mut events: UnboundedReceiver<HostEvent>,
) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    loop {
        tokio::select! {
            biased;
            event = events.recv() => match event {
                Some(event) => write_line(&mut stdout, &event).await?,
                None => break,
            },
            response = responses.recv() => match response {
                Some(response) => write_line(&mut stdout, &response).await?,
                None => break,
            },
        }
    }

    while let Ok(event) = events.try_recv() {
        write_line(&mut stdout, &event).await?;
    }
    while let Ok(response) = responses.try_recv() {
        write_line(&mut stdout, &response).await?;
    }
    Ok(())
}

async fn write_line<W, T>(out: &mut W, value: &T) -> anyhow::Result<()>
where
    W: AsyncWriteExt + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_vec(value).context("Failed to serialize output line")?;
    line.push(b'\n');
    out.write_all(&line).await.context("Failed to write stdout")?;
    out.flush().await.context("Failed to flush stdout")?;
    Ok(())
}
