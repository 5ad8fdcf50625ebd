//! Replay recorded service messages through the frame processor
//!
//! Reads one message per line from PATH, or stdin when no path is given.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use leapweb_runtime::{
    init_logging, FrameProcessor, LoggingConfig, LoggingSink, ProcessorConfig, RuntimeResult,
};
use leapweb_transport::spawn_receive_loop;

#[derive(Parser, Debug)]
#[command(name = "leapweb-replay")]
#[command(about = "Replay newline-delimited tracking messages and print decode statistics")]
struct Cli {
    /// Recorded messages, one per line (stdin when omitted)
    path: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json: bool,
}

/// Forward every non-blank line; returns how many were forwarded
async fn pump<R: AsyncBufRead + Unpin>(reader: R, tx: mpsc::Sender<String>) -> RuntimeResult<u64> {
    let mut lines = reader.lines();
    let mut count = 0;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        count += 1;
        if tx.send(line).await.is_err() {
            break;
        }
    }
    Ok(count)
}

async fn read_input(path: Option<PathBuf>, tx: mpsc::Sender<String>) -> RuntimeResult<u64> {
    match path {
        Some(path) => {
            let file = tokio::fs::File::open(&path).await?;
            pump(BufReader::new(file), tx).await
        }
        None => pump(BufReader::new(tokio::io::stdin()), tx).await,
    }
}

async fn replay(cli: Cli) -> RuntimeResult<()> {
    let config = ProcessorConfig::from_env()?;
    let (tx, source) = mpsc::channel::<String>(config.channel_capacity);
    let mut receiver = spawn_receive_loop(source, config.channel_capacity);

    let reader = tokio::spawn(read_input(cli.path, tx));

    let mut processor = FrameProcessor::new(config, LoggingSink::new());

    // No live service behind a replay; the handshake is only recorded
    let mut handshake: Vec<String> = Vec::new();
    processor.start(&mut handshake).await?;
    for payload in &handshake {
        tracing::debug!("handshake payload {}", payload);
    }

    let stats = processor.run(&mut receiver).await?;
    if let Some(close) = processor.stop()? {
        tracing::info!("closing with {} {:?}", close.code, close.reason);
    }

    let lines = reader.await.map_err(std::io::Error::other)??;

    println!("lines:            {}", lines);
    println!("messages:         {}", stats.messages);
    println!("frames:           {}", stats.frames);
    println!("service messages: {}", stats.service_messages);
    println!("decode failures:  {}", stats.decode_failures);
    println!("hands seen:       {}", stats.hands_seen);
    if let Some(id) = stats.last_frame_id {
        println!("last frame:       {}", id);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        json: cli.json,
        ..LoggingConfig::default()
    };
    if let Err(e) = init_logging(&logging) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match replay(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
