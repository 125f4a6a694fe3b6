//! Attention Monitor - Trace Replay Entry Point

use clap::Parser;
use cli::{init_logging, load_settings, load_trace, run_replay, stdout_sink, Preset};
use std::path::PathBuf;
use tracing::info;

/// Replay a landmark trace through the attention monitor
#[derive(Parser, Debug)]
#[command(name = "attention-monitor", version)]
struct Args {
    /// JSON Lines landmark trace, one estimator result per line
    trace: PathBuf,

    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Monitor preset, replacing the loaded monitor settings
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs)?;

    info!("=== Attention Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = load_settings(args.config.as_deref())?;
    let config = match args.preset {
        Some(preset) => {
            info!("Using {:?} preset", preset);
            preset.config()
        }
        None => settings.monitor,
    };

    let frames = load_trace(&args.trace)?;
    let alerts = run_replay(frames, config, stdout_sink()).await?;

    info!("Replay finished with {} alerts", alerts);
    Ok(())
}
