use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use city_client::{CityClient, ViewerConfig, demo};
use clap::Parser;
use gpu::{CommandRecorder, FrameOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless city viewer: drives the client shell for a number of frames
/// and records the draw commands it would issue.
#[derive(Debug, Parser)]
#[command(name = "city_client", version)]
struct Cli {
    /// JSON viewer configuration.
    #[arg(long, env = "CITY_CLIENT_CONFIG")]
    config: Option<PathBuf>,

    /// Number of frames to drive.
    #[arg(long, default_value_t = 3)]
    frames: u32,

    #[arg(long)]
    width: Option<f64>,

    #[arg(long)]
    height: Option<f64>,

    /// Wheel delta "DX,DY" applied before a frame; repeat for later frames.
    #[arg(long = "wheel", value_parser = parse_wheel, allow_hyphen_values = true)]
    wheels: Vec<(f64, f64)>,

    /// Start from an empty city instead of the built-in demo blocks.
    #[arg(long)]
    empty: bool,
}

fn parse_wheel(s: &str) -> Result<(f64, f64), String> {
    let (dx, dy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("{v:?}: {e}"))
    };
    Ok((parse(dx)?, parse(dy)?))
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(width) = cli.width {
        config.viewport.width = width;
    }
    if let Some(height) = cli.height {
        config.viewport.height = height;
    }
    init_tracing(&config.log_level);

    let mut client = CityClient::from_config(&config).context("building client")?;
    if !cli.empty {
        client.update(demo::seed);
    }

    let mut recorder = CommandRecorder::new();
    let dt_s = 1.0 / 60.0;
    for i in 0..cli.frames {
        if let Some(&(dx, dy)) = cli.wheels.get(i as usize) {
            client.on_wheel(dx, dy);
        }
        match client.on_frame(&mut recorder, dt_s) {
            FrameOutcome::Rendered(frame) => {
                let drawn = recorder.last().map_or(0, |f| f.drawn_layers().len());
                info!(frame = frame.index, layers = drawn, "frame rendered");
            }
            FrameOutcome::Disabled => info!(tick = i, "rendering disabled"),
            FrameOutcome::Skipped(err) => info!(tick = i, %err, "frame skipped"),
        }
    }

    if cli.frames > 0 && config.rendering_enabled && client.frames_rendered() == 0 {
        bail!("no frame could be rendered ({} skipped)", client.frames_skipped());
    }

    let view = client.view();
    info!(
        rendered = client.frames_rendered(),
        skipped = client.frames_skipped(),
        eye = ?view.eye.to_array(),
        target = ?view.target.to_array(),
        overlay = client.overlay().len(),
        "done"
    );
    Ok(())
}
