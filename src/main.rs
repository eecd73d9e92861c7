//! flexspace headless demo
//!
//! Builds a small layout tree, drives the frame loop with a synthetic
//! clock and one pointer, triggers an animated layout change partway
//! through, and optionally dumps per-frame descriptor snapshots as JSONL.

use anyhow::{bail, Context, Result};
use flexspace::{DemoConfig, Element, PointerState, Style, Ui, UiProps};
use glam::Vec3;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Command-line options.
#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    frames: Option<u64>,
    snapshot_log: Option<PathBuf>,
}

impl CliOptions {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = CliOptions::default();
        let mut args = args.peekable();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args.next().context("--config requires a path")?;
                    options.config = Some(PathBuf::from(value));
                }
                "--frames" => {
                    let value = args.next().context("--frames requires a count")?;
                    options.frames = Some(value.parse().context("--frames must be a number")?);
                }
                "--snapshot-log" => {
                    let value = args.next().context("--snapshot-log requires a path")?;
                    options.snapshot_log = Some(PathBuf::from(value));
                }
                "--help" => {
                    println!(
                        "flexspace-demo [--config PATH] [--frames N] [--snapshot-log PATH]"
                    );
                    std::process::exit(0);
                }
                other => bail!("unknown argument {other:?}"),
            }
        }
        Ok(options)
    }
}

#[derive(Serialize)]
struct FrameSnapshot<'a> {
    frame: u64,
    kind: &'a str,
    nodes: usize,
    hits: usize,
}

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting flexspace-demo v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(std::env::args().skip(1))?;
    let config = match &cli.config {
        Some(path) => DemoConfig::load_from_path(path),
        None => DemoConfig::load(),
    };
    let max_frames = cli.frames.unwrap_or(config.max_frames);

    let root = Element::layer(Style::default())
        .with_child(
            Element::layer(
                Style::default()
                    .with_flex(1.0)
                    .with_background_color("#2d6cdf"),
            )
            .with_animation(config.animation_config()),
        )
        .with_child(
            Element::layer(
                Style::default()
                    .with_flex(1.0)
                    .with_background_color("#df2d6c"),
            )
            .with_elevation(0.5),
        );

    let mut ui = Ui::new(
        UiProps {
            width: config.width,
            height: config.height,
            ppu: config.ppu,
            position: Vec3::ZERO,
        },
        root,
    )?;

    ui.on_intersect(|pointer, hit| {
        info!(pointer, distance = hit.distance, "pointer intersection");
    });

    let top_child = ui.root().children[0].handle();
    let mut sink = match &cli.snapshot_log {
        Some(path) => Some(std::fs::File::create(path).context("create snapshot log")?),
        None => None,
    };

    // One pointer hovering in front of the plane, looking straight at it.
    let pointer = PointerState::new(
        "primary",
        Vec3::new(0.0, 0.0, 50.0),
        Vec3::new(0.0, 0.0, -1.0),
    );

    for frame in 0..max_frames {
        // Partway through, grow the first child; with animation configured
        // the change tweens instead of snapping.
        if frame == max_frames / 3 {
            let style = Style::default()
                .with_flex(3.0)
                .with_background_color("#2d6cdf");
            let kind = ui.set_style(top_child, style)?;
            info!(?kind, "applied style update");
        }

        let now = frame as f64 * config.frame_interval;
        let hits = ui.tick(now, std::slice::from_ref(&pointer));

        if let Some(sink) = &mut sink {
            let snapshot = FrameSnapshot {
                frame,
                kind: "Frame",
                nodes: ui.scene().node_count(),
                hits: hits.values().filter(|hit| hit.is_some()).count(),
            };
            let line = serde_json::to_string(&snapshot)?;
            sink.write_all(line.as_bytes())?;
            sink.write_all(b"\n")?;
        }
    }

    let scene = ui.scene();
    info!(
        nodes = scene.node_count(),
        width = scene.geometry.width,
        height = scene.geometry.height,
        "demo finished"
    );
    Ok(())
}
