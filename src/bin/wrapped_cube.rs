//! Provides the `wrapped-cube-cli` tool for rendering and inspecting the
//! wrapped cube animation.
//!
//! Usage: `wrapped-cube-cli <render|dump|timeline> [options]`
//!
//! # Examples
//! ```text
//! wrapped-cube-cli render --count 1200 --every 10 --size 256 --out frames
//! wrapped-cube-cli dump --start 126 --count 25
//! RUST_LOG=debug wrapped-cube-cli timeline
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use image::{ImageBuffer, Rgba};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wrapped_cube::{renderer, CubeConfig, Simulation};

#[derive(Parser)]
#[command(name = "wrapped-cube-cli", about = "Wrapped cube fold/unfold animation")]
struct Cli {
    /// JSON file overriding tile size and phase durations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render frames to PNG files
    Render {
        #[command(flatten)]
        range: Range,
        /// Keep one frame out of every N ticks
        #[arg(long, default_value_t = 1)]
        every: u64,
        /// Output image edge in pixels
        #[arg(long, default_value_t = 256)]
        size: u32,
        /// Output directory
        #[arg(long, default_value = "frames")]
        out: PathBuf,
    },
    /// Print one JSON frame per tick
    Dump {
        #[command(flatten)]
        range: Range,
    },
    /// Print the flow table with the clock span of each entry
    Timeline,
}

#[derive(Args)]
struct Range {
    /// Ticks to apply before the first emitted frame
    #[arg(long, default_value_t = 0)]
    start: u64,
    /// Number of ticks to emit, one frame after each
    #[arg(long, default_value_t = 1)]
    count: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CubeConfig::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => CubeConfig::default(),
    };
    let mut sim = Simulation::new(config)?;

    match cli.command {
        Command::Render {
            range,
            every,
            size,
            out,
        } => {
            if every == 0 {
                bail!("--every must be at least 1");
            }
            fs::create_dir_all(&out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            run_range(&mut sim, &range, |sim, i| {
                if i % every == 0 {
                    save_frame(sim, size, &out)?;
                }
                Ok(())
            })?;
        }
        Command::Dump { range } => {
            run_range(&mut sim, &range, |sim, _| {
                println!("{}", serde_json::to_string(&sim.frame())?);
                Ok(())
            })?;
        }
        Command::Timeline => {
            let timeline = sim.timeline();
            println!(
                "total_time = {}, period = {}",
                timeline.total_time(),
                timeline.period()
            );
            println!("{:>5}  {:<9}  {:>5}  span", "entry", "kind", "param");
            for (i, span) in timeline.spans().iter().enumerate() {
                println!(
                    "{:>5}  {:<9}  {:>5}  {}..={}",
                    i,
                    format!("{:?}", span.entry.kind),
                    span.entry.param,
                    span.first,
                    span.last
                );
            }
        }
    }

    Ok(())
}

/// Applies `range.start` ticks silently, then calls `emit` after each of
/// the next `range.count` ticks.
fn run_range<F>(sim: &mut Simulation, range: &Range, mut emit: F) -> anyhow::Result<()>
where
    F: FnMut(&Simulation, u64) -> anyhow::Result<()>,
{
    // The clock cannot skip: every earlier tick has to be applied.
    let period = sim.timeline().period();
    for _ in 0..range.start {
        sim.advance()?;
    }
    info!(start = range.start, count = range.count, period, "emitting frames");

    for i in 0..range.count {
        sim.advance()?;
        emit(sim, i)?;
    }
    Ok(())
}

fn save_frame(sim: &Simulation, size: u32, out: &Path) -> anyhow::Result<()> {
    let frame = sim.frame();
    let pixels = renderer::render_frame(&frame, size, size).context("empty render target")?;
    let img: ImageBuffer<Rgba<u8>, _> =
        ImageBuffer::from_raw(size, size, pixels).context("pixel buffer size mismatch")?;

    let path = out.join(format!("frame_{:06}.png", frame.clock));
    img.save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "saved");
    Ok(())
}
