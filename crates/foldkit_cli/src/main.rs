//! Foldkit CLI
//!
//! Inspect strip plans and drive fold transitions offline.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use foldkit::{
    plan_strip_heights, rotation_timeline, segment_duration, slice_snapshots, FoldConfig,
    FoldController, FoldDirection, HeadlessHost,
};
use foldkit_animation::{AnimationPrimitive, AnimationScheduler, FrameEffect};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scene;

#[derive(Parser)]
#[command(name = "foldkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Folding cell transitions from the command line", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the strip plan and rotation schedule for a cell
    Plan {
        #[command(flatten)]
        cell: CellArgs,
    },

    /// Run an unfold and a fold headlessly and report timings
    Simulate {
        #[command(flatten)]
        cell: CellArgs,
    },

    /// Write every frame of an unfold and a fold as PNG files
    Render {
        #[command(flatten)]
        cell: CellArgs,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Args)]
struct CellArgs {
    /// Cell width in pixels
    #[arg(long, default_value = "320")]
    width: u32,

    /// Title view height in pixels
    #[arg(long, default_value = "80")]
    title: u32,

    /// Content view height in pixels
    #[arg(long, default_value = "300")]
    content: u32,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override additional_flips from the settings
    #[arg(long)]
    flips: Option<u32>,

    /// Frames per second for simulated ticks
    #[arg(long, default_value = "60")]
    fps: u32,
}

impl CellArgs {
    fn config(&self) -> Result<FoldConfig> {
        let config = match &self.config {
            Some(path) => FoldConfig::load(path)?,
            None => FoldConfig::default(),
        };
        let config = match self.flips {
            Some(flips) => config.with_additional_flips(flips),
            None => config,
        };
        debug!("Using settings {:?}", config);
        Ok(config)
    }

    fn frame_ms(&self) -> Result<f32> {
        if self.fps == 0 {
            anyhow::bail!("--fps must be greater than zero");
        }
        Ok(1000.0 / self.fps as f32)
    }

    fn controller(&self, scheduler: &AnimationScheduler) -> Result<FoldController<HeadlessHost>> {
        let host = HeadlessHost::new(
            scene::title(self.width, self.title)?,
            scene::content(self.width, self.content)?,
        );
        Ok(FoldController::with_config(
            host,
            scheduler.handle(),
            self.config()?,
        ))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Plan { cell } => cmd_plan(&cell),
        Commands::Simulate { cell } => cmd_simulate(&cell),
        Commands::Render { cell, out } => cmd_render(&cell, &out),
    }
}

fn cmd_plan(cell: &CellArgs) -> Result<()> {
    let config = cell.config()?;
    let plan = plan_strip_heights(cell.title, cell.content, config.additional_flips)?;
    let strips = slice_snapshots(
        &plan,
        &scene::title(cell.width, cell.title)?,
        &scene::content(cell.width, cell.content)?,
        config.back_side_color,
    )?;
    let segment_ms = segment_duration(config.duration_ms, strips.len());

    println!("strip heights: {:?}", plan.as_slice());
    println!("animated strips: {}", strips.len());
    println!("segment: {}ms", segment_ms);

    for direction in [FoldDirection::Unfold, FoldDirection::Fold] {
        let timeline = rotation_timeline(direction, &strips, segment_ms, config.camera_height);
        println!(
            "{:?} ({}ms):",
            direction,
            timeline.total_duration_ms()
        );
        for primitive in timeline.primitives() {
            if let FrameEffect::Transform { target, .. } = primitive.sample(0.0) {
                println!(
                    "  {:>5}ms  strip {} {:?}",
                    primitive.start_offset_ms(),
                    target.index,
                    target.face
                );
            }
        }
    }

    Ok(())
}

/// Run one transition to completion, calling `on_frame` after every tick
fn drive<F>(
    cell: &mut FoldController<HeadlessHost>,
    scheduler: &AnimationScheduler,
    frame_ms: f32,
    mut on_frame: F,
) -> Result<u32>
where
    F: FnMut(&HeadlessHost) -> Result<()>,
{
    let mut frames = 0;
    cell.pump();
    on_frame(cell.host())?;
    while cell.is_animating() {
        scheduler.advance(frame_ms);
        cell.pump();
        frames += 1;
        on_frame(cell.host())?;
    }
    Ok(frames)
}

fn cmd_simulate(args: &CellArgs) -> Result<()> {
    let frame_ms = args.frame_ms()?;
    let scheduler = AnimationScheduler::new();
    let mut cell = args.controller(&scheduler)?;

    for label in ["unfold", "fold"] {
        cell.toggle(false)
            .with_context(|| format!("failed to start {}", label))?;
        let frames = drive(&mut cell, &scheduler, frame_ms, |host| {
            debug!("height {}px, {} strips mounted", host.height(), host.mounted_strip_count());
            Ok(())
        })?;
        info!(
            "{} finished after {} frames (~{:.0}ms), height {}px",
            label,
            frames,
            frames as f32 * frame_ms,
            cell.host().height()
        );
    }

    Ok(())
}

fn cmd_render(args: &CellArgs, out: &Path) -> Result<()> {
    let frame_ms = args.frame_ms()?;
    fs::create_dir_all(out)
        .with_context(|| format!("failed to create {}", out.display()))?;

    let scheduler = AnimationScheduler::new();
    let mut cell = args.controller(&scheduler)?;
    let mut index = 0usize;

    for label in ["unfold", "fold"] {
        cell.toggle(false)
            .with_context(|| format!("failed to start {}", label))?;
        drive(&mut cell, &scheduler, frame_ms, |host| {
            let path = out.join(format!("frame_{:04}.png", index));
            host.compose()
                .save(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            index += 1;
            Ok(())
        })?;
        info!("Rendered {} through frame {}", label, index);
    }

    info!("Wrote {} frames to {}", index, out.display());
    Ok(())
}
