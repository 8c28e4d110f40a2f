use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;

use glyphburst::{
    Celebration, CelebrationConfig, CpuRenderer, Fps, FrameRGBA, Point, Rect, RenderSettings,
    SegmentGlyphs, SystemFontOutlines, outline_with_fallback,
};

#[derive(Parser, Debug)]
#[command(name = "glyphburst", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the JSON frame snapshot at a point in time.
    Snapshot(SnapshotArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct Source {
    /// Celebration config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trace glyphs from installed system fonts, falling back to segment glyphs.
    #[arg(long)]
    system_font: bool,

    /// Extra directory of font files for `--system-font`.
    #[arg(long, requires = "system_font")]
    font_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    source: Source,

    /// Time in seconds since the celebration started.
    #[arg(long)]
    at: f64,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: Source,

    /// Time in seconds since the celebration started.
    #[arg(long)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    source: Source,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Last time (seconds) to render, inclusive.
    #[arg(long, default_value_t = 9.0)]
    until: f64,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(path: Option<&Path>) -> anyhow::Result<CelebrationConfig> {
    let Some(path) = path else {
        return Ok(CelebrationConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    CelebrationConfig::from_json_reader(BufReader::new(f))
        .with_context(|| format!("parse config '{}'", path.display()))
}

fn build(source: &Source) -> anyhow::Result<Celebration> {
    let cfg = read_config(source.config.as_deref())?;
    let celebration = if source.system_font {
        let mut system = SystemFontOutlines::new();
        if let Some(dir) = &source.font_dir {
            system = system.with_font_dir(dir);
        }
        tracing::info!(faces = system.face_count(), "loaded font database");
        let rect = Rect::from_origin_size(Point::ORIGIN, cfg.placement_size);
        let outline = outline_with_fallback(&system, &SegmentGlyphs, &cfg.text, &cfg.font, rect)?;
        Celebration::with_outline(cfg, outline)?
    } else {
        Celebration::new(cfg, &SegmentGlyphs)?
    };

    let sampling = celebration.sampling();
    tracing::info!(
        points = sampling.points.len(),
        requested = sampling.requested,
        attempts = sampling.attempts,
        "sampled word interior"
    );
    Ok(celebration)
}

fn simulate_to(celebration: &mut Celebration, at: f64) -> anyhow::Result<()> {
    anyhow::ensure!(at.is_finite() && at >= 0.0, "--at must be finite and >= 0");
    celebration.start(0.0)?;
    celebration.advance_to(at)?;
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let mut celebration = build(&args.source)?;
    simulate_to(&mut celebration, args.at)?;
    let json = serde_json::to_string_pretty(&celebration.snapshot())?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut celebration = build(&args.source)?;
    simulate_to(&mut celebration, args.at)?;

    let renderer = CpuRenderer::new(celebration.config().canvas, RenderSettings::default())?;
    let frame = renderer.render(&celebration.snapshot(), celebration.outline())?;
    write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.until.is_finite() && args.until >= 0.0,
        "--until must be finite and >= 0"
    );
    let fps = Fps::new(args.fps, 1)?;
    let count = fps.secs_to_frames_floor(args.until) + 1;

    // Simulation is sequential; rasterization is not.
    let mut celebration = build(&args.source)?;
    let snapshots = celebration.record(fps, count)?;
    let renderer = CpuRenderer::new(celebration.config().canvas, RenderSettings::default())?;
    let outline = celebration.outline();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    snapshots
        .par_iter()
        .enumerate()
        .try_for_each(|(i, snap)| -> anyhow::Result<()> {
            let frame = renderer.render(snap, outline)?;
            write_png(&args.out_dir.join(format!("frame_{i:05}.png")), &frame)
        })?;

    eprintln!("wrote {count} frames to {}", args.out_dir.display());
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
