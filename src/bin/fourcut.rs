use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fourcut::{
    CanvasSpec, CaptureSession, CollageSink, FileSource, PngFileSink, RasterImage, SlotIndex,
};

#[derive(Parser, Debug)]
#[command(name = "fourcut", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite four photos into a collage PNG.
    Compose(ComposeArgs),
    /// Print the resolved cut rectangles as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// The four base photos, in cut order.
    #[arg(long, num_args = 4, required = true)]
    base: Vec<PathBuf>,

    /// Overlay for one cut, as `SLOT=PATH` (slot 0..=3). Repeatable.
    #[arg(long, value_parser = parse_overlay)]
    overlay: Vec<(usize, PathBuf)>,

    /// Canvas config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Caption text (empty disables the caption).
    #[arg(long)]
    caption: Option<String>,

    /// Caption font file.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output pixels per canvas unit.
    #[arg(long)]
    scale: Option<u32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Canvas config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_overlay(s: &str) -> Result<(usize, PathBuf), String> {
    let (slot, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=PATH, got '{s}'"))?;
    let slot: usize = slot
        .trim()
        .parse()
        .map_err(|_| format!("invalid slot '{slot}'"))?;
    if path.is_empty() {
        return Err("overlay path must be non-empty".to_owned());
    }
    Ok((slot, PathBuf::from(path)))
}

fn load_canvas(path: Option<&PathBuf>) -> anyhow::Result<CanvasSpec> {
    Ok(match path {
        Some(p) => CanvasSpec::from_path(p)?,
        None => CanvasSpec::default(),
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut canvas = load_canvas(args.config.as_ref())?;
    if let Some(text) = args.caption {
        canvas.caption.text = text;
    }
    if let Some(font) = args.font {
        canvas.caption.font_path = Some(font);
    }
    if let Some(scale) = args.scale {
        canvas.pixel_scale = scale;
    }
    canvas.validate()?;

    let mut session = CaptureSession::new(canvas);
    for (slot, path) in &args.overlay {
        let slot = SlotIndex::new(*slot)?;
        let image = RasterImage::open(path)?;
        session.on_overlay_selected(slot, image);
    }

    let mut source = FileSource::new(args.base);
    let result = session
        .feed_from(&mut source)?
        .context("fewer than four base images were decoded")?;

    let mut sink = PngFileSink::new(&args.out);
    let notice = sink.save(&result)?;
    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        notice.width,
        notice.height
    );
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let canvas = load_canvas(args.config.as_ref())?;
    let rects: Vec<serde_json::Value> = fourcut::cell_rects(&canvas)
        .iter()
        .enumerate()
        .map(|(slot, r)| {
            serde_json::json!({
                "slot": slot,
                "x": r.x0,
                "y": r.y0,
                "w": r.width(),
                "h": r.height(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rects)?);
    Ok(())
}
