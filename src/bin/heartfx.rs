use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "heartfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render overlay frames as numbered PNGs.
    Render(RenderArgs),
    /// Write the card bitmap and every message bitmap as PNGs.
    Card(CardArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Font file (TTF/OTF) used for the card title and messages.
    #[arg(long)]
    font: PathBuf,

    /// Background image; stretched to the surface.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Surface width (defaults to the background width, or 1280).
    #[arg(long)]
    width: Option<u32>,

    /// Surface height (defaults to the background height, or 720).
    #[arg(long)]
    height: Option<u32>,

    /// Number of frames to render.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Simulated frame rate; 0 exercises the nominal-step fallback.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output directory for `frame_00000.png` and onwards.
    #[arg(long)]
    out: PathBuf,

    /// Overlay options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed override.
    #[arg(long)]
    seed: Option<u64>,

    /// Hold the primary button on a frame, as `FRAME:X,Y`. Repeatable.
    #[arg(long = "click", value_parser = parse_click)]
    clicks: Vec<Click>,
}

#[derive(Parser, Debug)]
struct CardArgs {
    /// Font file (TTF/OTF).
    #[arg(long)]
    font: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Skip the Gaussian pass over the shadow.
    #[arg(long, default_value_t = false)]
    no_blur: bool,
}

#[derive(Clone, Copy, Debug)]
struct Click {
    frame: u64,
    x: f64,
    y: f64,
}

fn parse_click(s: &str) -> Result<Click, String> {
    let (frame, pos) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:X,Y, got '{s}'"))?;
    let (x, y) = pos
        .split_once(',')
        .ok_or_else(|| format!("expected FRAME:X,Y, got '{s}'"))?;
    Ok(Click {
        frame: frame.trim().parse().map_err(|e| format!("frame: {e}"))?,
        x: x.trim().parse().map_err(|e| format!("x: {e}"))?,
        y: y.trim().parse().map_err(|e| format!("y: {e}"))?,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Card(args) => cmd_card(args),
    }
}

fn load_assets(font: &Path, blur: bool) -> anyhow::Result<heartfx::CardAssets> {
    let bytes = std::fs::read(font).with_context(|| format!("read font '{}'", font.display()))?;
    let mut rasterizer = heartfx::ParleyRasterizer::new();
    heartfx::build_card_assets(&mut rasterizer, &bytes, blur)
        .with_context(|| format!("build card assets from '{}'", font.display()))
}

fn write_png(path: &Path, buf: &heartfx::PixelBuffer) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        buf.as_bytes(),
        buf.width(),
        buf.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(p) => heartfx::OverlayOpts::from_path(p)?,
        None => heartfx::OverlayOpts::default(),
    };
    if args.seed.is_some() {
        opts.seed = args.seed;
    }

    let background = match &args.background {
        Some(p) => {
            let img = image::open(p)
                .with_context(|| format!("open background '{}'", p.display()))?
                .to_rgba8();
            Some(heartfx::PixelBuffer::from_rgba_image(img))
        }
        None => None,
    };
    let (bw, bh) = background
        .as_ref()
        .map_or((1280, 720), |bg| (bg.width(), bg.height()));
    let canvas = heartfx::Canvas::new(args.width.unwrap_or(bw), args.height.unwrap_or(bh))?;

    let assets = load_assets(&args.font, opts.card_blur)?;
    let mut overlay = heartfx::Overlay::new(canvas, background, assets, opts)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let frame_secs = if args.fps > 0.0 { 1.0 / args.fps } else { 0.0 };
    let mut surface = heartfx::PixelBuffer::for_canvas(canvas);
    let mut written = 0u64;
    for frame in 0..args.frames {
        let input = match args.clicks.iter().find(|c| c.frame == frame) {
            Some(c) => heartfx::FrameInput {
                pointer: heartfx::Point::new(c.x, c.y),
                primary_down: true,
                escape: false,
            },
            None => heartfx::FrameInput::default(),
        };
        if overlay.update(&input, frame_secs) == heartfx::FrameControl::Terminate {
            break;
        }
        overlay.draw(&mut surface);
        write_png(&args.out.join(format!("frame_{frame:05}.png")), &surface)?;
        written += 1;
    }

    eprintln!("wrote {written} frames to {}", args.out.display());
    Ok(())
}

fn cmd_card(args: CardArgs) -> anyhow::Result<()> {
    let assets = load_assets(&args.font, !args.no_blur)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    write_png(&args.out.join("card.png"), assets.card())?;
    for (i, text) in assets.texts().iter().enumerate() {
        write_png(&args.out.join(format!("message_{i:02}.png")), text)?;
    }

    eprintln!(
        "wrote card and {} messages to {}",
        assets.texts().len(),
        args.out.display()
    );
    Ok(())
}
