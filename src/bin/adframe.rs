use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "adframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one creative from command-line arguments.
    Render(RenderArgs),
    /// Composite one creative described by a JSON request file.
    Request(RequestArgs),
    /// List the known platform profiles.
    Platforms,
}

/// Options shared by every compositing subcommand.
#[derive(Parser, Debug)]
struct CommonArgs {
    /// Font file to draw with. Defaults to a bold system sans-serif.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Compositor settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output image path. Required unless `--data-uri` is given.
    #[arg(long, required_unless_present = "data_uri")]
    out: Option<PathBuf>,

    /// Print the result as a data URI on stdout instead of writing a file.
    #[arg(long)]
    data_uri: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source image (path or base64 data URI).
    #[arg(long)]
    image: String,

    #[arg(long, default_value = "")]
    hook: String,

    #[arg(long, default_value = "")]
    key_messages: String,

    #[arg(long, default_value = "")]
    cta: String,

    /// simpleOverlay, polished, nativeCaption or ugcTestimonial.
    #[arg(long)]
    style: adframe::StyleVariant,

    /// Platform profile id (see `adframe platforms`).
    #[arg(long, conflicts_with = "ratio", required_unless_present = "ratio")]
    platform: Option<String>,

    /// Aspect ratio as `W:H`.
    #[arg(long)]
    ratio: Option<adframe::AspectRatio>,

    /// Seed for the native-caption jitter.
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct RequestArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Request(args) => cmd_request(args),
        Command::Platforms => cmd_platforms(),
    }
}

fn make_compositor(common: &CommonArgs) -> anyhow::Result<adframe::Compositor> {
    let settings = match &common.settings {
        Some(path) => adframe::CompositorSettings::from_path(path)?,
        None => adframe::CompositorSettings::default(),
    };
    let compositor = match &common.font {
        Some(path) => adframe::Compositor::new(adframe::Typeface::from_path(path)?, settings)?,
        None => adframe::Compositor::with_system_font(settings)?,
    };
    tracing::debug!(
        family = compositor.typeface().family(),
        width = compositor.settings().canonical_width,
        "compositor ready"
    );
    Ok(compositor)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let request = adframe::CompositeRequest {
        image: args.image,
        text: adframe::TextTriple::new(args.hook, args.key_messages, args.cta),
        style: args.style,
        platform: args.platform,
        aspect_ratio: args.ratio,
        seed: args.seed,
    };
    let compositor = make_compositor(&args.common)?;
    let encoded = compositor.run_request(&request, None)?;
    emit(&encoded, &args.common)
}

fn cmd_request(args: RequestArgs) -> anyhow::Result<()> {
    let request = adframe::CompositeRequest::from_path(&args.in_path)?;
    let compositor = make_compositor(&args.common)?;
    let base_dir = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let encoded = compositor
        .run_request(&request, Some(base_dir))
        .with_context(|| format!("run request '{}'", args.in_path.display()))?;
    emit(&encoded, &args.common)
}

fn cmd_platforms() -> anyhow::Result<()> {
    for p in adframe::PLATFORMS {
        println!(
            "{:<20} {:<22} {:>5} {:>6}",
            p.id,
            p.name,
            p.aspect_ratio.to_string(),
            p.resolution.to_string()
        );
    }
    Ok(())
}

fn emit(encoded: &adframe::EncodedImage, common: &CommonArgs) -> anyhow::Result<()> {
    if common.data_uri {
        println!("{}", encoded.to_data_uri());
        return Ok(());
    }
    let out = common
        .out
        .as_deref()
        .context("--out is required without --data-uri")?;
    encoded.write_to(out)?;
    eprintln!(
        "wrote {} ({}x{}, {})",
        out.display(),
        encoded.width,
        encoded.height,
        encoded.mime_type()
    );
    Ok(())
}
