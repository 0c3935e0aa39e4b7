use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use seed_of_life::{
    Canvas, CpuSurface, CpuSurfaces, ManualScheduler, PatternConfig, PatternRenderer, RegionId,
    Rgba8, SeedOfLife,
};

#[derive(Parser, Debug)]
#[command(name = "seed-of-life", version)]
struct Cli {
    /// Log draw and frame events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an animated rotation as a numbered PNG sequence.
    Animate(AnimateArgs),
    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Pattern configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 500)]
    width: u32,

    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Background color override (`#rrggbb`, `rgba(...)`, `transparent`, ...).
    #[arg(long)]
    background: Option<Rgba8>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Rotation in radians.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rotation: f64,

    /// Draw with the ghost layer, as a running animation would.
    #[arg(long)]
    animating: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Number of animation frames to advance.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Write every n-th frame.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Validate and normalize this file instead of printing the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PatternConfig> {
    match path {
        Some(p) => PatternConfig::load_json(p)
            .with_context(|| format!("load pattern config '{}'", p.display())),
        None => Ok(PatternConfig::default()),
    }
}

fn prepare(args: &SurfaceArgs) -> anyhow::Result<(PatternConfig, Canvas)> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bg) = args.background {
        config.colors.insert(RegionId::Background, bg);
    }
    let canvas = Canvas::new(args.width, args.height).context("invalid surface size")?;
    Ok((config, canvas))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (config, canvas) = prepare(&args.surface)?;
    config.validate()?;

    let mut surface = CpuSurface::new(canvas)?;
    let mut renderer = PatternRenderer::new(config.normalized());
    renderer.render_frame(&mut surface, args.rotation, args.animating)?;

    ensure_parent(&args.out)?;
    surface.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    if args.every == 0 {
        anyhow::bail!("--every must be at least 1");
    }
    let (config, canvas) = prepare(&args.surface)?;

    let mut surfaces = CpuSurfaces::new();
    surfaces.register("cli", canvas);
    let mut seed = SeedOfLife::try_init(&mut surfaces, "cli", config, ManualScheduler::new())?;
    if !seed.start_animation() {
        anyhow::bail!("animation is disabled in the configuration");
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut written = 0u64;
    for i in 0..args.frames {
        let handle = seed
            .scheduler_mut()
            .poll()
            .context("animation stopped requesting frames")?;
        seed.on_frame(handle)?;
        if i % args.every == 0 {
            let path = args.out_dir.join(format!("frame_{i:05}.png"));
            seed.surface().save_png(&path)?;
            written += 1;
        }
    }
    seed.stop_animation();

    eprintln!(
        "wrote {written} frames to {} (rotation {:.4} rad)",
        args.out_dir.display(),
        seed.rotation()
    );
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    println!("{}", config.to_json_pretty()?);
    Ok(())
}
