use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "wordgarden", version)]
struct Cli {
    /// More log output (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract normalized shape points from an image.
    Extract(ExtractArgs),
    /// Record the word garden for an image as WebM (requires `ffmpeg` on PATH).
    Record(RecordArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible sampling and layout.
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of shape points.
    #[arg(long)]
    points: Option<usize>,

    /// Point sampler.
    #[arg(long, value_enum)]
    sampler: Option<SamplerChoice>,

    /// Mask construction.
    #[arg(long, value_enum)]
    edges: Option<EdgesChoice>,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output JSON path for the points.
    #[arg(long)]
    out: PathBuf,

    /// Also write the binary mask as PNG.
    #[arg(long)]
    mask: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RecordArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Directory for the recording.
    #[arg(long)]
    out_dir: PathBuf,

    /// Recording length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Capture rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Words to plant, comma separated.
    #[arg(long, value_delimiter = ',')]
    words: Option<Vec<String>>,

    /// Color mode for tokens.
    #[arg(long, value_enum)]
    color_mode: Option<ColorChoice>,

    /// Stage background: `transparent` or a hex color.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SamplerChoice {
    Direct,
    Rejection,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EdgesChoice {
    Threshold,
    Gradient,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    Single,
    Rainbow,
    Custom,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    match cli.cmd {
        Command::Extract(args) => cmd_extract(args),
        Command::Record(args) => cmd_record(args),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<wordgarden::GardenConfig> {
    let mut cfg = match &common.config {
        Some(path) => wordgarden::GardenConfig::load(path)?,
        None => wordgarden::GardenConfig::default(),
    };
    if let Some(seed) = common.seed {
        cfg.seed = Some(seed);
    }
    if let Some(points) = common.points {
        cfg.target_points = points;
    }
    if let Some(sampler) = common.sampler {
        cfg.sampler = match sampler {
            SamplerChoice::Direct => wordgarden::SamplerKind::Direct,
            SamplerChoice::Rejection => wordgarden::SamplerKind::Rejection,
        };
    }
    if let Some(edges) = common.edges {
        cfg.edges = match edges {
            EdgesChoice::Threshold => wordgarden::EdgeMode::threshold(),
            EdgesChoice::Gradient => wordgarden::EdgeMode::gradient(),
        };
    }
    Ok(cfg)
}

fn extract_points(
    cfg: &wordgarden::GardenConfig,
    in_path: &Path,
    rng: &mut impl rand::Rng,
) -> anyhow::Result<wordgarden::ShapeExtraction> {
    let bytes =
        std::fs::read(in_path).with_context(|| format!("read image '{}'", in_path.display()))?;
    let extractor = wordgarden::ShapeExtractor::new(cfg.extract_opts())?;
    Ok(extractor.extract(&bytes, rng)?)
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    cfg.extract_opts().validate()?;

    let mut rng = wordgarden::garden_rng(cfg.seed);
    let shape = extract_points(&cfg, &args.common.in_path, &mut rng)?;
    if shape.no_shape_detected() {
        eprintln!("no shape detected; try an image with a darker subject");
    }

    create_parent_dir(&args.out)?;
    let f = File::create(&args.out)
        .with_context(|| format!("create points file '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), &shape)
        .with_context(|| format!("write points JSON '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({} points)",
        args.out.display(),
        shape.internal_points.len()
    );

    if let Some(mask_path) = &args.mask {
        create_parent_dir(mask_path)?;
        std::fs::write(mask_path, &shape.visualization_png)
            .with_context(|| format!("write mask png '{}'", mask_path.display()))?;
        eprintln!("wrote {}", mask_path.display());
    }
    Ok(())
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.common)?;
    if let Some(d) = args.duration {
        cfg.duration_secs = d;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    if let Some(words) = args.words {
        cfg.words = words;
    }
    if let Some(mode) = args.color_mode {
        cfg.color_mode = match mode {
            ColorChoice::Single => wordgarden::ColorMode::Single,
            ColorChoice::Rainbow => wordgarden::ColorMode::Rainbow,
            ColorChoice::Custom => wordgarden::ColorMode::Custom,
        };
    }
    if let Some(bg) = args.background {
        cfg.background = bg;
    }
    cfg.validate()?;

    if !wordgarden::is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg is required for recording, but was not found on PATH");
    }

    let mut rng = wordgarden::garden_rng(cfg.seed);
    let shape = extract_points(&cfg, &args.common.in_path, &mut rng)?;
    if shape.no_shape_detected() {
        anyhow::bail!("no shape detected in '{}'", args.common.in_path.display());
    }

    let tokens = wordgarden::layout_tokens(
        &shape.internal_points,
        &cfg.word_list(),
        &cfg.palette(),
        cfg.canvas()?,
        cfg.duration_secs,
        &mut rng,
    );

    let clock: Rc<dyn wordgarden::Clock> = Rc::new(wordgarden::SystemClock::new());
    let mut garden = wordgarden::WordGarden::new(tokens, cfg.garden_style()?, clock.clone());
    let mut recorder =
        wordgarden::Recorder::new(clock).with_observer(Box::new(wordgarden::LogObserver));
    let encoder = wordgarden::FfmpegStreamEncoder::new(wordgarden::FfmpegStreamOpts::default());
    let artifact = recorder.record(cfg.capture_opts()?, Box::new(encoder), &mut garden)?;

    let out = args.out_dir.join(&artifact.file_name);
    create_parent_dir(&out)?;
    std::fs::write(&out, &artifact.bytes)
        .with_context(|| format!("write recording '{}'", out.display()))?;
    eprintln!("wrote {} ({} frames)", out.display(), artifact.frames);
    Ok(())
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
