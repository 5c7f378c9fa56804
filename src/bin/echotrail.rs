use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use echotrail::{
    CaptureSource, EffectPipeline, ImageSequenceSource, PngSequenceSink, ScriptedInput,
    SyntheticSource, TrailConfig,
};

#[derive(Parser, Debug)]
#[command(name = "echotrail", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the motion-trail effect and write output frames as PNGs.
    Run(RunArgs),
    /// Print the effective configuration as JSON.
    PrintConfig(ConfigArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// JSON configuration file; defaults are used for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Frame source: a directory of images, or `synthetic` for a generated test pattern.
    source: String,

    /// Output directory for PNG frames.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,

    /// Lock the blend offset to this many frames.
    #[arg(long)]
    offset: Option<usize>,

    /// Key script, one key per cycle (`a`/`d` offset, space freeze, `q` quit, `.` idle).
    #[arg(long, default_value = "")]
    keys: String,

    /// Stop after this many captured frames.
    #[arg(long)]
    max_frames: Option<u64>,

    /// Pause between cycles in milliseconds.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Apply the emboss filter to the output.
    #[arg(long, default_value_t = false)]
    emboss: bool,

    /// Restart an image directory from the first file at the end.
    #[arg(long = "loop", default_value_t = false)]
    looped: bool,

    /// Synthetic pattern size.
    #[arg(long, default_value = "320x240", value_parser = parse_size)]
    size: Size,
}

#[derive(Clone, Copy, Debug)]
struct Size {
    width: u32,
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::PrintConfig(args) => cmd_print_config(args),
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

fn load_config(args: &ConfigArgs) -> anyhow::Result<TrailConfig> {
    match &args.config {
        Some(path) => TrailConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(TrailConfig::default()),
    }
}

fn cmd_print_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    cfg.validate()?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.config)?;
    if args.offset.is_some() {
        cfg.fixed_offset = args.offset;
    }
    if args.max_frames.is_some() {
        cfg.max_frames = args.max_frames;
    }
    if let Some(ms) = args.interval_ms {
        cfg.frame_interval_ms = ms;
    }
    if args.emboss {
        cfg.effect.emboss = true;
    }

    let mut pipeline = EffectPipeline::new(&cfg)?;
    let mut capture = open_source(&args)?;
    let mut sink = PngSequenceSink::create(&args.out)?;
    let mut input = ScriptedInput::parse(&args.keys);

    let stats = pipeline.run(capture.as_mut(), &mut sink, &mut input)?;

    eprintln!(
        "wrote {} frames to {} ({} captured, {} skipped)",
        stats.frames_shown,
        args.out.display(),
        stats.frames_captured,
        stats.frames_skipped
    );
    Ok(())
}

fn open_source(args: &RunArgs) -> anyhow::Result<Box<dyn CaptureSource>> {
    if args.source == "synthetic" {
        let Size { width, height } = args.size;
        return Ok(Box::new(SyntheticSource::new(width, height, None)?));
    }
    let src = ImageSequenceSource::open(&args.source)
        .with_context(|| format!("open frame source '{}'", args.source))?
        .looped(args.looped);
    Ok(Box::new(src))
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    Ok(Size {
        width: w.trim().parse::<u32>().map_err(|e| format!("width: {e}"))?,
        height: h.trim().parse::<u32>().map_err(|e| format!("height: {e}"))?,
    })
}
