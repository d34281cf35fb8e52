use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use missionday::{
    Briefing, ChromaKey, Clock, Compositor, MissionConfig, MissionForm, MissionRequest, PixelFrame,
    RasterSurface, SystemClock, Ticker,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "missionday", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the countdown, phase and dialog for a birthday.
    Countdown(CountdownArgs),
    /// Keep printing the countdown on a fixed interval.
    Watch(WatchArgs),
    /// Validate a mission and print its share path.
    Link(LinkArgs),
    /// List selectable characters.
    Roster(RosterArgs),
    /// Make the green-screen background of an image transparent.
    Key(KeyArgs),
    /// Decode a video and write chroma-keyed PNG frames (requires `ffmpeg` on PATH).
    KeyVideo(KeyVideoArgs),
}

#[derive(clap::Args, Debug)]
struct MissionArgs {
    /// Recipient name.
    #[arg(long, default_value = "AGENT")]
    name: String,

    /// Birthday day of month (1-31).
    #[arg(long)]
    day: String,

    /// Birthday month (1-12).
    #[arg(long)]
    month: String,

    /// Character id.
    #[arg(long, default_value = "gojo")]
    character: String,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CountdownArgs {
    #[command(flatten)]
    mission: MissionArgs,

    /// Local time to count from (`YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`); defaults to now.
    #[arg(long)]
    now: Option<String>,

    /// Print the briefing as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    #[command(flatten)]
    mission: MissionArgs,

    /// Stop after this many ticks.
    #[arg(long, default_value_t = 10)]
    ticks: u64,
}

#[derive(Parser, Debug)]
struct LinkArgs {
    #[command(flatten)]
    mission: MissionArgs,
}

#[derive(Parser, Debug)]
struct RosterArgs {
    /// Filter by name or tagline.
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(Parser, Debug)]
struct KeyArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct KeyVideoArgs {
    /// Input video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory for `frame_NNNNN.png` output.
    #[arg(long)]
    out_dir: PathBuf,

    /// Maximum number of frames to decode.
    #[arg(long, default_value_t = 300)]
    frames: u32,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Countdown(args) => cmd_countdown(args),
        Command::Watch(args) => cmd_watch(args),
        Command::Link(args) => cmd_link(args),
        Command::Roster(args) => cmd_roster(args),
        Command::Key(args) => cmd_key(args),
        Command::KeyVideo(args) => cmd_key_video(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MissionConfig> {
    match path {
        Some(p) => MissionConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(MissionConfig::default()),
    }
}

fn mission_request(args: &MissionArgs) -> anyhow::Result<MissionRequest> {
    let form = MissionForm {
        name: args.name.clone(),
        day: args.day.clone(),
        month: args.month.clone(),
        character: args.character.clone(),
    };
    Ok(form.validate()?)
}

fn parse_now(raw: &str) -> anyhow::Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("parse --now '{raw}' (expected YYYY-MM-DD[THH:MM:SS])"))?;
    date.and_hms_opt(0, 0, 0)
        .with_context(|| format!("midnight of '{raw}'"))
}

fn print_briefing(b: &Briefing) {
    if let Some(reveal) = &b.reveal {
        println!("MISSION ACCOMPLISHED!");
        println!("{reveal}");
    } else {
        println!("{}  [{}]", b.countdown.clock_line(), b.reading.phase);
    }
    println!("{}", b.incoming_message());
}

fn cmd_countdown(args: CountdownArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.mission.config.as_deref())?;
    let req = mission_request(&args.mission)?;
    let now = match args.now.as_deref() {
        Some(raw) => parse_now(raw)?,
        None => SystemClock.now(),
    };

    let briefing = Briefing::at(&req, now, &cfg.phases)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&briefing)?);
    } else {
        println!("TARGET_NAME: {}", briefing.name);
        print_briefing(&briefing);
    }
    Ok(())
}

fn cmd_watch(args: WatchArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.mission.config.as_deref())?;
    let req = mission_request(&args.mission)?;

    let ticker = Ticker::spawn(
        SystemClock,
        req.target,
        cfg.phases.clone(),
        cfg.tick_interval(),
    )?;
    for _ in 0..args.ticks {
        let Some(tick) = ticker.recv() else {
            break;
        };
        let briefing = Briefing::from_countdown(&req, tick.countdown, &cfg.phases);
        print_briefing(&briefing);
    }
    ticker.stop();
    Ok(())
}

fn cmd_link(args: LinkArgs) -> anyhow::Result<()> {
    let req = mission_request(&args.mission)?;
    if !req.has_known_character() {
        tracing::warn!(character = %req.character, "unknown character, link shows the default");
    }
    println!("{}", req.to_path());
    Ok(())
}

fn cmd_roster(args: RosterArgs) -> anyhow::Result<()> {
    for c in missionday::search_characters(&args.search) {
        println!(
            "{:<6} {:<20} {:<22} {:<20} PWR {:>3} SPD {:>3} TEC {:>3}",
            c.id, c.name, c.desc, c.universe, c.stats.power, c.stats.speed, c.stats.technique
        );
    }
    Ok(())
}

fn cmd_key(args: KeyArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let img = image::open(&args.in_path)
        .with_context(|| format!("open image '{}'", args.in_path.display()))?
        .to_rgba8();
    let frame = PixelFrame::from_image(img);

    let clip = missionday::LoopingFrames::new(vec![frame], missionday::Fps::new(1, 1)?)?;
    let surface = RasterSurface::new(1, 1)?;
    let mut compositor = Compositor::new(clip, surface, cfg.chroma);
    let outcome = compositor.process_frame()?;
    tracing::info!(?outcome, "keyed image");

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let (_, surface) = compositor.into_parts();
    surface
        .into_frame()
        .into_image()?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_key_video(args: KeyVideoArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut clip = missionday::open_video(&args.in_path, args.frames)?;
    clip.set_looping(false);

    let key: ChromaKey = cfg.chroma;
    let mut compositor = Compositor::new(clip, RasterSurface::new(1, 1)?, key);
    let mut sink = missionday::PngSequenceSink::new(&args.out_dir);
    let stats = compositor.run(u64::from(args.frames), &mut sink)?;

    eprintln!(
        "wrote {} frames to {} ({} left opaque)",
        sink.written(),
        args.out_dir.display(),
        stats.unkeyed_frames
    );
    Ok(())
}

