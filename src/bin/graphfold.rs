use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "graphfold", version)]
struct Cli {
    /// Log more (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render slices into page PNGs.
    Render(RenderArgs),
    /// Print bounds, ranking and colors as JSON without rendering.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Directory of slice JSON files, taken in file-name order (`s2` before `s10`).
    #[arg(long = "in", conflicts_with = "slices", required_unless_present = "slices")]
    in_dir: Option<PathBuf>,

    /// Explicit slice file, in temporal order. Repeatable.
    #[arg(long = "slice")]
    slices: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// JSON render config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of nodes to highlight (0 highlights all).
    #[arg(long)]
    top_k: Option<usize>,

    /// Comma-separated `#rrggbb` colors.
    #[arg(long, value_delimiter = ',')]
    palette: Vec<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    rank: RankArgs,

    /// Output directory for page_<N>.png.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Pixels per millimetre of paper.
    #[arg(long)]
    px_per_mm: Option<u32>,

    /// Font file for labels and page numbers.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    rank: RankArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn slice_set(input: InputArgs) -> anyhow::Result<graphfold::SliceSet> {
    Ok(match input.in_dir {
        Some(dir) => graphfold::SliceSet::from_dir(&dir)?,
        None => graphfold::SliceSet::from_paths(input.slices)?,
    })
}

fn load_config(rank: RankArgs) -> anyhow::Result<graphfold::RenderConfig> {
    let mut config = match &rank.config {
        Some(path) => graphfold::RenderConfig::from_path(path)?,
        None => graphfold::RenderConfig::default(),
    };
    if let Some(k) = rank.top_k {
        config.top_k = k;
    }
    if !rank.palette.is_empty() {
        config.palette = graphfold::parse_palette(&rank.palette)?;
    }
    Ok(config)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.rank)?;
    if let Some(px) = args.px_per_mm {
        config.page.px_per_mm = px;
    }
    if args.font.is_some() {
        config.font = args.font;
    }

    let opts = graphfold::RunOptions {
        slices: slice_set(args.input)?,
        out_dir: args.out_dir,
        config,
    };
    let summary = graphfold::run(&opts)?;
    for page in &summary.pages {
        eprintln!("wrote {}", page.display());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let config = load_config(args.rank)?;
    let slices = slice_set(args.input)?;
    let report = graphfold::inspect(&slices, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
