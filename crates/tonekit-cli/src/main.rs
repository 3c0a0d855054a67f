//! tonekit - tonal adjustments from the command line
//!
//! Loads a PNG into an editing session, runs adjustments, prints
//! histograms and history.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tonekit")]
#[command(author, version, about = "Interactive-style tonal adjustments for PNG images")]
#[command(long_about = "
Applies grayscale, invert, brightness, contrast and color balance to PNG
images, prints per-channel histograms and the undo history of a session.

Examples:
  tonekit info photo.png
  tonekit adjust photo.png -o out.png --op brightness=20 --op contrast=15
  tonekit adjust photo.png -o out.png --op balance=10,0,-10 --history
  tonekit adjust photo.png -o out.png --op invert --op restore
  tonekit histogram photo.png --height 200 --headroom 1.0
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Session config (RON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dimensions and histogram maxima
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Apply adjustments in order and write the result
    #[command(visible_alias = "a")]
    Adjust(AdjustArgs),

    /// Print normalized histogram bars, one line per bin
    #[command(visible_alias = "h")]
    Histogram(HistogramArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input PNG(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct AdjustArgs {
    /// Input PNG
    input: PathBuf,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Adjustment, repeatable: grayscale, invert, restore,
    /// brightness=L, contrast=L, balance=R,G,B
    #[arg(long = "op", required = true)]
    ops: Vec<String>,

    /// Print the history log after applying
    #[arg(long)]
    history: bool,
}

#[derive(Args)]
struct HistogramArgs {
    /// Input PNG
    input: PathBuf,

    /// Chart height (overrides config)
    #[arg(long)]
    height: Option<f64>,

    /// Fraction of the height the tallest bar reaches (overrides config)
    #[arg(long)]
    headroom: Option<f64>,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;
    let verbose = cli.verbose > 0;

    match cli.command {
        Commands::Info(args) => commands::info::run(args, &config, verbose),
        Commands::Adjust(args) => commands::adjust::run(args, &config, verbose),
        Commands::Histogram(args) => commands::histogram::run(args, &config, verbose),
    }
}
