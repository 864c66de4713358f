use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod convert;
mod demo;
mod inspect;

/// mille - Millepede-II alignment record writer
#[derive(Parser)]
#[command(name = "mille")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert fitted tracks to Millepede-II records
    Convert {
        /// Directory of Parquet track files
        #[arg(short, long, value_name = "DIR")]
        input: PathBuf,

        /// Output file name; `.bin` or `.txt` is appended
        #[arg(short, long, value_name = "OUT", default_value = "mp2input")]
        output: PathBuf,

        /// Write text records instead of binary
        #[arg(short, long)]
        text: bool,

        /// Keep zero-valued derivatives
        #[arg(short = 'z', long = "zero")]
        keep_zeros: bool,

        /// Load output, selection and hierarchy settings from a TOML file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the records of a Millepede-II input file
    Inspect {
        /// Record file (`.txt` is read as text, anything else as binary)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Stop after this many records
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print one JSON object per record
        #[arg(long, conflicts_with = "summary")]
        json: bool,

        /// Print file totals instead of individual records
        #[arg(short, long)]
        summary: bool,
    },

    /// Generate synthetic track files for testing
    Demo {
        /// Output directory
        #[arg(value_name = "DIR", default_value = "demo_tracks")]
        output: PathBuf,

        /// Number of tracks to generate
        #[arg(short = 'n', long, default_value = "1000")]
        tracks: usize,

        /// Number of Parquet files to spread the tracks over
        #[arg(short, long, default_value = "2")]
        files: usize,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            text,
            keep_zeros,
            config,
        } => convert::run(input, output, text, keep_zeros, config),
        Commands::Inspect {
            file,
            limit,
            json,
            summary,
        } => inspect::run(file, limit, json, summary),
        Commands::Demo {
            output,
            tracks,
            files,
        } => demo::run(output, tracks, files),
    }
}
