//! # mille
//!
//! A command-line tool for producing Millepede-II alignment input.
//!
//! ## Usage
//!
//! ```bash
//! # Convert a directory of Parquet track files to mp2input.bin
//! mille convert -i kfalignment/ -o mp2input
//!
//! # Text output, keeping zero derivatives
//! mille convert -i kfalignment/ -o mp2input -t -z
//!
//! # Look at the first records
//! mille inspect mp2input.bin --limit 3
//!
//! # Generate demo input
//! mille demo demo_tracks
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
