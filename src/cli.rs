//! CLI argument parser for testsmells.

#![deny(missing_docs)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Detect test smells with the bundled tsDetect engine.
#[derive(Parser, Debug)]
#[command(
    name = "testsmells",
    version,
    about = "Correlate test and production sources and run the tsDetect test-smell engine",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Set verbosity level: -v=1, -v=2, -v=3
    #[arg(
        short = 'v',
        long = "verbose",
        value_name = "LEVEL",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=3),
        global = true
    )]
    pub verbose: u8,

    /// Silence all output (overrides -v).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands supported by the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize project configuration.
    Init {
        /// Directory where configuration should live (defaults to pwd).
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite existing configuration if present.
        #[arg(long)]
        force: bool,
    },

    /// Correlate sources, run the detector, and report smells.
    Detect {
        /// Project root to analyze. Defaults to ".".
        target: Option<PathBuf>,

        /// Exit non-zero when any smell is found.
        #[arg(long)]
        fail_on_smells: bool,
    },

    /// Write the detector input CSV without running the detector.
    Correlate {
        /// Project root to analyze. Defaults to ".".
        target: Option<PathBuf>,

        /// Where to write the CSV (defaults to <build_dir>/testsmells-input.csv).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
