//! Command-line argument parsing for infranet
//!
//! The program is driven by its interactive menu; flags only choose where data
//! and configuration live and how chatty the terminal output is.

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// infranet - keep track of cities, roads and road budgets
#[derive(Parser, Debug)]
#[command(name = "infranet")]
#[command(version)]
#[command(about = "Record cities, roads and road budgets from the terminal", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding cities.txt and roads.txt (overrides configuration)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only prompts, results and errors)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Verbosity from flags, falling back to `default` when none are given
    pub fn verbosity(&self, default: Verbosity) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => default,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Check if informational lines (load/save summaries) are shown
    pub fn show_info(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if debug lines are shown
    pub fn show_debug(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }

    /// Check if per-line parse traces are shown
    pub fn show_trace(&self) -> bool {
        matches!(self, Verbosity::VeryVerbose)
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiet" => Ok(Verbosity::Quiet),
            "normal" => Ok(Verbosity::Normal),
            "verbose" => Ok(Verbosity::Verbose),
            "very_verbose" => Ok(Verbosity::VeryVerbose),
            other => Err(format!("Invalid verbosity level: {}", other)),
        }
    }
}
