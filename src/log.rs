// src/log.rs
//! Leveled log sink for testsmells.

#![deny(missing_docs)]

use colored::Colorize;

/// Log sink honoring the CLI's verbosity and quiet flags.
/// Passed by reference into everything that reports progress.
#[derive(Debug, Clone, Copy)]
pub struct Log {
    verbosity: u8,
    quiet: bool,
}

impl Log {
    /// Create a sink from the CLI globals.
    pub fn new(verbosity: u8, quiet: bool) -> Self {
        Self { verbosity, quiet }
    }

    /// A sink that prints nothing.
    pub fn silent() -> Self {
        Self::new(0, true)
    }

    /// Informational line, always shown unless quiet.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Detail line, shown at -v and above.
    pub fn debug(&self, msg: &str) {
        if !self.quiet && self.verbosity >= 1 {
            println!("{}", msg.dimmed());
        }
    }

    /// Warning line, always shown unless quiet.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{} {}", "warning:".yellow().bold(), msg);
        }
    }

    /// Error line, shown even when quiet.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", "error:".red().bold(), msg);
    }
}
