// src/bin/testsmells.rs
//! Testsmells CLI binary.

#![deny(missing_docs)]

use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;

use testsmells::cli;
use testsmells::config::Config;
use testsmells::detector::JarDetector;
use testsmells::error::SmellResult;
use testsmells::log::Log;
use testsmells::run::{Pipeline, Project, RunOutcome};

fn main() -> SmellResult<()> {
    let args = cli::Cli::parse();
    let log = Log::new(args.verbose, args.quiet);

    match args.command {
        // init: initializes project config (e.g., default path);
        cli::Commands::Init { path, force } => {
            let mut root: PathBuf = path.unwrap_or_else(|| PathBuf::from("."));
            if root.is_file()
                && let Some(parent) = root.parent()
            {
                root = parent.to_path_buf();
            }
            let path_written = Config::write_default_config_at(root.as_path(), force)?;
            log.info(&format!(
                "{} .testsmells.toml at {}",
                if force { "Overwrote" } else { "Initialized" },
                path_written.display()
            ));
        }

        // detect: the full pipeline against the external engine.
        cli::Commands::Detect {
            target,
            fail_on_smells,
        } => {
            let target = target.unwrap_or_else(|| PathBuf::from("."));
            let cfg = Config::load_or_default(&target)?;
            let project = Project::from_target(&target, &cfg)?;
            let detector = JarDetector::from_config(&cfg.detector);

            let outcome = Pipeline::new(project, &cfg, &log, &detector).run()?;
            if fail_on_smells
                && let RunOutcome::Completed { result, .. } = &outcome
                && result.any_smell_found
            {
                bail!("test smells detected");
            }
        }

        // correlate: write the detector input CSV and stop.
        cli::Commands::Correlate { target, output } => {
            let target = target.unwrap_or_else(|| PathBuf::from("."));
            let cfg = Config::load_or_default(&target)?;
            let project = Project::from_target(&target, &cfg)?;

            // The detector itself is not run here, so no jar is needed.
            let noop = NoDetector;
            let pipeline = Pipeline::new(project, &cfg, &log, &noop);
            if let Some(written) = pipeline.emit_input(output.as_deref())? {
                log.info(&format!("Wrote detector input CSV at {}", written.display()));
            }
        }
    }
    Ok(())
}

/// Placeholder detector for subcommands that never invoke one.
struct NoDetector;

impl testsmells::detector::Detector for NoDetector {
    fn invoke(&self, _input_csv: &std::path::Path) -> SmellResult<std::path::PathBuf> {
        bail!("detector invocation is not available in this mode");
    }
}
