// src/run.rs
//! The detection pipeline: correlate, emit, invoke, interpret.

#![deny(missing_docs)]

use crate::config::Config;
use crate::correlate::{CorrelationRecord, Correlator};
use crate::csv::CsvEmitter;
use crate::detector::Detector;
use crate::error::SmellResult;
use crate::log::Log;
use crate::report::{ReportInterpreter, RunResult};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the detector input CSV inside the build directory.
pub const INPUT_FILE_NAME: &str = "testsmells-input.csv";

/// Subdirectory of the build directory where reports are archived.
pub const RESULTS_DIR_NAME: &str = "testsmells";

/// The build-project descriptor: identifier plus the directories the
/// pipeline reads from and writes to.
#[derive(Debug, Clone)]
pub struct Project {
    /// Project identifier, first column of the detector input.
    pub id: String,
    /// Absolute project root.
    pub base_dir: PathBuf,
    /// Build-output directory (created on demand).
    pub build_dir: PathBuf,
}

impl Project {
    /// Describe the project rooted at `target`. The identifier comes from
    /// config, falling back to the root directory's name.
    pub fn from_target(target: &Path, cfg: &Config) -> SmellResult<Self> {
        let base_dir = std::path::absolute(target)
            .with_context(|| format!("resolving target {}", target.display()))?;
        let id = cfg
            .project
            .clone()
            .or_else(|| {
                base_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "project".to_string());
        let build_dir = base_dir.join(&cfg.build_dir);
        Ok(Self {
            id,
            base_dir,
            build_dir,
        })
    }
}

/// What a pipeline run amounted to.
#[derive(Debug)]
pub enum RunOutcome {
    /// No test sources (or no matching test files); nothing was run.
    Skipped,
    /// The detector ran and its report was interpreted.
    Completed {
        /// The interpreted report.
        result: RunResult,
        /// Where the raw report was archived, when smells were found.
        saved_report: Option<PathBuf>,
    },
}

/// The strictly sequential pipeline. Collaborators are injected: the log
/// sink and the detector boundary come in by reference, so tests swap the
/// subprocess for a fake.
pub struct Pipeline<'a> {
    project: Project,
    cfg: &'a Config,
    log: &'a Log,
    detector: &'a dyn Detector,
}

impl<'a> Pipeline<'a> {
    /// Assemble a pipeline over the given project.
    pub fn new(project: Project, cfg: &'a Config, log: &'a Log, detector: &'a dyn Detector) -> Self {
        Self {
            project,
            cfg,
            log,
            detector,
        }
    }

    /// Correlate, emit the input CSV, run the detector, interpret, and
    /// archive the report when smells were found. Missing test sources
    /// skip the run; everything else fails it.
    pub fn run(&self) -> SmellResult<RunOutcome> {
        self.log
            .info(&format!("Running test-smell detection for {}", self.project.id));

        let Some(records) = self.correlate_records()? else {
            return Ok(RunOutcome::Skipped);
        };

        let input = self.emit_to(None, &records)?;
        let report = self.detector.invoke(&input)?;
        let result = ReportInterpreter::interpret(&report, &self.cfg.report)?;
        self.log_summary(&result);

        let saved_report = if result.any_smell_found {
            Some(self.archive_report(&report)?)
        } else {
            self.log.info("No test smells detected.");
            None
        };

        Ok(RunOutcome::Completed {
            result,
            saved_report,
        })
    }

    /// Correlate and write the input CSV only (the `correlate` subcommand).
    /// Returns the CSV path, or None when the run would be skipped.
    pub fn emit_input(&self, output: Option<&Path>) -> SmellResult<Option<PathBuf>> {
        let Some(records) = self.correlate_records()? else {
            return Ok(None);
        };
        Ok(Some(self.emit_to(output, &records)?))
    }

    /// None means "skip": no test-source directory, or no matching files.
    fn correlate_records(&self) -> SmellResult<Option<Vec<CorrelationRecord>>> {
        let test_root = self.project.base_dir.join(&self.cfg.test_dir);
        if !test_root.is_dir() {
            self.log.warn(&format!(
                "no test sources at {}, skipping detection",
                test_root.display()
            ));
            return Ok(None);
        }
        let main_root = self.project.base_dir.join(&self.cfg.main_dir);

        let records = Correlator::correlate(&self.project.id, &test_root, &main_root, self.cfg)?;
        if records.is_empty() {
            self.log.warn(&format!(
                "no test files matching *{}.{} under {}, skipping detection",
                self.cfg.test_suffix,
                self.cfg.source_ext,
                test_root.display()
            ));
            return Ok(None);
        }
        self.log
            .debug(&format!("correlated {} test file(s)", records.len()));
        Ok(Some(records))
    }

    fn emit_to(&self, output: Option<&Path>, records: &[CorrelationRecord]) -> SmellResult<PathBuf> {
        let dest = match output {
            Some(path) => path.to_path_buf(),
            None => {
                fs::create_dir_all(&self.project.build_dir).with_context(|| {
                    format!("creating build dir {}", self.project.build_dir.display())
                })?;
                self.project.build_dir.join(INPUT_FILE_NAME)
            }
        };
        CsvEmitter::emit(records, &dest)?;
        self.log
            .debug(&format!("wrote detector input CSV at {}", dest.display()));
        Ok(dest)
    }

    fn log_summary(&self, result: &RunResult) {
        for file in &result.files {
            self.log
                .info(&format!("Code smells for file {}:", file.test_file));
            if file.findings.is_empty() {
                self.log.info("  no smells found");
            }
            for finding in &file.findings {
                self.log
                    .info(&format!("  {}: {}", finding.name, finding.count));
            }
        }
    }

    /// Copy the raw report under the build tree, keeping the detector's
    /// own file name.
    fn archive_report(&self, report: &Path) -> SmellResult<PathBuf> {
        let results_dir = self.project.build_dir.join(RESULTS_DIR_NAME);
        fs::create_dir_all(&results_dir)
            .with_context(|| format!("creating {}", results_dir.display()))?;
        let name = report
            .file_name()
            .with_context(|| format!("report has no file name: {}", report.display()))?;
        let saved = results_dir.join(name);
        fs::copy(report, &saved)
            .with_context(|| format!("archiving report to {}", saved.display()))?;
        self.log
            .info(&format!("Test smell report saved at {}", saved.display()));
        Ok(saved)
    }
}
