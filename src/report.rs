// src/report.rs
//! Detector report interpretation.

#![deny(missing_docs)]

use crate::config::{ReportConfig, SmellSchema};
use crate::error::SmellResult;
use anyhow::Context;
use std::path::Path;

/// One positive smell cell from a report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmellFinding {
    /// Smell name, taken from the report header.
    pub name: String,
    /// Occurrence count; always positive. Flag-schema cells report 1.
    pub count: u32,
}

/// Findings for one test file, in report row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFindings {
    /// Display name of the test file (final path component).
    pub test_file: String,
    /// Positive findings for this file, in header order.
    pub findings: Vec<SmellFinding>,
}

/// The interpreted outcome of one detector run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// True iff at least one finding exists across all files.
    pub any_smell_found: bool,
    /// Per-file findings, preserving report row order.
    pub files: Vec<FileFindings>,
}

/// ReportInterpreter struct to keep
pub struct ReportInterpreter();

impl ReportInterpreter {
    /// Read and interpret the detector's report CSV.
    pub fn interpret(report_csv: &Path, cfg: &ReportConfig) -> SmellResult<RunResult> {
        let text = std::fs::read_to_string(report_csv)
            .with_context(|| format!("reading detector report {}", report_csv.display()))?;
        Ok(Self::interpret_text(&text, cfg))
    }

    /// Interpret report text. Malformed rows degrade instead of failing:
    /// rows too short for the path column are dropped, the smell scan is
    /// clamped to the overlapping header/row range, and cells that do not
    /// classify under the schema count as "not found". An empty report is
    /// a valid nothing-to-report outcome.
    pub fn interpret_text(text: &str, cfg: &ReportConfig) -> RunResult {
        let mut lines = text.lines();
        let Some(header_line) = lines.next() else {
            return RunResult::default();
        };
        let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();

        let mut result = RunResult::default();
        for line in lines {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            let Some(test_path) = values.get(cfg.path_column) else {
                continue;
            };

            let bound = headers.len().min(values.len());
            let mut findings = Vec::new();
            for i in cfg.smell_offset..bound {
                if let Some(count) = Self::classify(values[i], cfg.schema) {
                    findings.push(SmellFinding {
                        name: headers[i].to_string(),
                        count,
                    });
                }
            }

            if !findings.is_empty() {
                result.any_smell_found = true;
            }
            result.files.push(FileFindings {
                test_file: Self::display_name(test_path),
                findings,
            });
        }
        result
    }

    /// A cell is a finding iff it holds a positive integer (count schema)
    /// or a case-insensitive `true` (flag schema). Anything else,
    /// including unparsable junk, is "not found".
    fn classify(raw: &str, schema: SmellSchema) -> Option<u32> {
        match schema {
            SmellSchema::Count => raw.parse::<u32>().ok().filter(|count| *count > 0),
            SmellSchema::Flag => raw.eq_ignore_ascii_case("true").then_some(1),
        }
    }

    /// Final path component of a report path, either separator style.
    fn display_name(path: &str) -> String {
        path.rsplit(['/', '\\'])
            .next()
            .unwrap_or(path)
            .to_string()
    }
}
