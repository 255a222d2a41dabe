// src/config.rs
//! Configuration file for testsmells

#![deny(missing_docs)]

use crate::error::SmellResult;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Config struct for testsmells.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project identifier written into the detector input CSV.
    /// Defaults to the target directory's name.
    pub project: Option<String>,
    /// Test-source directory, relative to the project root.
    pub test_dir: String,
    /// Production-source directory, relative to the project root.
    pub main_dir: String,
    /// Build-output directory, relative to the project root.
    pub build_dir: String,
    /// Source-file extension (without the dot).
    pub source_ext: String,
    /// Test-file name suffix before the extension (e.g. `FooTest.java`).
    /// An empty suffix matches every source file and correlates by
    /// identical file name.
    pub test_suffix: String,
    /// Exclude globs applied while walking the test tree.
    pub exclude: Vec<String>,
    /// Detector invocation settings.
    pub detector: DetectorConfig,
    /// Report interpretation settings.
    pub report: ReportConfig,
}

/// How the external detector is launched.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Path to the detector jar. Falls back to the `TSDETECT_JAR`
    /// environment variable, then to the bundled artifact if compiled in.
    pub jar: Option<PathBuf>,
    /// Java launcher binary.
    pub java: String,
}

/// How the detector's output CSV is interpreted. Both fields are coupled
/// to the bundled detector version; see the defaults below.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Zero-based column of the test-file path in each data row.
    pub path_column: usize,
    /// Zero-based column where smell columns begin; everything before it
    /// is row metadata.
    pub smell_offset: usize,
    /// Value schema of the smell cells.
    pub schema: SmellSchema,
}

/// The two cell schemas observed across detector versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmellSchema {
    /// Cells hold integer occurrence counts; positive means found.
    Count,
    /// Cells hold `true`/`false` flags (case-insensitive).
    Flag,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: None,
            test_dir: "src/test/java".into(),
            main_dir: "src/main/java".into(),
            build_dir: "target".into(),
            source_ext: "java".into(),
            test_suffix: "Test".into(),
            exclude: vec!["**/.git/**".into(), "**/target/**".into()],
            detector: DetectorConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            jar: None,
            java: "java".into(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path_column: 2,
            smell_offset: 7,
            schema: SmellSchema::Count,
        }
    }
}

impl Config {
    /// Load `.testsmells.toml` from `dir` (or its parent if `dir` is a file).
    /// If missing, return defaults. Ensures the directory fields are never empty.
    pub fn load_or_default(dir: &Path) -> SmellResult<Self> {
        let base = if dir.is_file() {
            dir.parent().unwrap_or(dir)
        } else {
            dir
        };
        let file = base.join(".testsmells.toml");
        if file.exists() {
            let s = fs::read_to_string(&file)?;
            let mut cfg: Config = toml::from_str(&s)?;
            let def = Config::default();
            if cfg.test_dir.is_empty() {
                cfg.test_dir = def.test_dir;
            }
            if cfg.main_dir.is_empty() {
                cfg.main_dir = def.main_dir;
            }
            if cfg.build_dir.is_empty() {
                cfg.build_dir = def.build_dir;
            }
            if cfg.source_ext.is_empty() {
                cfg.source_ext = def.source_ext;
            }
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Write default configs to .testsmells.toml
    pub fn write_default_config_at(dir: &Path, force: bool) -> SmellResult<PathBuf> {
        let base = if dir.is_file() {
            dir.parent().unwrap_or(dir)
        } else {
            dir
        };
        let file = base.join(".testsmells.toml");
        if !file.exists() || force {
            let s = toml::to_string_pretty(&Self::default())?;
            fs::write(&file, s)?;
        }
        Ok(file)
    }

    /// Build the exclude-glob matcher for test-tree walks.
    pub fn exclude_matcher(&self) -> SmellResult<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pat in &self.exclude {
            builder.add(Glob::new(pat)?);
        }
        Ok(builder.build()?)
    }
}
