// src/detector.rs
//! External detector invocation.

#![deny(missing_docs)]

use crate::config::DetectorConfig;
use crate::error::{DetectorError, SmellResult};
use anyhow::Context;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

/// Name prefix of the report the detector writes into its working
/// directory. The detector offers no way to choose an output path, so the
/// report is located by this naming convention after the run.
pub const OUTPUT_PREFIX: &str = "Output_TestSmellDetection";

#[cfg(feature = "bundled")]
const BUNDLED_JAR: &[u8] = include_bytes!("../resources/tsDetect.jar");

/// The narrow boundary to the external smell engine: hand it an input CSV,
/// get back the path of the report it wrote. Mock this in tests instead of
/// spawning a real subprocess.
pub trait Detector {
    /// Run the detector against `input_csv` and locate its report.
    fn invoke(&self, input_csv: &Path) -> SmellResult<PathBuf>;
}

/// Where the jar bytes come from.
enum JarSource {
    /// An on-disk jar (config path or `TSDETECT_JAR`).
    OnDisk(PathBuf),
    /// Bytes compiled into the binary.
    #[cfg(feature = "bundled")]
    Embedded(&'static [u8]),
    /// Nothing resolved; materializing fails. Kept lazy so runs that
    /// skip before invoking the detector need no jar at all.
    Missing,
}

/// The real detector: a jar launched through a `java` binary.
pub struct JarDetector {
    jar: JarSource,
    java: String,
}

impl JarDetector {
    /// Resolve the jar artifact: explicit config path, then the
    /// `TSDETECT_JAR` environment variable, then the bundled bytes when
    /// compiled with the `bundled` feature.
    pub fn from_config(cfg: &DetectorConfig) -> Self {
        let jar = if let Some(path) = &cfg.jar {
            JarSource::OnDisk(path.clone())
        } else if let Some(path) = std::env::var_os("TSDETECT_JAR") {
            JarSource::OnDisk(PathBuf::from(path))
        } else {
            #[cfg(feature = "bundled")]
            {
                JarSource::Embedded(BUNDLED_JAR)
            }
            #[cfg(not(feature = "bundled"))]
            {
                JarSource::Missing
            }
        };
        Self {
            jar,
            java: cfg.java.clone(),
        }
    }

    /// Copy the jar to a private temp file. The file is deleted when the
    /// returned handle drops, on success and failure alike.
    fn materialize(&self) -> SmellResult<NamedTempFile> {
        let mut tmp = tempfile::Builder::new()
            .prefix("tsDetect")
            .suffix(".jar")
            .tempfile()
            .context("creating temp file for detector jar")?;
        match &self.jar {
            JarSource::OnDisk(path) => {
                let mut src = File::open(path)
                    .with_context(|| format!("opening detector jar {}", path.display()))?;
                io::copy(&mut src, tmp.as_file_mut())?;
            }
            #[cfg(feature = "bundled")]
            JarSource::Embedded(bytes) => tmp.write_all(bytes)?,
            JarSource::Missing => return Err(DetectorError::JarMissing.into()),
        }
        tmp.flush()?;
        Ok(tmp)
    }

    /// The newest `Output_TestSmellDetection*.csv` in `dir`, if any.
    fn newest_report(dir: &Path) -> SmellResult<Option<PathBuf>> {
        let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
        for entry in
            std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?
        {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !Self::is_report_name(name) {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            if newest.as_ref().is_none_or(|(t, _)| modified > *t) {
                newest = Some((modified, entry.path()));
            }
        }
        Ok(newest.map(|(_, path)| path))
    }

    /// Whether a file name matches the detector's report convention.
    pub fn is_report_name(name: &str) -> bool {
        name.starts_with(OUTPUT_PREFIX) && name.ends_with(".csv")
    }
}

impl Detector for JarDetector {
    /// Launch `java -jar <temp-jar> <input-csv>` with the input's parent
    /// directory as cwd and block until it exits. Output::output() drains
    /// stdout and stderr concurrently with the wait; the content is
    /// discarded, since the contract is exit code plus a written file.
    /// No timeout: a hung detector hangs the run rather than retrying.
    fn invoke(&self, input_csv: &Path) -> SmellResult<PathBuf> {
        let input = std::path::absolute(input_csv)?;
        let workdir = input
            .parent()
            .with_context(|| format!("input CSV has no parent directory: {}", input.display()))?
            .to_path_buf();

        let jar = self.materialize()?;
        let output = Command::new(&self.java)
            .arg("-jar")
            .arg(jar.path())
            .arg(&input)
            .current_dir(&workdir)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("launching detector via {}", self.java))?;

        if !output.status.success() {
            let err = match output.status.code() {
                Some(code) => DetectorError::Exited(code),
                None => DetectorError::Terminated,
            };
            return Err(err.into());
        }

        Self::newest_report(&workdir)?
            .ok_or_else(|| DetectorError::OutputMissing(workdir).into())
    }
}
