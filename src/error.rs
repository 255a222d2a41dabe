// src/error.rs
//! Error handling for testsmells.

#![deny(missing_docs)]

use std::path::PathBuf;

/// SmellResult is alias for anyhow
pub type SmellResult<T> = anyhow::Result<T>;

/// Failures at the external-detector boundary.
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    /// The detector subprocess exited with a non-zero code.
    #[error("detector exited with code {0}")]
    Exited(i32),
    /// The detector subprocess was killed by a signal before exiting.
    #[error("detector terminated by signal")]
    Terminated,
    /// The detector exited cleanly but its report was not found.
    #[error("detector output CSV not found in {}", .0.display())]
    OutputMissing(PathBuf),
    /// No detector artifact could be resolved.
    #[error("no detector jar: set detector.jar in .testsmells.toml or TSDETECT_JAR")]
    JarMissing,
}
