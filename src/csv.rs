// src/csv.rs
//! Detector input CSV emission.

#![deny(missing_docs)]

use crate::correlate::CorrelationRecord;
use crate::error::SmellResult;
use anyhow::Context;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// CsvEmitter struct to keep
pub struct CsvEmitter();

impl CsvEmitter {
    /// Write the detector input CSV: one headerless row per record,
    /// `project,testPath[,productionPath]`. The third field and its comma
    /// are omitted entirely when no production file was correlated; the
    /// detector's schema counts columns. The file is written to a temp
    /// sibling and renamed into place, so `dest` is either fully written
    /// or absent.
    pub fn emit(records: &[CorrelationRecord], dest: &Path) -> SmellResult<()> {
        let dir = dest.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))
            .with_context(|| format!("creating temp file next to {}", dest.display()))?;

        for rec in records {
            match &rec.production_file {
                Some(prod) => writeln!(
                    tmp,
                    "{},{},{}",
                    rec.project,
                    Self::normalize(&rec.test_file),
                    Self::normalize(prod)
                )?,
                None => writeln!(tmp, "{},{}", rec.project, Self::normalize(&rec.test_file))?,
            }
        }
        tmp.flush()?;
        tmp.persist(dest)
            .with_context(|| format!("writing {}", dest.display()))?;
        Ok(())
    }

    /// The detector expects `/` separators regardless of host OS.
    fn normalize(path: &Path) -> String {
        path.to_string_lossy().replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn record(prod: Option<&str>) -> CorrelationRecord {
        CorrelationRecord {
            project: "proj".into(),
            test_file: PathBuf::from("/abs/FooTest.java"),
            production_file: prod.map(PathBuf::from),
        }
    }

    fn parse(text: &str) -> Vec<(String, String, Option<String>)> {
        text.lines()
            .map(|line| {
                let mut it = line.splitn(3, ',');
                (
                    it.next().unwrap_or_default().to_string(),
                    it.next().unwrap_or_default().to_string(),
                    it.next().map(str::to_string),
                )
            })
            .collect()
    }

    #[test]
    fn rows_without_production_file_have_two_fields() -> SmellResult<()> {
        let tmp = TempDir::new()?;
        let dest = tmp.path().join("input.csv");
        CsvEmitter::emit(&[record(None)], &dest)?;

        let text = std::fs::read_to_string(&dest)?;
        assert_eq!(text, "proj,/abs/FooTest.java\n");
        Ok(())
    }

    #[test]
    fn emitted_rows_round_trip() -> SmellResult<()> {
        let tmp = TempDir::new()?;
        let dest = tmp.path().join("input.csv");
        let records = vec![record(Some("/abs/Foo.java")), record(None)];
        CsvEmitter::emit(&records, &dest)?;

        let parsed = parse(&std::fs::read_to_string(&dest)?);
        assert_eq!(
            parsed,
            vec![
                (
                    "proj".to_string(),
                    "/abs/FooTest.java".to_string(),
                    Some("/abs/Foo.java".to_string())
                ),
                ("proj".to_string(), "/abs/FooTest.java".to_string(), None),
            ]
        );
        Ok(())
    }

    #[test]
    fn backslashes_are_normalized() -> SmellResult<()> {
        let tmp = TempDir::new()?;
        let dest = tmp.path().join("input.csv");
        let rec = CorrelationRecord {
            project: "proj".into(),
            test_file: PathBuf::from(r"C:\work\FooTest.java"),
            production_file: None,
        };
        CsvEmitter::emit(&[rec], &dest)?;

        let text = std::fs::read_to_string(&dest)?;
        assert_eq!(text, "proj,C:/work/FooTest.java\n");
        Ok(())
    }

    #[test]
    fn failed_emit_leaves_no_file_behind() {
        let dest = Path::new("/nonexistent-dir-for-testsmells/input.csv");
        assert!(CsvEmitter::emit(&[record(None)], dest).is_err());
        assert!(!dest.exists());
    }
}
