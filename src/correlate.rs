// src/correlate.rs
//! Test-to-production file correlation.

#![deny(missing_docs)]

use crate::config::Config;
use crate::error::SmellResult;
use anyhow::{Context, bail};
use ignore::WalkBuilder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One discovered test file and its best-guess production counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationRecord {
    /// Project identifier, first CSV column.
    pub project: String,
    /// Absolute path of the test file.
    pub test_file: PathBuf,
    /// Absolute path of the matched production file, if any. Many test
    /// files (integration, utilities) have no 1:1 counterpart.
    pub production_file: Option<PathBuf>,
}

/// Correlator struct to keep
pub struct Correlator();

impl Correlator {
    /// Walk `test_root`, match test files, and pair each with the first
    /// same-named (suffix-stripped) file found under `main_root`.
    /// Production-side ambiguity is resolved by taking the first file in
    /// traversal order; this is best effort, not exact.
    pub fn correlate(
        project: &str,
        test_root: &Path,
        main_root: &Path,
        cfg: &Config,
    ) -> SmellResult<Vec<CorrelationRecord>> {
        let test_files = Self::discover_test_files(test_root, cfg)?;
        let production = Self::index_production_files(main_root)?;

        let mut records = Vec::with_capacity(test_files.len());
        for test_file in test_files {
            let production_file = test_file
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| Self::production_candidate(n, cfg))
                .and_then(|candidate| production.get(&candidate).cloned());

            records.push(CorrelationRecord {
                project: project.to_string(),
                test_file,
                production_file,
            });
        }
        Ok(records)
    }

    /// Find the test files to operate on, as absolute paths in walk order.
    pub fn discover_test_files(root: &Path, cfg: &Config) -> SmellResult<Vec<PathBuf>> {
        let excludes = cfg.exclude_matcher()?;
        let mut paths = Vec::new();

        for dent in Self::walker(root)? {
            let dent = dent.with_context(|| format!("walking {}", root.display()))?;
            if !dent.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let rel = dent.path().strip_prefix(root).unwrap_or(dent.path());
            if excludes.is_match(rel) {
                continue;
            }
            let name = match dent.path().file_name().and_then(|n| n.to_str()) {
                Some(n) => n,
                None => continue,
            };
            if Self::matches_test_file(name, cfg) {
                paths.push(std::path::absolute(dent.path())?);
            }
        }
        Ok(paths)
    }

    /// Whether `name` looks like a test file under the configured policy:
    /// `<anything><test_suffix>.<source_ext>`. An empty suffix accepts
    /// every file with the source extension.
    pub fn matches_test_file(name: &str, cfg: &Config) -> bool {
        let Some(stem) = name.strip_suffix(&format!(".{}", cfg.source_ext)) else {
            return false;
        };
        stem.ends_with(&cfg.test_suffix)
    }

    /// Derive the production file name a test file should correlate with:
    /// the test name with the suffix stripped (`FooTest.java` -> `Foo.java`).
    /// With an empty suffix the candidate is the identical name.
    pub fn production_candidate(name: &str, cfg: &Config) -> Option<String> {
        let ext = format!(".{}", cfg.source_ext);
        let stem = name.strip_suffix(&ext)?;
        let base = stem.strip_suffix(&cfg.test_suffix)?;
        Some(format!("{base}{ext}"))
    }

    /// Map file name -> first absolute path encountered in walk order.
    fn index_production_files(root: &Path) -> SmellResult<HashMap<String, PathBuf>> {
        let mut index = HashMap::new();
        for dent in Self::walker(root)? {
            let dent = dent.with_context(|| format!("walking {}", root.display()))?;
            if !dent.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Some(name) = dent.path().file_name().and_then(|n| n.to_str())
                && !index.contains_key(name)
            {
                index.insert(name.to_string(), std::path::absolute(dent.path())?);
            }
        }
        Ok(index)
    }

    /// Plain recursive walk: no ignore-file semantics, sorted by file name
    /// so one run on one filesystem is deterministic.
    fn walker(root: &Path) -> SmellResult<ignore::Walk> {
        if !root.is_dir() {
            bail!("source root is not a directory: {}", root.display());
        }
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_exclude(false)
            .git_global(false)
            .follow_links(false)
            .max_depth(None)
            .sort_by_file_name(|a, b| a.cmp(b));
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn matcher_honors_suffix_and_extension() {
        let cfg = Config::default();
        assert!(Correlator::matches_test_file("FooTest.java", &cfg));
        assert!(!Correlator::matches_test_file("Foo.java", &cfg));
        assert!(!Correlator::matches_test_file("FooTest.kt", &cfg));
        assert!(!Correlator::matches_test_file("FooTest", &cfg));
    }

    #[test]
    fn empty_suffix_matches_any_source_file() {
        let cfg = Config {
            test_suffix: String::new(),
            ..Config::default()
        };
        assert!(Correlator::matches_test_file("Foo.java", &cfg));
        assert_eq!(
            Correlator::production_candidate("Foo.java", &cfg).as_deref(),
            Some("Foo.java")
        );
    }

    #[test]
    fn candidate_strips_test_suffix() {
        let cfg = Config::default();
        assert_eq!(
            Correlator::production_candidate("FooTest.java", &cfg).as_deref(),
            Some("Foo.java")
        );
        assert_eq!(Correlator::production_candidate("Foo.java", &cfg), None);
    }

    #[test]
    fn correlates_matching_production_file() -> SmellResult<()> {
        let tmp = TempDir::new()?;
        write(tmp.path(), "test/a/FooTest.java", "class FooTest {}");
        write(tmp.path(), "main/a/Foo.java", "class Foo {}");

        let cfg = Config::default();
        let records = Correlator::correlate(
            "proj",
            &tmp.path().join("test"),
            &tmp.path().join("main"),
            &cfg,
        )?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].project, "proj");
        assert!(records[0].test_file.is_absolute());
        assert!(records[0].test_file.ends_with("a/FooTest.java"));
        let prod = records[0].production_file.as_ref().unwrap();
        assert!(prod.is_absolute());
        assert!(prod.ends_with("a/Foo.java"));
        Ok(())
    }

    #[test]
    fn unmatched_test_file_gets_no_production_path() -> SmellResult<()> {
        let tmp = TempDir::new()?;
        write(tmp.path(), "test/BarIntegrationTest.java", "");
        fs::create_dir_all(tmp.path().join("main"))?;

        let records = Correlator::correlate(
            "proj",
            &tmp.path().join("test"),
            &tmp.path().join("main"),
            &Config::default(),
        )?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].production_file, None);
        Ok(())
    }

    #[test]
    fn ambiguous_production_name_takes_first_in_walk_order() -> SmellResult<()> {
        let tmp = TempDir::new()?;
        write(tmp.path(), "test/FooTest.java", "");
        write(tmp.path(), "main/a/Foo.java", "");
        write(tmp.path(), "main/b/Foo.java", "");

        let records = Correlator::correlate(
            "proj",
            &tmp.path().join("test"),
            &tmp.path().join("main"),
            &Config::default(),
        )?;

        let prod = records[0].production_file.as_ref().unwrap();
        assert!(prod.ends_with("a/Foo.java"));
        Ok(())
    }

    #[test]
    fn exclude_globs_prune_test_discovery() -> SmellResult<()> {
        let tmp = TempDir::new()?;
        write(tmp.path(), "test/FooTest.java", "");
        write(tmp.path(), "test/generated/GenTest.java", "");
        fs::create_dir_all(tmp.path().join("main"))?;

        let cfg = Config {
            exclude: vec!["generated/**".into()],
            ..Config::default()
        };
        let files = Correlator::discover_test_files(&tmp.path().join("test"), &cfg)?;
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("FooTest.java"));
        Ok(())
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = Correlator::discover_test_files(&tmp.path().join("nope"), &Config::default());
        assert!(err.is_err());
    }
}
