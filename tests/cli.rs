// tests/cli.rs
//! Testsmells CLI tests.

use assert_cmd::Command;
use assert_fs::assert::PathAssert;
use assert_fs::fixture::FileWriteStr;
use assert_fs::fixture::PathChild;
use assert_fs::fixture::PathCreateDir;
use predicates::str::contains;
use testsmells::config::Config;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn dies_no_args() -> TestResult {
    let mut cmd = Command::cargo_bin("testsmells")?;
    cmd.env("CLICOLOR", "0");

    cmd.assert()
        .failure()
        .stderr(contains("Usage:"))
        .stderr(contains("[OPTIONS] <COMMAND>"))
        .stderr(contains("Commands:"));

    Ok(())
}

#[test]
fn init_writes_default_config_in_cwd() -> TestResult {
    let tmp = assert_fs::TempDir::new()?;

    Command::cargo_bin("testsmells")?
        .current_dir(&tmp)
        .arg("init")
        .assert()
        .success();

    let cfg_path = tmp.child(".testsmells.toml");
    cfg_path.assert(predicates::path::exists());

    let s = std::fs::read_to_string(cfg_path.path())?;
    let cfg: Config = toml::from_str(&s)?;
    let def = Config::default();
    assert_eq!(cfg.test_dir, def.test_dir);
    assert_eq!(cfg.test_suffix, def.test_suffix);
    assert_eq!(cfg.report.smell_offset, def.report.smell_offset);

    tmp.close()?;
    Ok(())
}

#[test]
fn detect_skips_without_test_sources() -> TestResult {
    let tmp = assert_fs::TempDir::new()?;

    Command::cargo_bin("testsmells")?
        .current_dir(&tmp)
        .env_remove("TSDETECT_JAR")
        .args(["detect", "."])
        .assert()
        .success()
        .stderr(contains("no test sources"))
        .stderr(contains("skipping"));

    tmp.close()?;
    Ok(())
}

#[test]
fn correlate_writes_input_csv() -> TestResult {
    let tmp = assert_fs::TempDir::new()?;
    tmp.child("src/test/java").create_dir_all()?;
    tmp.child("src/main/java").create_dir_all()?;
    tmp.child("src/test/java/FooTest.java")
        .write_str("class FooTest {}\n")?;
    tmp.child("src/main/java/Foo.java")
        .write_str("class Foo {}\n")?;

    Command::cargo_bin("testsmells")?
        .current_dir(&tmp)
        .args(["correlate", "."])
        .assert()
        .success()
        .stdout(contains("Wrote detector input CSV"));

    let csv = tmp.child("target/testsmells-input.csv");
    csv.assert(predicates::path::exists());

    let text = std::fs::read_to_string(csv.path())?;
    let line = text.trim_end();
    assert_eq!(line.split(',').count(), 3);
    assert!(line.contains("/FooTest.java,"));
    assert!(line.ends_with("/Foo.java"));

    tmp.close()?;
    Ok(())
}

#[test]
fn correlate_emits_two_fields_without_production_match() -> TestResult {
    let tmp = assert_fs::TempDir::new()?;
    tmp.child("src/test/java").create_dir_all()?;
    tmp.child("src/main/java").create_dir_all()?;
    tmp.child("src/test/java/OrphanTest.java").write_str("")?;

    Command::cargo_bin("testsmells")?
        .current_dir(&tmp)
        .args(["correlate", ".", "--output", "out.csv"])
        .assert()
        .success();

    let text = std::fs::read_to_string(tmp.child("out.csv").path())?;
    let line = text.trim_end();
    assert_eq!(line.split(',').count(), 2);
    assert!(line.ends_with("/OrphanTest.java"));

    tmp.close()?;
    Ok(())
}

#[test]
fn correlate_skips_quietly_without_test_sources() -> TestResult {
    let tmp = assert_fs::TempDir::new()?;

    Command::cargo_bin("testsmells")?
        .current_dir(&tmp)
        .args(["--quiet", "correlate", "."])
        .assert()
        .success()
        .stdout(predicates::str::is_empty());

    tmp.close()?;
    Ok(())
}
