//! End-to-end tests for the `select-reference` and `merge-failed` binaries.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const HEADER: &str = "#ID\tAvg_fold\tLength\tRef_GC\tCovered_percent\tCovered_bases\tPlus_reads\tMinus_reads\tRead_GC\tMedian_fold\tStd_Dev";

const FAILED_HEADER: &str = "sample_name\tref_best_cov\taverage_coverage\tcovered_percent\tplus_reads\tminus_reads\tmedian_coverage\treads_distribution\traw_reads\ttrimmed_reads\tpct_reads_trimmed";

/// Build a covstats row: id, covered percent, plus, minus, median
fn row(id: &str, percent: &str, plus: u64, minus: u64, median: u64) -> String {
    format!("{id}\t25.31\t29903\t0.38\t{percent}\t20000\t{plus}\t{minus}\t0.37\t{median}\t4.1")
}

fn write_covstats(dir: &Path, rows: &[String]) -> std::path::PathBuf {
    let path = dir.join("S1_covstats.tsv");
    let mut text = format!("{HEADER}\n");
    for r in rows {
        text.push_str(r);
        text.push('\n');
    }
    std::fs::write(&path, text).unwrap();
    path
}

fn select(dir: &Path, covstats: &Path, raw: &str, trimmed: &str) -> Command {
    let mut cmd = Command::cargo_bin("select-reference").unwrap();
    cmd.current_dir(dir).args([
        "-bbmap_covstats",
        covstats.to_str().unwrap(),
        "-raw_reads",
        raw,
        "-trimmed_reads",
        trimmed,
        "-b",
        "S1",
    ]);
    cmd
}

#[test]
fn test_selects_first_reference_per_tag() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(
        dir.path(),
        &[
            row("refA tagX desc1", "80", 5, 3, 4),
            row("refB tagX desc2", "90", 1, 1, 5),
            row("refC tagY other strain", "99.5", 100, 90, 40),
        ],
    );

    select(dir.path(), &covstats, "1000", "800").assert().success();

    let refs = std::fs::read_to_string(dir.path().join("S1_refs.tsv")).unwrap();
    assert_eq!(refs, "refA\ttagX\tdesc1\nrefC\ttagY\tother strain\n");
    assert!(!dir.path().join("S1_failed_assembly.tsv").exists());
}

#[test]
fn test_refs_file_accumulates_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(dir.path(), &[row("refA tagX desc1", "80", 5, 3, 4)]);

    select(dir.path(), &covstats, "1000", "800").assert().success();
    select(dir.path(), &covstats, "1000", "800").assert().success();

    let refs = std::fs::read_to_string(dir.path().join("S1_refs.tsv")).unwrap();
    assert_eq!(refs.lines().count(), 2);
}

#[test]
fn test_failed_assembly_record() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(
        dir.path(),
        &[
            row("refA flu segment 4", "12.5", 10, 10, 0),
            row("refB rsv complete genome", "65.2", 300, 250, 2),
            row("refC flu segment 6", "40", 5, 5, 1),
            row("refD hmpv complete genome", "0", 0, 0, 0),
        ],
    );

    select(dir.path(), &covstats, "1000", "800").assert().success();

    let content = std::fs::read_to_string(dir.path().join("S1_failed_assembly.tsv")).unwrap();
    let expected = format!(
        "{FAILED_HEADER}\nS1\trefB rsv complete genome\t25.31\t65.2\t300\t250\t2\trsv: 550; flu: 30\t1000\t800\t20.0\t\n"
    );
    assert_eq!(content, expected);
    assert!(!dir.path().join("S1_refs.tsv").exists());
}

#[test]
fn test_failed_assembly_nothing_mapped() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(
        dir.path(),
        &[row("refA flu x", "0", 0, 0, 0), row("refB rsv y", "0.0", 0, 0, 0)],
    );

    select(dir.path(), &covstats, "3", "2").assert().success();

    let content = std::fs::read_to_string(dir.path().join("S1_failed_assembly.tsv")).unwrap();
    let data = content.lines().nth(1).unwrap();
    assert_eq!(data, "S1\t0\t0\t0\t0\t0\t0\t0\t3\t2\t33.33\t");
}

#[test]
fn test_failed_assembly_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(dir.path(), &[row("refA flu x", "10", 1, 1, 0)]);

    select(dir.path(), &covstats, "100", "90").assert().success();
    select(dir.path(), &covstats, "200", "100").assert().success();

    let content = std::fs::read_to_string(dir.path().join("S1_failed_assembly.tsv")).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.ends_with("\t200\t100\t50.0\t\n"));
}

#[test]
fn test_zero_raw_reads_fails() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(dir.path(), &[row("refA flu x", "10", 1, 1, 0)]);

    select(dir.path(), &covstats, "0", "0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("raw read count is zero"));
}

#[test]
fn test_zero_raw_reads_empties_previous_failed_record() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(dir.path(), &[row("refA flu x", "10", 1, 1, 0)]);
    let failed = dir.path().join("S1_failed_assembly.tsv");

    select(dir.path(), &covstats, "100", "90").assert().success();
    assert!(!std::fs::read_to_string(&failed).unwrap().is_empty());

    select(dir.path(), &covstats, "0", "0").assert().failure();
    assert_eq!(std::fs::read_to_string(&failed).unwrap(), "");
}

#[test]
fn test_zero_raw_reads_ignored_when_selected() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(dir.path(), &[row("refA flu x", "95", 9, 9, 10)]);

    select(dir.path(), &covstats, "0", "0").assert().success();
    assert!(!dir.path().join("S1_failed_assembly.tsv").exists());
}

#[test]
fn test_negative_thresholds() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(dir.path(), &[row("refA flu x", "0", 0, 0, 0)]);

    select(dir.path(), &covstats, "10", "10")
        .args(["-m", "-1", "-p", "-5"])
        .assert()
        .success();
    assert!(dir.path().join("S1_refs.tsv").exists());
}

#[test]
fn test_custom_thresholds_and_outdir() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();
    let covstats = write_covstats(dir.path(), &[row("refA flu x", "55", 9, 9, 1)]);

    Command::cargo_bin("select-reference")
        .unwrap()
        .current_dir(dir.path())
        .args(["--bbmap-covstats", covstats.to_str().unwrap()])
        .args(["--raw-reads", "10", "--trimmed-reads", "10", "-b", "S1"])
        .args(["-m", "1", "-p", "50", "--outdir", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(out.join("S1_refs.tsv").exists());
}

#[test]
fn test_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(dir.path(), &[row("refA flu x", "95", 9, 9, 10)]);

    select(dir.path(), &covstats, "10", "10")
        .args(["--summary", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"selected\""))
        .stdout(predicate::str::contains("\"accession\": \"refA\""));
}

#[test]
fn test_malformed_row_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.tsv");
    std::fs::write(&path, format!("{HEADER}\nrefA flu x\t1\t2\n")).unwrap();

    select(dir.path(), &path, "10", "10")
        .assert()
        .failure()
        .stderr(predicate::str::contains("columns"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    select(dir.path(), &dir.path().join("missing.tsv"), "10", "10")
        .assert()
        .failure();
}

#[test]
fn test_merge_failed_runs() {
    let dir = tempfile::tempdir().unwrap();
    let summary = dir.path().join("run_summary.tsv");
    let failed = dir.path().join("failed.tsv");

    std::fs::write(&summary, "a\tb\tc\tref_acc\n1\t2\t3\tX0\n").unwrap();
    std::fs::write(&failed, "a\tb\tref_best_cov\n1\t2\tX tag desc\n").unwrap();

    Command::cargo_bin("merge-failed")
        .unwrap()
        .args([summary.to_str().unwrap(), failed.to_str().unwrap()])
        .assert()
        .success();

    let content = std::fs::read_to_string(&summary).unwrap();
    assert_eq!(content, "a\tb\tc\tref_acc\n1\t2\t3\tX0\n1\t2\t\tX\n");
}

#[test]
fn test_select_then_merge() {
    let dir = tempfile::tempdir().unwrap();
    let covstats = write_covstats(dir.path(), &[row("refB rsv complete genome", "30", 4, 4, 1)]);
    select(dir.path(), &covstats, "1000", "800").assert().success();

    let summary = dir.path().join("run_summary.tsv");
    std::fs::write(&summary, "sample_name\tref_acc\tref_tag\tref_header\tpct_reads_trimmed\n").unwrap();

    Command::cargo_bin("merge-failed")
        .unwrap()
        .args([
            summary.to_str().unwrap(),
            dir.path().join("S1_failed_assembly.tsv").to_str().unwrap(),
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&summary).unwrap();
    assert_eq!(
        content.lines().nth(1).unwrap(),
        "S1\trefB\trsv\tcomplete genome\t20.0"
    );
}

#[test]
fn test_merge_without_summary_header_fails() {
    let dir = tempfile::tempdir().unwrap();
    let summary = dir.path().join("run_summary.tsv");
    let failed = dir.path().join("failed.tsv");
    std::fs::write(&summary, "").unwrap();
    std::fs::write(&failed, "a\n1\n").unwrap();

    Command::cargo_bin("merge-failed")
        .unwrap()
        .args([summary.to_str().unwrap(), failed.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no header"));
}
