use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const PRESENT_REQUEST: &str = "80 C0 01 0B 00 00 00 04 03 04 01 01 01 5A";

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("mldecode"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_capture(case: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(case)
        .join("input.txt")
}

fn sample_capture() -> std::path::PathBuf {
    golden_capture("mixed")
}

#[test]
fn help_supports_analyse_and_analyze() {
    cmd()
        .arg("capture")
        .arg("analyse")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("capture")
        .arg("analyze")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.txt");
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("analyze")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unsupported_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.pcapng");
    std::fs::write(&input, PRESENT_REQUEST).expect("write capture");

    cmd()
        .arg("capture")
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format").and(contains(".mlcap")));
}

#[test]
fn stdout_outputs_json() {
    let input = sample_capture();
    let assert = cmd()
        .arg("capture")
        .arg("analyze")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["tool"]["name"], "mldecode");
    assert_eq!(report["capture_summary"]["telegrams_total"], 10);
}

#[test]
fn drop_corrupt_omits_bad_checksums() {
    let input = sample_capture();
    let assert = cmd()
        .arg("capture")
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .arg("--drop-corrupt")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["capture_summary"]["telegrams_decoded"], 7);
}

#[test]
fn glob_input_resolves_single_match() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::copy(golden_capture("clean"), temp.path().join("only.mlcap")).expect("copy");
    let pattern = temp.path().join("*.mlcap");

    cmd()
        .arg("capture")
        .arg("analyse")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .success();
}

#[test]
fn glob_input_with_multiple_matches_fails() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::copy(golden_capture("clean"), temp.path().join("a.txt")).expect("copy");
    std::fs::copy(golden_capture("clean"), temp.path().join("b.txt")).expect("copy");
    let pattern = temp.path().join("*.txt");

    cmd()
        .arg("capture")
        .arg("analyse")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture();
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("analyze")
        .arg(input)
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture();
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("analyze")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture();
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("capture")
        .arg("analyse")
        .arg(input)
        .arg("-o")
        .arg(&report)
        .arg("--pretty")
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let text = std::fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["report_version"], 1);
}

#[test]
fn report_directories_are_created() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("a").join("b").join("report.json");

    cmd()
        .arg("capture")
        .arg("analyse")
        .arg(sample_capture())
        .arg("-o")
        .arg(&report)
        .arg("--quiet")
        .assert()
        .success();

    assert!(report.is_file());
}

#[test]
fn report_cannot_overwrite_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.txt");
    std::fs::copy(sample_capture(), &input).expect("copy capture");
    let before = std::fs::read_to_string(&input).expect("read capture");

    cmd()
        .arg("capture")
        .arg("analyse")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error: report path must differ from input"))
        .stderr(contains("hint: choose a different output path"));

    let after = std::fs::read_to_string(&input).expect("read capture");
    assert_eq!(before, after);
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture();
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("analyze")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::contains("OK:").not());
}

#[test]
fn list_violations_outputs_ids() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture();
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("analyze")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--list-violations")
        .assert()
        .success()
        .stderr(
            contains("Compliance violations:")
                .and(contains("masterlink ML-CHECKSUM (1)"))
                .and(contains("ML-METADATA-SURPRISE")),
        );
}

#[test]
fn strict_fails_when_violations_present() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture();
    let report = temp.path().join("report.json");

    cmd()
        .arg("capture")
        .arg("analyze")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--strict")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("compliance violations detected"));
}

#[test]
fn strict_passes_on_clean_capture() {
    cmd()
        .arg("capture")
        .arg("analyse")
        .arg(golden_capture("clean"))
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn decode_prints_rendering() {
    cmd()
        .arg("telegram")
        .arg("decode")
        .arg(PRESENT_REQUEST)
        .assert()
        .success()
        .stdout(contains("MASTER_PRESENT REQUEST V_MASTER -> ALL payload=[01 01 01]"))
        .stderr(contains("warning:").not());
}

#[test]
fn decode_accepts_split_hex_and_json() {
    let assert = cmd()
        .arg("telegram")
        .arg("decode")
        .arg("--json")
        .args(PRESENT_REQUEST.split(' '))
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(stdout.trim()).expect("valid json");
    assert_eq!(value["kind"], "master_present");
    assert_eq!(value["checksum_ok"], true);
    assert_eq!(value["bytes"], PRESENT_REQUEST);
}

#[test]
fn decode_warns_on_checksum_mismatch() {
    cmd()
        .arg("telegram")
        .arg("decode")
        .arg("80 C0 01 0B 00 00 00 04 03 04 01 01 01 5B")
        .assert()
        .success()
        .stdout(contains("MASTER_PRESENT"))
        .stderr(contains("warning: checksum mismatch: expected 0x5A, got 0x5B"));
}

#[test]
fn decode_fails_on_short_telegram() {
    cmd()
        .arg("telegram")
        .arg("decode")
        .arg("80 C0 01")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error: invalid telegram").and(contains("hint:")));
}

#[test]
fn decode_fails_on_bad_hex() {
    cmd()
        .arg("telegram")
        .arg("decode")
        .arg("80 CZ")
        .assert()
        .failure()
        .stderr(contains("invalid hex telegram"));
}

#[test]
fn build_goto_source_by_name() {
    cmd()
        .arg("telegram")
        .arg("build")
        .arg("goto-source")
        .arg("--source")
        .arg("DVD")
        .assert()
        .success()
        .stdout("C0 C2 01 0A 00 00 00 45 04 01 02 29 00 00 02\n");
}

#[test]
fn build_audio_bus_request() {
    cmd()
        .arg("telegram")
        .arg("build")
        .arg("audio-bus-request")
        .assert()
        .success()
        .stdout("C1 C2 01 0B 00 00 00 08 00 01 98\n");
}

#[test]
fn build_requires_source() {
    cmd()
        .arg("telegram")
        .arg("build")
        .arg("track-info")
        .assert()
        .failure()
        .stderr(contains("track-info needs --source").and(contains("hint:")));
}

#[test]
fn build_accepts_source_code() {
    let assert = cmd()
        .arg("telegram")
        .arg("build")
        .arg("status-info")
        .arg("--source")
        .arg("0x8D")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let bytes: Vec<&str> = stdout.trim().split(' ').collect();
    assert_eq!(bytes.len(), 10 + 29 + 1);
    assert_eq!(bytes[7], "87");
    assert_eq!(bytes[10], "8D");
}

#[test]
fn reply_answers_presence_request() {
    cmd()
        .arg("telegram")
        .arg("reply")
        .arg(PRESENT_REQUEST)
        .assert()
        .success()
        .stdout("C0 C2 01 14 00 00 00 04 03 04 01 01 01 A5\n");
}

#[test]
fn reply_rejects_other_telegrams() {
    cmd()
        .arg("telegram")
        .arg("reply")
        .arg("C0 C1 01 0A 00 00 00 45 04 01 02 29 00 00 01")
        .assert()
        .failure()
        .stderr(contains("not a MASTER_PRESENT request"));
}
