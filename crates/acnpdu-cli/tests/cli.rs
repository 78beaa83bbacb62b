use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("acnpdu"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_case(name: &str) -> std::path::PathBuf {
    repo_root().join("tests").join("golden").join(name)
}

fn read_json(path: &std::path::Path) -> Value {
    let text = fs::read_to_string(path).expect("read json");
    serde_json::from_str(&text).expect("valid json")
}

#[test]
fn help_lists_frame_commands() {
    cmd()
        .arg("frame")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("encode").and(contains("decode")));
}

#[test]
fn version_includes_build_info() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")).and(contains("(")));
}

#[test]
fn encode_matches_golden_frame() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("frame.hex");

    cmd()
        .arg("frame")
        .arg("encode")
        .arg(golden_case("rdm_get").join("message.json"))
        .arg("-o")
        .arg(&output)
        .arg("--hex")
        .assert()
        .success()
        .stderr(contains("OK: frame written"));

    let expected = fs::read_to_string(golden_case("rdm_get").join("frame.hex")).expect("read");
    let actual = fs::read_to_string(&output).expect("read output");
    assert_eq!(actual.trim(), expected.trim());
}

#[test]
fn encode_binary_round_trips_through_decode() {
    let temp = TempDir::new().expect("tempdir");
    let frame = temp.path().join("frame.bin");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("frame")
        .arg("encode")
        .arg(golden_case("status").join("message.json"))
        .arg("-o")
        .arg(&frame)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(&frame)
        .arg("-o")
        .arg(&report)
        .assert()
        .success();

    let value = read_json(&report);
    let expected = read_json(&golden_case("status").join("expected_report.json"));
    assert_eq!(value["layers"], expected["layers"]);
    assert_eq!(value["input"]["bytes"], expected["frame_bytes"]);
}

#[test]
fn encode_stdout_prints_hex() {
    let assert = cmd()
        .arg("frame")
        .arg("encode")
        .arg(golden_case("unknown_vector").join("message.json"))
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let expected =
        fs::read_to_string(golden_case("unknown_vector").join("frame.hex")).expect("read");
    assert_eq!(stdout.trim(), expected.trim());
}

#[test]
fn decode_stdout_outputs_json() {
    let assert = cmd()
        .arg("frame")
        .arg("decode")
        .arg(golden_case("rdm_get").join("frame.hex"))
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["unknown_vectors"], 0);
    assert_eq!(value["layers"][0]["children"][0]["children"][0]["layer"], "rdm");
}

#[test]
fn decode_hex_flag_reads_text_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("frame.txt");
    fs::copy(golden_case("status").join("frame.hex"), &input).expect("copy");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(&input)
        .arg("--hex")
        .arg("--stdout")
        .assert()
        .success()
        .stdout(contains("\"STATUS\""));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");
    let report = temp.path().join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn malformed_frame_fails() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("frame.bin");
    let frame = fs::read_to_string(golden_case("status").join("frame.hex")).expect("read");
    let mut bytes = hex::decode(frame.trim()).expect("hex");
    bytes.truncate(bytes.len() - 3);
    fs::write(&input, bytes).expect("write");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("frame decoding failed").and(contains("malformed PDU length")));
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(golden_case("status").join("frame.hex"))
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
    let report = temp.path().join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(golden_case("status").join("frame.hex"))
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn strict_fails_when_unknown_vectors_present() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(golden_case("unknown_vector").join("frame.hex"))
        .arg("-o")
        .arg(&report)
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(contains("unknown vectors detected"));
    assert!(report.exists());
}

#[test]
fn strict_passes_on_known_vectors() {
    cmd()
        .arg("frame")
        .arg("decode")
        .arg(golden_case("rdm_get").join("frame.hex"))
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("frame.hex");
    fs::copy(golden_case("status").join("frame.hex"), &input).expect("copy");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(contains("must differ from input"));
}

#[test]
fn glob_with_single_match_is_accepted() {
    let temp = TempDir::new().expect("tempdir");
    fs::copy(
        golden_case("status").join("frame.hex"),
        temp.path().join("only.hex"),
    )
    .expect("copy");
    let pattern = temp.path().join("*.hex");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .success();
}

#[test]
fn glob_with_multiple_matches_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    for name in ["a.hex", "b.hex"] {
        fs::copy(golden_case("status").join("frame.hex"), temp.path().join(name)).expect("copy");
    }
    let pattern = temp.path().join("*.hex");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn invalid_message_shows_hint() {
    let temp = TempDir::new().expect("tempdir");
    let message = temp.path().join("message.json");
    fs::write(&message, r#"{"cid":"not-a-cid"}"#).expect("write");

    cmd()
        .arg("frame")
        .arg("encode")
        .arg(&message)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("invalid CID").and(contains("hint:")));
}

#[test]
fn log_flag_enables_debug_output() {
    cmd()
        .env_remove("RUST_LOG")
        .arg("--log")
        .arg("debug")
        .arg("frame")
        .arg("decode")
        .arg(golden_case("unknown_vector").join("frame.hex"))
        .arg("--stdout")
        .assert()
        .success()
        .stderr(contains("unknown vector"));
}

#[test]
fn bad_preamble_is_named_in_error() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("frame.bin");
    let frame = fs::read_to_string(golden_case("status").join("frame.hex")).expect("read");
    let mut bytes = hex::decode(frame.trim()).expect("hex");
    bytes[4] = b'X';
    fs::write(&input, bytes).expect("write");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("UDP preamble: invalid ACN preamble"));
}

#[test]
fn invalid_log_filter_fails() {
    cmd()
        .env_remove("RUST_LOG")
        .arg("--log")
        .arg("acnpdu=loud")
        .arg("frame")
        .arg("decode")
        .arg(golden_case("status").join("frame.hex"))
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("invalid log filter"));
}
