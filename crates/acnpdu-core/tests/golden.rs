use std::fs;
use std::path::{Path, PathBuf};

use acnpdu_core::{FrameReport, MessageSpec, decode_frame, encode_message, encode_message_stacked};

fn case_dir(dir: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(dir)
}

fn load_expected_report(dir: &str) -> FrameReport {
    let expected_path = case_dir(dir).join("expected_report.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn load_frame(dir: &str) -> Vec<u8> {
    let text = fs::read_to_string(case_dir(dir).join("frame.hex")).expect("read frame.hex");
    let compact: String = text.split_whitespace().collect();
    hex::decode(compact).expect("decode frame.hex")
}

fn load_message(dir: &str) -> MessageSpec {
    let json = fs::read_to_string(case_dir(dir).join("message.json")).expect("read message.json");
    serde_json::from_str(&json).expect("parse message.json")
}

fn run_golden(dir: &str) {
    let message = load_message(dir);
    let frame = load_frame(dir);
    let expected = load_expected_report(dir);

    let encoded = encode_message(&message).expect("encode message");
    assert_eq!(&encoded[..], &frame[..], "encoded frame mismatch in {dir}");
    let stacked = encode_message_stacked(&message).expect("encode message on stack");
    assert_eq!(encoded, stacked, "stacked frame mismatch in {dir}");

    let mut actual = decode_frame(&frame).expect("decode frame");
    actual.tool.version = expected.tool.version.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_rdm_get() {
    run_golden("tests/golden/rdm_get");
}

#[test]
fn golden_status() {
    run_golden("tests/golden/status");
}

#[test]
fn golden_controller_empty() {
    run_golden("tests/golden/controller_empty");
}

#[test]
fn golden_unknown_vector() {
    run_golden("tests/golden/unknown_vector");
}

#[test]
fn golden_long_source() {
    run_golden("tests/golden/long_source");
}

#[test]
fn golden_extended_length() {
    run_golden("tests/golden/extended_length");
}

#[test]
fn golden_unknown_vector_is_counted() {
    let report = load_expected_report("tests/golden/unknown_vector");
    assert_eq!(report.unknown_vectors, 1);
    assert_eq!(report.layers[0].children[0].vector_name, None);
}

#[test]
fn golden_long_source_is_truncated() {
    let report = load_expected_report("tests/golden/long_source");
    let e133 = &report.layers[0].children[0];
    match &e133.header {
        Some(acnpdu_core::HeaderReport::E133 { source, .. }) => assert_eq!(source.len(), 64),
        other => panic!("unexpected header: {other:?}"),
    }
}

#[test]
fn golden_extended_length_uses_three_byte_field() {
    let frame = load_frame("tests/golden/extended_length");
    assert_eq!(frame[16] & 0xF0, 0xF0);
    let report = load_expected_report("tests/golden/extended_length");
    assert!(report.layers[0].length > 0x0FFF);
}
