//! Unit tests for the history record codec.

use rstest::rstest;

use copyme::services::codec::{decode, encode, FORMAT_VERSION};
use copyme::types::clip::ClipItem;
use copyme::types::errors::DecodeError;

fn sample() -> Vec<ClipItem> {
    vec![
        ClipItem::new("1718000000002", "second"),
        ClipItem::new("1718000000001", "multi\nline \"quoted\" ✂"),
    ]
}

#[test]
fn test_roundtrip_preserves_order_and_content() {
    let items = sample();
    assert_eq!(decode(&encode(&items)).unwrap(), items);
}

#[test]
fn test_roundtrip_empty() {
    assert_eq!(decode(&encode(&[])).unwrap(), Vec::<ClipItem>::new());
}

#[test]
fn test_encode_is_deterministic() {
    assert_eq!(encode(&sample()), encode(&sample()));
}

#[test]
fn test_encode_carries_version_tag() {
    let value: serde_json::Value = serde_json::from_str(&encode(&sample())).unwrap();
    assert_eq!(value["version"], FORMAT_VERSION);
    assert_eq!(value["items"].as_array().unwrap().len(), 2);
}

#[test]
fn test_decode_legacy_persist_layout() {
    let raw = r#"{"state":{"history":[{"id":"2","text":"b"},{"id":"1","text":"a"}]},"version":0}"#;
    assert_eq!(
        decode(raw).unwrap(),
        vec![ClipItem::new("2", "b"), ClipItem::new("1", "a")]
    );
}

#[test]
fn test_decode_rejects_unknown_version() {
    let raw = r#"{"version":9,"items":[]}"#;
    assert_eq!(decode(raw), Err(DecodeError::UnsupportedVersion(9)));
}

#[test]
fn test_decode_rejects_duplicate_ids() {
    let raw = r#"{"version":1,"items":[{"id":"1","text":"a"},{"id":"1","text":"b"}]}"#;
    assert_eq!(decode(raw), Err(DecodeError::DuplicateId("1".to_string())));
}

/// Every malformed shape is rejected as a whole, never partially accepted.
#[rstest]
#[case::not_json("not json at all")]
#[case::truncated(r#"{"version":1,"items":[{"id":"1","#)]
#[case::empty_string("")]
#[case::bare_array(r#"[{"id":"1","text":"a"}]"#)]
#[case::null("null")]
#[case::missing_version(r#"{"items":[]}"#)]
#[case::string_version(r#"{"version":"1","items":[]}"#)]
#[case::missing_items(r#"{"version":1}"#)]
#[case::items_is_object(r#"{"version":1,"items":{"id":"1","text":"a"}}"#)]
#[case::item_is_string(r#"{"version":1,"items":["hello"]}"#)]
#[case::item_missing_text(r#"{"version":1,"items":[{"id":"1"}]}"#)]
#[case::item_missing_id(r#"{"version":1,"items":[{"text":"a"}]}"#)]
#[case::numeric_id(r#"{"version":1,"items":[{"id":1,"text":"a"}]}"#)]
#[case::null_text(r#"{"version":1,"items":[{"id":"1","text":null}]}"#)]
#[case::one_bad_among_good(r#"{"version":1,"items":[{"id":"1","text":"a"},{"id":"2"}]}"#)]
#[case::legacy_without_state(r#"{"version":0,"history":[]}"#)]
#[case::legacy_history_not_array(r#"{"state":{"history":"oops"},"version":0}"#)]
fn test_decode_rejects_malformed(#[case] raw: &str) {
    let result = decode(raw);
    assert!(
        matches!(result, Err(DecodeError::Malformed(_))),
        "expected Malformed for {:?}, got {:?}",
        raw,
        result
    );
}
