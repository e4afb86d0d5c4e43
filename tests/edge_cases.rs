//! Edge case tests for loading and rendering.

use chatview::prelude::*;
use chatview::view::{LegacyBody, V2Payload};

fn utc() -> ViewConfig {
    ViewConfig::new().with_time_zone(TimeZoneSetting::Utc)
}

fn render_one(json: &str) -> Rendered {
    let records = load(json.as_bytes()).unwrap();
    render_records(&records, &utc())
}

// =========================================================================
// Loader
// =========================================================================

#[test]
fn test_empty_messages_array() {
    let mut timeline = Timeline::new(utc());
    let stats = timeline.load_bytes(br#"{"messages": []}"#).unwrap();

    assert_eq!(stats.total, 0);
    assert!(timeline.is_empty());
    assert_eq!(timeline.to_text(), "");
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = load(br#"{"messages": [ {"sender_name": "A""#).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_invalid_utf8_is_parse_error() {
    let err = load(&[b'{', 0xFF, 0xFE, b'}']).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_missing_messages_field() {
    let err = load(br#"{"participants": [{"name": "A"}]}"#).unwrap_err();
    assert!(err.is_invalid_format());
    assert!(err.to_string().contains("messages"));
}

#[test]
fn test_messages_field_not_an_array() {
    let err = load(br#"{"messages": {"0": {}}}"#).unwrap_err();
    assert!(err.is_invalid_format());
}

#[test]
fn test_top_level_array_rejected() {
    let err = load(br#"[{"sender_name": "A", "timestamp_ms": 0}]"#).unwrap_err();
    assert!(err.is_invalid_format());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_path("/definitely/not/here/message_1.json").unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_parse_error_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_path(&path).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("broken.json"));
}

// =========================================================================
// Detection
// =========================================================================

#[test]
fn test_non_object_records_are_unknown() {
    let rendered = render_one(r#"{"messages": [null, 1, "text", [], true]}"#);
    assert_eq!(rendered.stats.unknown, 5);
    assert!(rendered.fragments.is_empty());
}

#[test]
fn test_legacy_key_with_bad_fields_is_invalid() {
    let rendered = render_one(
        r#"{"messages": [
            {"sender_name": "A"},
            {"sender_name": 5, "timestamp_ms": 0},
            {"sender_name": "B", "timestamp_ms": 0}
        ]}"#,
    );

    assert_eq!(rendered.stats.invalid, 2);
    assert_eq!(rendered.fragments.len(), 1);
    assert_eq!(rendered.fragments[0].key, 2);
}

#[test]
fn test_v2_unrecognized_type_is_invalid() {
    let rendered = render_one(
        r#"{"messages": [
            {"senderName": "A", "timestamp": 0, "type": "sticker"},
            {"senderName": "B", "timestamp": 0, "kind": "media"}
        ]}"#,
    );

    assert_eq!(rendered.stats.invalid, 1);
    assert_eq!(rendered.stats.v2, 1);
}

#[test]
fn test_v2_null_optional_fields_still_render() {
    for field in ["reactions", "media", "text", "isUnsent"] {
        let mut record = serde_json::json!({
            "senderName": "A", "timestamp": 1609848000000i64, "type": "text", "text": "hi"
        });
        record[field] = serde_json::Value::Null;

        let rendered = render_records(&[record], &utc());
        assert_eq!(rendered.stats.invalid, 0, "null {field} dropped the record");
        assert_eq!(rendered.stats.v2, 1);
    }
}

#[test]
fn test_legacy_ignored_or_loose_fields_still_render() {
    let records = load(
        br#"{"messages": [
            {"sender_name": "A", "timestamp_ms": 1609848000000, "content": "x", "is_geoblocked_for_viewer": null},
            {"sender_name": "A", "timestamp_ms": 1609848000000, "content": "x", "share": "https://x"},
            {"sender_name": "A", "timestamp_ms": 1609848000000, "content": "x", "share": {"link": 5}},
            {"sender_name": "A", "timestamp_ms": 1609848000000, "content": "x", "is_unsent": 0},
            {"sender_name": "A", "timestamp_ms": 1609848000000.0, "content": "x"}
        ]}"#,
    )
    .unwrap();

    let rendered = render_records(&records, &utc());

    assert_eq!(rendered.stats.invalid, 0);
    assert_eq!(rendered.stats.legacy, 5);
    for fragment in &rendered.fragments {
        assert_eq!(fragment.to_string(), "Sent: A\nDate: 2021.01.05\nx\n");
    }
}

// =========================================================================
// Legacy rendering
// =========================================================================

#[test]
fn test_zero_call_duration_is_not_a_call() {
    let rendered = render_one(
        r#"{"messages": [{"sender_name": "A", "timestamp_ms": 0, "content": "hi", "call_duration": 0}]}"#,
    );
    assert!(!rendered.fragments[0].is_call());
}

#[test]
fn test_call_without_content() {
    let rendered = render_one(
        r#"{"messages": [{"sender_name": "A", "timestamp_ms": 0, "call_duration": 45}]}"#,
    );
    assert_eq!(
        rendered.fragments[0].to_string(),
        "Sent: A\nDate: 1970.01.01\nCall: 📞 45 seconds\n"
    );
}

#[test]
fn test_empty_sequences_show_no_icons() {
    let rendered = render_one(
        r#"{"messages": [{"sender_name": "A", "timestamp_ms": 0,
            "photos": [], "gifs": [], "reactions": [], "videos": []}]}"#,
    );
    assert_eq!(rendered.fragments[0].body, Body::Legacy(LegacyBody::default()));
}

#[test]
fn test_empty_content_string_is_kept() {
    let rendered = render_one(
        r#"{"messages": [{"sender_name": "A", "timestamp_ms": 0, "content": ""}]}"#,
    );
    assert_eq!(
        rendered.fragments[0].body,
        Body::Legacy(LegacyBody {
            text: Some(String::new()),
            icons: vec![]
        })
    );
}

#[test]
fn test_mojibake_repair_toggle() {
    let mojibake: String = "Привет".bytes().map(char::from).collect();
    let json = serde_json::json!({
        "messages": [{"sender_name": mojibake, "timestamp_ms": 0, "content": mojibake}]
    })
    .to_string();

    let records = load(json.as_bytes()).unwrap();

    let fixed = render_records(&records, &utc());
    assert_eq!(fixed.fragments[0].sender, "Привет");

    let raw = render_records(&records, &utc().with_fix_encoding(false));
    assert_eq!(raw.fragments[0].sender, mojibake);
}

#[test]
fn test_unicode_text_untouched_by_repair() {
    let rendered = render_one(
        r#"{"messages": [{"sender_name": "Zoë", "timestamp_ms": 0, "content": "日本語 👍 café"}]}"#,
    );
    assert_eq!(
        rendered.fragments[0].body,
        Body::Legacy(LegacyBody {
            text: Some("日本語 👍 café".to_string()),
            icons: vec![]
        })
    );
}

#[test]
fn test_out_of_range_timestamp_shows_unknown_date() {
    let rendered = render_one(
        r#"{"messages": [{"sender_name": "A", "timestamp_ms": 9223372036854775807}]}"#,
    );
    assert_eq!(rendered.fragments[0].date_label(), "unknown");
}

#[test]
fn test_negative_timestamp_before_epoch() {
    let rendered = render_one(r#"{"messages": [{"sender_name": "A", "timestamp_ms": -1}]}"#);
    assert_eq!(rendered.fragments[0].date_label(), "1969.12.31");
}

// =========================================================================
// V2 rendering
// =========================================================================

#[test]
fn test_v2_media_ignores_text() {
    let rendered = render_one(
        r#"{"messages": [{"senderName": "A", "timestamp": 0, "type": "media",
            "text": "caption", "media": [{"uri": "x"}]}]}"#,
    );
    match &rendered.fragments[0].body {
        Body::V2(body) => assert_eq!(body.payload, V2Payload::Media),
        other => panic!("expected V2 body, got {other:?}"),
    }
}

#[test]
fn test_v2_fractional_timestamp_truncated() {
    // 1 ms before 2021-01-05T00:00:00Z, plus a fraction
    let rendered = render_one(
        r#"{"messages": [{"senderName": "A", "timestamp": 1609804799999.9, "type": "text"}]}"#,
    );
    assert_eq!(rendered.fragments[0].date_label(), "2021.01.04");
}

#[test]
fn test_v2_text_is_never_repaired() {
    let mojibake: String = "é".bytes().map(char::from).collect();
    let json = serde_json::json!({
        "messages": [{"senderName": "A", "timestamp": 0, "type": "text", "text": mojibake}]
    })
    .to_string();

    let records = load(json.as_bytes()).unwrap();
    let rendered = render_records(&records, &utc());

    match &rendered.fragments[0].body {
        Body::V2(body) => assert_eq!(body.payload, V2Payload::Text(mojibake)),
        other => panic!("expected V2 body, got {other:?}"),
    }
}

#[test]
fn test_date_depends_on_time_zone() {
    // 2021-01-05T02:00:00Z
    let json = br#"{"messages": [{"sender_name": "A", "timestamp_ms": 1609812000000}]}"#;
    let records = load(json).unwrap();

    let east = ViewConfig::new().with_time_zone("+05:30".parse().unwrap());
    let west = ViewConfig::new().with_time_zone("-05:00".parse().unwrap());

    assert_eq!(render_records(&records, &east).fragments[0].date_label(), "2021.01.05");
    assert_eq!(render_records(&records, &west).fragments[0].date_label(), "2021.01.04");
}
