// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use serde_json::json;

fn file(content: &str, encoding: Option<&str>) -> FileContents {
    FileContents {
        sha: "abc".to_string(),
        content: content.to_string(),
        encoding: encoding.map(str::to_string),
    }
}

#[test]
fn test_decode_wrapped_base64() {
    // "{\"foo\": \"héllo\"}" split across lines the way GitHub returns it
    let encoded = STANDARD.encode("{\"foo\": \"héllo\"}");
    let wrapped = format!("{}\n{}\n", &encoded[..8], &encoded[8..]);
    let text = file(&wrapped, Some("base64")).decode_text().unwrap();
    assert_eq!(text, "{\"foo\": \"héllo\"}");
}

#[test]
fn test_decode_rejects_unknown_encoding() {
    let err = file("", Some("none")).decode_text().unwrap_err();
    assert!(err.contains("unsupported encoding"));
}

#[test]
fn test_decode_rejects_invalid_base64() {
    assert!(file("!!!", Some("base64")).decode_text().is_err());
}

#[test]
fn test_decode_rejects_invalid_utf8() {
    let encoded = STANDARD.encode([0xff, 0xfe]);
    assert!(file(&encoded, None).decode_text().is_err());
}

#[test]
fn test_put_request_omits_missing_sha() {
    let create = PutContentsRequest::new("Create".to_string(), "{}", None);
    let value = serde_json::to_value(&create).unwrap();
    assert_eq!(value, json!({ "message": "Create", "content": "e30=" }));

    let update = PutContentsRequest::new("Update".to_string(), "{}", Some("s1".into()));
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value["sha"], "s1");
}

#[test]
fn test_content_entry_types() {
    let entries: Vec<ContentEntry> = serde_json::from_value(json!([
        { "name": "a.json", "type": "file" },
        { "name": "docs", "type": "dir" },
        { "name": "b.json" },
    ]))
    .unwrap();
    let files: Vec<_> = entries.iter().filter(|e| e.is_file()).map(|e| &e.name).collect();
    assert_eq!(files, ["a.json", "b.json"]);
}

#[test]
fn test_user_profile_optional_fields() {
    let user: UserProfile = serde_json::from_value(json!({ "login": "octo" })).unwrap();
    assert_eq!(user.login, "octo");
    assert_eq!(user.name, None);
}
