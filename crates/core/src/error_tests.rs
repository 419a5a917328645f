// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

#[test]
fn test_invalid_name_display() {
    let err = Error::InvalidDocumentName {
        name: "a/b".to_string(),
        reason: "must not contain path separators",
    };
    assert_eq!(
        err.to_string(),
        "invalid document name 'a/b': must not contain path separators"
    );
}

#[test]
fn test_not_an_object_has_hint() {
    let msg = Error::NotAnObject.to_string();
    assert!(msg.contains("not a JSON object"));
    assert!(msg.contains("hint:"));
}

#[test]
fn test_json_error_converts() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = parse_err.into();
    assert!(err.to_string().starts_with("json error:"));
}
