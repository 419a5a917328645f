// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    simple = { "default" },
    with_dash = { "side-project" },
    with_space = { "my notes" },
    unicode = { "проект" },
    inner_dot = { "v1.2" },
)]
fn test_valid_names(name: &str) {
    assert!(validate_document_name(name).is_ok());
}

#[parameterized(
    empty = { "" },
    blank = { "   " },
    slash = { "a/b" },
    backslash = { "a\\b" },
    hidden = { ".secret" },
    control = { "tab\there" },
    suffixed = { "notes.json" },
)]
fn test_invalid_names(name: &str) {
    let err = validate_document_name(name).unwrap_err();
    assert!(matches!(err, Error::InvalidDocumentName { .. }));
}

#[test]
fn test_name_too_long() {
    let name = "x".repeat(MAX_NAME_LEN + 1);
    assert!(validate_document_name(&name).is_err());
    assert!(validate_document_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
}

#[test]
fn test_file_name_round_trip() {
    assert_eq!(document_file_name("work"), "work.json");
    assert_eq!(document_name_from_file("work.json"), Some("work"));
}

#[parameterized(
    readme = { "README.md" },
    bare_suffix = { ".json" },
    json_in_middle = { "a.json.bak" },
)]
fn test_non_document_files(file_name: &str) {
    assert_eq!(document_name_from_file(file_name), None);
}

#[test]
fn test_strips_only_the_trailing_suffix() {
    assert_eq!(document_name_from_file("a.json.json"), Some("a.json"));
}
