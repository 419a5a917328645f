// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

// Each test uses its own variable names so parallel tests don't race.

#[test]
fn test_vars_constants() {
    assert_eq!(vars::DEVHUB_CONFIG_DIR, "DEVHUB_CONFIG_DIR");
    assert_eq!(vars::DEVHUB_STATE_DIR, "DEVHUB_STATE_DIR");
    assert_eq!(vars::XDG_STATE_HOME, "XDG_STATE_HOME");
    assert_eq!(vars::NO_COLOR, "NO_COLOR");
    assert_eq!(vars::COLOR, "COLOR");
    assert_eq!(vars::DEFAULT_TOKEN_VAR, "GITHUB_TOKEN");
}

#[test]
fn test_token_unset() {
    std::env::remove_var("DEVHUB_TEST_TOKEN_UNSET");
    assert_eq!(token("DEVHUB_TEST_TOKEN_UNSET"), None);
}

#[test]
fn test_token_trimmed() {
    std::env::set_var("DEVHUB_TEST_TOKEN_TRIM", "  ghp_abc\n");
    assert_eq!(token("DEVHUB_TEST_TOKEN_TRIM").as_deref(), Some("ghp_abc"));
    std::env::remove_var("DEVHUB_TEST_TOKEN_TRIM");
}

#[test]
fn test_token_blank_is_unset() {
    std::env::set_var("DEVHUB_TEST_TOKEN_BLANK", "   ");
    assert_eq!(token("DEVHUB_TEST_TOKEN_BLANK"), None);
    std::env::remove_var("DEVHUB_TEST_TOKEN_BLANK");
}
