// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn repo(full_name: &str, private: bool) -> RepositorySummary {
    RepositorySummary {
        name: full_name.rsplit('/').next().unwrap_or_default().to_string(),
        full_name: full_name.to_string(),
        private,
    }
}

#[test]
fn test_format_user_with_display_name() {
    let user = UserProfile {
        login: "octo".to_string(),
        name: Some("Octo Cat".to_string()),
        avatar_url: None,
    };
    assert_eq!(format_user(&user), "octo (Octo Cat)");
}

#[test]
fn test_format_user_login_only() {
    let user = UserProfile {
        login: "octo".to_string(),
        name: Some(String::new()),
        avatar_url: None,
    };
    assert_eq!(format_user(&user), "octo");
}

#[test]
fn test_format_repositories_marks_current() {
    let repos = vec![repo("me/data", true), repo("me/site", false)];
    similar_asserts::assert_eq!(
        format_repositories(&repos, Some("me/data")),
        vec!["* me/data (private)".to_string(), "  me/site".to_string()]
    );
}

#[test]
fn test_format_repositories_without_current() {
    let repos = vec![repo("me/data", true)];
    assert_eq!(
        format_repositories(&repos, None),
        vec!["  me/data (private)".to_string()]
    );
}
