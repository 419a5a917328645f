// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use serde_json::json;
use yare::parameterized;

use super::testing::{TestContext, REPO};
use super::*;
use crate::state::LocalState;

#[parameterized(
    simple = { "me/data" },
    dashes = { "some-org/devhub-data" },
    dotted = { "me/data.backup" },
    padded = { "  me/data  " },
)]
fn test_parse_repository_accepts(input: &str) {
    assert_eq!(parse_repository(input).unwrap(), input.trim());
}

#[parameterized(
    empty = { "" },
    no_slash = { "data" },
    no_owner = { "/data" },
    no_name = { "me/" },
    nested = { "me/data/extra" },
    inner_space = { "me/my data" },
)]
fn test_parse_repository_rejects(input: &str) {
    assert!(matches!(
        parse_repository(input),
        Err(Error::InvalidRepository(_))
    ));
}

#[tokio::test]
async fn test_repository_prefers_override() {
    let mut t = TestContext::new().with_repository("me/old");
    t.ctx.repo_override = Some("me/new".to_string());
    assert_eq!(t.ctx.repository().unwrap(), "me/new");
}

#[tokio::test]
async fn test_repository_falls_back_to_last_used() {
    let t = TestContext::new().with_repository("me/old");
    assert_eq!(t.ctx.repository().unwrap(), "me/old");
}

#[tokio::test]
async fn test_repository_required() {
    let t = TestContext::new();
    assert!(matches!(
        t.ctx.repository(),
        Err(Error::NoRepositorySelected)
    ));
}

#[tokio::test]
async fn test_workspace_command_without_repository_makes_no_requests() {
    let mut t = TestContext::new();
    let err = t.run(&["workspace", "list"]).await.unwrap_err();
    assert!(matches!(err, Error::NoRepositorySelected));
    assert!(t.fake.requests().is_empty());
}

#[tokio::test]
async fn test_use_opens_and_remembers_repository() {
    let mut t = TestContext::new();
    t.run(&["use", REPO]).await.unwrap();

    assert_eq!(t.session.store().credentials().repository, REPO);
    assert_eq!(t.fake.file_names(REPO), vec!["default.json"]);
    assert_eq!(
        t.saved_state(),
        LocalState {
            last_repository: Some(REPO.to_string()),
            active_workspace: Some("default".to_string()),
        }
    );
}

#[tokio::test]
async fn test_use_rejects_malformed_repository() {
    let mut t = TestContext::new();
    let err = t.run(&["use", "data"]).await.unwrap_err();
    assert!(matches!(err, Error::InvalidRepository(_)));
    assert!(t.fake.requests().is_empty());
}

#[tokio::test]
async fn test_use_missing_repository_keeps_state() {
    let mut t = TestContext::new().with_repository(REPO);
    let err = t.run(&["use", "me/nope"]).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Store(dh_store::StoreError::RepositoryMissing { .. })
    ));
    assert_eq!(t.saved_state(), LocalState::default());
}

#[tokio::test]
async fn test_open_resumes_remembered_workspace() {
    let mut t = TestContext::new()
        .with_repository(REPO)
        .with_workspace("side");
    t.fake.put_file(REPO, "default.json", &json!({}));
    t.fake.put_file(REPO, "side.json", &json!({}));

    t.run(&["workspace", "list"]).await.unwrap();
    assert_eq!(t.session.active_workspace(), "side");
}

#[tokio::test]
async fn test_open_skips_vanished_workspace() {
    let mut t = TestContext::new()
        .with_repository(REPO)
        .with_workspace("gone");
    t.fake.put_file(REPO, "alpha.json", &json!({}));

    t.run(&["workspace", "list"]).await.unwrap();
    assert_eq!(t.session.active_workspace(), "alpha");
    assert!(t.fake.file_json(REPO, "gone.json").is_none());
}

#[tokio::test]
async fn test_override_ignores_workspace_from_other_repository() {
    let mut t = TestContext::new()
        .with_repository(REPO)
        .with_workspace("side");
    t.fake.add_repo("me/other");
    t.fake.put_file("me/other", "main.json", &json!({}));
    t.fake.put_file("me/other", "side.json", &json!({}));

    t.run(&["--repo", "me/other", "workspace", "list"])
        .await
        .unwrap();
    assert_eq!(t.session.active_workspace(), "main");
    assert_eq!(
        t.saved_state().last_repository.as_deref(),
        Some("me/other")
    );
}

#[tokio::test]
async fn test_workspace_create_remembers_new_workspace() {
    let mut t = TestContext::new().with_repository(REPO);
    t.run(&["workspace", "create", "side"]).await.unwrap();

    assert_eq!(
        t.saved_state().active_workspace.as_deref(),
        Some("side")
    );
    assert!(t.fake.file_json(REPO, "side.json").is_some());
}

#[tokio::test]
async fn test_failed_command_does_not_touch_state() {
    let mut t = TestContext::new().with_repository(REPO);
    t.fake.put_file(REPO, "default.json", &json!({}));
    t.fake.put_file(REPO, "side.json", &json!({}));

    let err = t.run(&["workspace", "create", "side"]).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));
    assert_eq!(t.saved_state(), LocalState::default());
}

#[tokio::test]
async fn test_import_reads_file_before_any_request() {
    let mut t = TestContext::new().with_repository(REPO);
    let missing = t.temp_path("missing.json");

    let err = t
        .run(&["import", missing.to_str().unwrap()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(t.fake.requests().is_empty());
}

#[tokio::test]
async fn test_repos_create_public_switches_to_it() {
    let mut t = TestContext::new();
    t.run(&["repos", "create", "notes", "--public"])
        .await
        .unwrap();

    assert!(t.fake.has_repo("me/notes"));
    let post = t
        .fake
        .requests()
        .into_iter()
        .find(|r| r.method == dh_store::Method::Post)
        .unwrap();
    assert_eq!(post.body.as_ref().unwrap()["private"], json!(false));
    assert_eq!(
        t.saved_state().last_repository.as_deref(),
        Some("me/notes")
    );
}

#[tokio::test]
async fn test_whoami_needs_no_repository() {
    let mut t = TestContext::new();
    t.run(&["whoami"]).await.unwrap();
    assert_eq!(t.fake.requests().len(), 1);
}
