// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the fake server itself, so store tests can rely on its guards.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

fn put(fake: &FakeGitHub, sha: Option<&str>) -> ApiResponse {
    let mut body = json!({ "message": "m", "content": STANDARD.encode("{}") });
    if let Some(sha) = sha {
        body["sha"] = json!(sha);
    }
    let request = ApiRequest::new(Method::Put, "/repos/me/data/contents/a.json", "t").with_body(body);
    fake.handle(request).unwrap()
}

#[test]
fn test_put_requires_current_sha() {
    let fake = FakeGitHub::new("me").with_repo("me/data");

    let created = put(&fake, None);
    assert_eq!(created.status, 201);
    let sha = created.body["content"]["sha"].as_str().unwrap().to_string();

    assert_eq!(put(&fake, None).status, 422);
    assert_eq!(put(&fake, Some("stale")).status, 409);
    assert_eq!(put(&fake, Some(&sha)).status, 200);
}

#[test]
fn test_empty_repository_listing_is_404() {
    let fake = FakeGitHub::new("me").with_repo("me/data");
    let request = ApiRequest::new(Method::Get, "/repos/me/data/contents", "t");
    let response = fake.handle(request).unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(response.message(), Some("This repository is empty."));
}

#[test]
fn test_file_content_is_wrapped() {
    let fake = FakeGitHub::new("me").with_repo("me/data");
    let big = json!({ "text": "x".repeat(200) });
    fake.put_file("me/data", "big.json", &big);

    let request = ApiRequest::new(Method::Get, "/repos/me/data/contents/big.json", "t");
    let response = fake.handle(request).unwrap();
    let content = response.body["content"].as_str().unwrap();
    assert!(content.lines().count() > 1);
    assert!(content.lines().all(|line| line.len() <= 60));
}

#[test]
fn test_fault_is_consumed_once() {
    let fake = FakeGitHub::new("me").with_repo("me/data");
    fake.fail_next(Method::Get, 503, "Service Unavailable");

    let request = ApiRequest::new(Method::Get, "/repos/me/data", "t");
    assert_eq!(fake.handle(request.clone()).unwrap().status, 503);
    assert_eq!(fake.handle(request).unwrap().status, 200);
}

#[test]
fn test_path_scoped_fault_skips_other_paths() {
    let fake = FakeGitHub::new("me").with_repo("me/data");
    fake.fail_next_on(Method::Get, "/contents/", 500, "boom");

    let repo = ApiRequest::new(Method::Get, "/repos/me/data", "t");
    assert_eq!(fake.handle(repo).unwrap().status, 200);

    let file = ApiRequest::new(Method::Get, "/repos/me/data/contents/a.json", "t");
    assert_eq!(fake.handle(file).unwrap().status, 500);
}

#[test]
fn test_required_token() {
    let fake = FakeGitHub::new("me");
    fake.require_token("good");

    let bad = ApiRequest::new(Method::Get, "/user", "bad");
    assert_eq!(fake.handle(bad).unwrap().status, 401);
    let good = ApiRequest::new(Method::Get, "/user", "good");
    assert_eq!(fake.handle(good).unwrap().body["login"], "me");
}

#[test]
fn test_query_string_is_ignored_for_routing() {
    let fake = FakeGitHub::new("me").with_repo("me/data");
    let request = ApiRequest::new(Method::Get, "/user/repos?per_page=100&sort=updated", "t");
    let response = fake.handle(request).unwrap();
    assert_eq!(response.body[0]["full_name"], "me/data");
}
