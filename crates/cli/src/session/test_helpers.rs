// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared setup for session tests.

use std::time::Duration;

use dh_core::workspace::Note;
use dh_store::testing::FakeGitHub;
use dh_store::{Credentials, GitHubStore, Method, StoreOptions};

use super::{Session, SessionOptions};

pub const REPO: &str = "me/data";

pub fn fake() -> FakeGitHub {
    FakeGitHub::new("me").with_repo(REPO)
}

pub fn session_on(fake: &FakeGitHub, options: SessionOptions) -> Session<FakeGitHub> {
    let store = GitHubStore::new(
        fake.clone(),
        Credentials::new("token", REPO),
        StoreOptions::default(),
    );
    Session::new(store, options)
}

/// Fake repository and a session on it with default timings.
pub fn setup() -> (FakeGitHub, Session<FakeGitHub>) {
    let fake = fake();
    let session = session_on(&fake, SessionOptions::default());
    (fake, session)
}

pub fn note(id: &str) -> Note {
    Note {
        id: id.to_string(),
        name: format!("Note {}", id),
        content: format!("# {}", id),
        ..Note::default()
    }
}

pub fn add_note(session: &Session<FakeGitHub>, id: &str) {
    session.update(|doc| doc.notes.push(note(id)));
}

/// Ids of the notes in a stored workspace file.
pub fn stored_notes(fake: &FakeGitHub, workspace: &str) -> Vec<String> {
    let Some(value) = fake.file_json(REPO, &format!("{}.json", workspace)) else {
        return Vec::new();
    };
    value["notes"]
        .as_array()
        .map(|notes| {
            notes
                .iter()
                .filter_map(|n| n["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub fn puts(fake: &FakeGitHub) -> usize {
    fake.count(Method::Put)
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
