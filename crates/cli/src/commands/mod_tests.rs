// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Test infrastructure for running commands against a fake GitHub.
//!
//! `TestContext` wires a [`Session`] over [`FakeGitHub`] to a [`Context`]
//! whose config and state live in a temp directory, so commands run
//! in-process without a token or network.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::commands::testing::TestContext;
//!
//! #[tokio::test]
//! async fn test_some_command() {
//!     let mut ctx = TestContext::new().with_repository(REPO);
//!     ctx.run(&["workspace", "create", "side"]).await.unwrap();
//! }
//! ```

use std::time::Duration;

use clap::Parser;
use dh_store::testing::FakeGitHub;
use dh_store::{Credentials, GitHubStore, StoreOptions};
use tempfile::TempDir;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::session::{Session, SessionOptions};
use crate::state::LocalState;

use super::{execute, Context};

pub const REPO: &str = "me/data";

pub struct TestContext {
    pub fake: FakeGitHub,
    pub session: Session<FakeGitHub>,
    pub ctx: Context,
    temp_dir: TempDir,
}

impl TestContext {
    /// A fake account `me` owning an empty `me/data`, and a session that has
    /// not opened any repository. Must run inside a tokio runtime.
    pub fn new() -> Self {
        let fake = FakeGitHub::new("me").with_repo(REPO);
        let store = GitHubStore::new(
            fake.clone(),
            Credentials::new("token", ""),
            StoreOptions::default(),
        );
        let options = SessionOptions {
            repo_init_delay: Duration::ZERO,
            ..SessionOptions::default()
        };
        let session = Session::new(store, options);

        let temp_dir = TempDir::new().unwrap();
        let ctx = Context {
            config: Config::default(),
            config_dir: temp_dir.path().join("config"),
            state: LocalState::default(),
            state_dir: temp_dir.path().join("state"),
            repo_override: None,
        };
        TestContext {
            fake,
            session,
            ctx,
            temp_dir,
        }
    }

    /// Pretend `repository` was used last.
    pub fn with_repository(mut self, repository: &str) -> Self {
        self.ctx.state.last_repository = Some(repository.to_string());
        self
    }

    pub fn with_workspace(mut self, workspace: &str) -> Self {
        self.ctx.state.active_workspace = Some(workspace.to_string());
        self
    }

    /// Parse `args` as a command line and execute it.
    pub async fn run(&mut self, args: &[&str]) -> Result<()> {
        let cli = Cli::try_parse_from(std::iter::once("devhub").chain(args.iter().copied()))
            .expect("test command line should parse");
        if cli.repo.is_some() {
            self.ctx.repo_override = cli.repo;
        }
        execute(&mut self.ctx, &self.session, cli.command).await
    }

    /// State as the next invocation would read it from disk.
    pub fn saved_state(&self) -> LocalState {
        LocalState::load(&self.ctx.state_dir)
    }

    pub fn temp_path(&self, name: &str) -> std::path::PathBuf {
        self.temp_dir.path().join(name)
    }
}
