// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dhrs - Keep DevHub workspaces in a GitHub repository.
//!
//! This crate provides the sync layer and the `devhub` CLI on top of
//! [`dh_store`]. Each workspace is one JSON document in a repository the
//! user owns.
//!
//! # Main Components
//!
//! - [`Session`] - in-memory active workspace with debounced and periodic saves
//! - [`Config`] - user configuration (`config.toml`)
//! - [`LocalState`] - last-used repository and workspace
//! - [`Error`] - error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use dh_store::{Credentials, GitHubStore, HttpTransport, HttpConfig, StoreOptions};
//! use dhrs::{Session, SessionOptions};
//!
//! let transport = HttpTransport::new(HttpConfig::default())?;
//! let store = GitHubStore::new(transport, Credentials::new(token, ""), StoreOptions::default());
//! let session = Session::new(store, SessionOptions::default());
//!
//! session.open_repository("me/devhub-data").await?;
//! session.update(|doc| doc.notes.push(note));
//! session.save().await?;
//! session.teardown();
//! ```

mod cli;
mod commands;
pub mod help;

pub mod config;
pub mod env;
pub mod error;
pub mod session;
pub mod state;

pub use cli::{Cli, Command, ConfigCommand, ReposCommand, WorkspaceArg, WorkspaceCommand};
pub use config::Config;
pub use error::{Error, Result};
pub use session::{PullOutcome, SaveTrigger, Session, SessionOptions, SyncPhase, SyncSnapshot};
pub use state::LocalState;

/// Execute a parsed command line. This is the main entry point for library
/// users and runs the command on its own tokio runtime.
pub fn run(cli: Cli) -> Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))?;

    rt.block_on(commands::run(cli))
}
