// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod account;
pub mod config;
pub mod transfer;
pub mod workspace;

#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;

use dh_store::{Credentials, GitHubStore, HttpTransport, StoreError, Transport};

use crate::cli::{Cli, Command, ReposCommand};
use crate::config::{config_dir, Config};
use crate::env;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::state::{state_dir, LocalState};

/// Everything a command needs besides the network: configuration, the
/// last-used selection, and the `--repo` override.
pub struct Context {
    pub config: Config,
    pub config_dir: PathBuf,
    pub state: LocalState,
    pub state_dir: PathBuf,
    pub repo_override: Option<String>,
}

impl Context {
    /// Load configuration and state from their default locations.
    pub fn load(repo_override: Option<String>) -> Result<Self> {
        let config_dir = config_dir()?;
        let config = Config::load(&config_dir)?;
        let state_dir = state_dir();
        let state = LocalState::load(&state_dir);
        Ok(Context {
            config,
            config_dir,
            state,
            state_dir,
            repo_override,
        })
    }

    /// The access token from the configured environment variable.
    pub fn token(&self) -> Result<String> {
        let var = &self.config.github.token_env;
        env::token(var).ok_or_else(|| Error::MissingToken(var.clone()))
    }

    /// Build an HTTP-backed session. No request is made yet.
    pub fn connect(&self) -> Result<Session<HttpTransport>> {
        let token = self.token()?;
        let transport =
            HttpTransport::new(self.config.http_config()).map_err(StoreError::from)?;
        let store = GitHubStore::new(
            transport,
            Credentials::new(token, ""),
            self.config.store_options(),
        );
        Ok(Session::new(store, self.config.session_options()))
    }

    /// Repository to work in: `--repo`, else the last one used.
    pub fn repository(&self) -> Result<String> {
        let repository = self
            .repo_override
            .as_deref()
            .or(self.state.last_repository.as_deref())
            .ok_or(Error::NoRepositorySelected)?;
        Ok(parse_repository(repository)?.to_string())
    }

    /// Open the selected repository, resuming the last active workspace
    /// when it is the same repository as last time.
    pub async fn open<T: Transport + 'static>(&self, session: &Session<T>) -> Result<String> {
        let repository = self.repository()?;
        let preferred = if self.state.last_repository.as_deref() == Some(repository.as_str()) {
            self.state.active_workspace.as_deref()
        } else {
            None
        };
        session.resume(&repository, preferred).await
    }

    /// Record the session's repository and active workspace for next time.
    pub fn remember<T: Transport + 'static>(&mut self, session: &Session<T>) -> Result<()> {
        let repository = session.store().credentials().repository;
        if repository.is_empty() {
            return Ok(());
        }
        self.state.remember_repository(&repository);
        self.state.active_workspace = Some(session.active_workspace());
        self.state.save(&self.state_dir)
    }
}

/// Validate an `owner/name` repository reference.
pub fn parse_repository(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    let valid = match trimmed.split_once('/') {
        Some((owner, name)) => {
            !owner.is_empty()
                && !name.is_empty()
                && !name.contains('/')
                && !trimmed.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(trimmed)
    } else {
        Err(Error::InvalidRepository(input.to_string()))
    }
}

/// Run a parsed command line to completion.
pub async fn run(cli: Cli) -> Result<()> {
    let mut ctx = Context::load(cli.repo)?;
    match cli.command {
        Command::Status => config::status(&ctx),
        Command::Config(cmd) => config::run(&ctx, cmd),
        command => {
            let session = ctx.connect()?;
            let result = execute(&mut ctx, &session, command).await;
            session.teardown();
            result
        }
    }
}

/// Run a command against `session`.
pub(crate) async fn execute<T: Transport + 'static>(
    ctx: &mut Context,
    session: &Session<T>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Whoami => account::whoami(session).await,
        Command::Repos(ReposCommand::List) => {
            let current = ctx.repository().ok();
            account::list(session, current.as_deref()).await
        }
        Command::Repos(ReposCommand::Create { name, public }) => {
            account::create(session, &name, !public).await?;
            ctx.remember(session)
        }
        Command::Use { repository } => {
            let repository = parse_repository(&repository)?;
            let workspace = session.open_repository(repository).await?;
            println!("Using {} (workspace {})", repository, workspace);
            ctx.remember(session)
        }
        Command::Workspace(cmd) => {
            ctx.open(session).await?;
            workspace::run(session, cmd).await?;
            ctx.remember(session)
        }
        Command::Export { workspace, output } => {
            ctx.open(session).await?;
            transfer::export(session, workspace.name.as_deref(), output.as_deref()).await
        }
        Command::Import { file, workspace } => {
            let text = std::fs::read_to_string(&file)?;
            ctx.open(session).await?;
            transfer::import(session, &text, workspace.name.as_deref()).await?;
            ctx.remember(session)
        }
        Command::Pull => {
            ctx.open(session).await?;
            transfer::pull(session).await
        }
        Command::Status => config::status(ctx),
        Command::Config(cmd) => config::run(ctx, cmd),
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
