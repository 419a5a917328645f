// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::help;

pub use args::WorkspaceArg;

#[derive(Parser)]
#[command(name = "devhub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keep DevHub workspaces in a GitHub repository you own")]
#[command(
    long_about = "Keep DevHub workspaces in a GitHub repository you own.\n\n\
    Each workspace (kanban board, notes and scripts) is one JSON file at the root \
    of the repository. The access token is read from $GITHUB_TOKEN unless \
    github.token_env says otherwise."
)]
#[command(styles = help::styles())]
#[command(after_help = help::examples())]
pub struct Cli {
    /// Use this repository instead of the last one (owner/name)
    #[arg(short = 'r', long = "repo", global = true, value_name = "owner/name")]
    pub repo: Option<String>,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the account the token belongs to
    Whoami,

    /// List or create repositories
    #[command(subcommand)]
    Repos(ReposCommand),

    /// Select the repository that holds your workspaces
    Use {
        /// Repository as owner/name
        repository: String,
    },

    /// Manage workspaces in the current repository
    #[command(subcommand)]
    Workspace(WorkspaceCommand),

    /// Write a workspace as JSON to stdout or a file
    Export {
        #[command(flatten)]
        workspace: WorkspaceArg,

        /// Output file (stdout if omitted)
        #[arg(short = 'o', long = "output", value_name = "file")]
        output: Option<PathBuf>,
    },

    /// Replace a workspace with the contents of a JSON file and save it
    Import {
        /// File written by `devhub export`
        file: PathBuf,

        #[command(flatten)]
        workspace: WorkspaceArg,
    },

    /// Reload the active workspace from the repository
    Pull,

    /// Show the selected repository, workspace and token source
    Status,

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub enum ReposCommand {
    /// List repositories the token can access
    List,

    /// Create a repository and start using it
    Create {
        /// Repository name (created under the signed-in account)
        name: String,

        /// Make the repository public (default: private)
        #[arg(long)]
        public: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkspaceCommand {
    /// List workspaces; the active one is marked with *
    List,

    /// Summarize a workspace (the active one by default)
    Show {
        /// Workspace name
        name: Option<String>,
    },

    /// Create an empty workspace and switch to it
    Create {
        /// Workspace name
        name: String,
    },

    /// Delete a workspace
    Delete {
        /// Workspace name (`default` cannot be deleted)
        name: String,
    },

    /// Make another workspace active
    Switch {
        /// Workspace name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the path of the configuration file
    Path,
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
