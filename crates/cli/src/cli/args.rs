// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::Args;

/// Optional workspace to act on instead of the active one.
#[derive(Args, Clone, Debug, Default)]
pub struct WorkspaceArg {
    /// Workspace name (default: the active workspace)
    #[arg(short = 'w', long = "workspace", value_name = "name")]
    pub name: Option<String>,
}
