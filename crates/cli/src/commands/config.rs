// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::cli::ConfigCommand;
use crate::config::CONFIG_FILE_NAME;
use crate::env;
use crate::error::Result;

use super::Context;

/// Execute a config subcommand.
pub fn run(ctx: &Context, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => print!("{}", ctx.config.to_toml()?),
        ConfigCommand::Path => println!("{}", ctx.config_dir.join(CONFIG_FILE_NAME).display()),
    }
    Ok(())
}

/// Print the local selection and token source. Makes no requests.
pub fn status(ctx: &Context) -> Result<()> {
    print!("{}", format_status(ctx, env::token(&ctx.config.github.token_env).is_some()));
    Ok(())
}

pub(crate) fn format_status(ctx: &Context, token_present: bool) -> String {
    let repository = ctx
        .repo_override
        .as_deref()
        .or(ctx.state.last_repository.as_deref())
        .unwrap_or("(none)");
    let workspace = ctx.state.active_workspace.as_deref().unwrap_or("(none)");
    let token = if token_present { "set" } else { "not set" };
    format!(
        "Repository: {}\nWorkspace: {}\nToken: ${} ({})\nAPI: {}\n",
        repository, workspace, ctx.config.github.token_env, token, ctx.config.github.api_base
    )
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
