// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use dh_core::WorkspaceData;
use dh_store::Transport;

use crate::cli::WorkspaceCommand;
use crate::error::Result;
use crate::session::Session;

/// Execute a workspace subcommand. The repository is already open.
pub async fn run<T: Transport + 'static>(session: &Session<T>, cmd: WorkspaceCommand) -> Result<()> {
    match cmd {
        WorkspaceCommand::List => {
            let names = session.list_workspaces().await?;
            for line in format_list(&names, &session.active_workspace()) {
                println!("{line}");
            }
        }
        WorkspaceCommand::Show { name } => {
            if let Some(name) = name {
                session.switch_workspace(&name).await?;
            }
            print!(
                "{}",
                format_summary(&session.active_workspace(), &session.document())
            );
        }
        WorkspaceCommand::Create { name } => {
            session.create_workspace(&name).await?;
            println!("Created workspace {}", name);
        }
        WorkspaceCommand::Delete { name } => {
            let was_active = session.active_workspace() == name;
            session.delete_workspace(&name).await?;
            println!("Deleted workspace {}", name);
            if was_active {
                println!("Switched to {}", session.active_workspace());
            }
        }
        WorkspaceCommand::Switch { name } => {
            session.switch_workspace(&name).await?;
            println!("Switched to {}", name);
        }
    }
    Ok(())
}

pub(crate) fn format_list(names: &[String], active: &str) -> Vec<String> {
    names
        .iter()
        .map(|n| {
            let marker = if n == active { "*" } else { " " };
            format!("{} {}", marker, n)
        })
        .collect()
}

pub(crate) fn format_summary(name: &str, document: &WorkspaceData) -> String {
    let mut out = format!("Workspace: {}\n", name);
    let columns: Vec<String> = document
        .kanban
        .columns
        .iter()
        .map(|c| format!("{} ({})", c.title, c.tasks.len()))
        .collect();
    if columns.is_empty() {
        out.push_str("Columns: none\n");
    } else {
        out.push_str(&format!("Columns: {}\n", columns.join(", ")));
    }
    out.push_str(&format!(
        "Tasks: {} ({} archived)\n",
        document.task_count(),
        document.kanban.archived_tasks.len()
    ));
    out.push_str(&format!("Notes: {}\n", document.notes.len()));
    out.push_str(&format!("Scripts: {}\n", document.scripts.len()));
    out
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
