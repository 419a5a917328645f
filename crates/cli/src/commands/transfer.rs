// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Moving workspace content between the repository and local files.

use std::path::Path;

use dh_store::Transport;

use crate::error::Result;
use crate::session::Session;

/// Write a workspace as JSON to `output`, or stdout.
pub async fn export<T: Transport + 'static>(
    session: &Session<T>,
    workspace: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    if let Some(name) = workspace {
        session.switch_workspace(name).await?;
    }
    let json = session.export_document()?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))?;
            eprintln!(
                "Exported {} to {}",
                session.active_workspace(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Replace a workspace with `json` and save it.
pub async fn import<T: Transport + 'static>(
    session: &Session<T>,
    json: &str,
    workspace: Option<&str>,
) -> Result<()> {
    match workspace {
        Some(name) => session.import_into(name, json).await?,
        None => session.import_document(json).await?,
    }
    println!("Imported into {}", session.active_workspace());
    Ok(())
}

/// Reload the active workspace from the repository.
pub async fn pull<T: Transport + 'static>(session: &Session<T>) -> Result<()> {
    let outcome = session.sync_now().await?;
    if outcome.discarded_local_changes {
        eprintln!("warning: unsaved local changes were replaced");
    }
    println!("Pulled {}", session.active_workspace());
    Ok(())
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod tests;
