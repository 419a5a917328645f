// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use dh_store::{RepositorySummary, Transport, UserProfile};

use crate::error::Result;
use crate::session::Session;

pub async fn whoami<T: Transport + 'static>(session: &Session<T>) -> Result<()> {
    let user = session.store().current_user().await?;
    println!("{}", format_user(&user));
    Ok(())
}

pub async fn list<T: Transport + 'static>(
    session: &Session<T>,
    current: Option<&str>,
) -> Result<()> {
    let repos = session.store().list_repositories().await?;
    if repos.is_empty() {
        println!("No repositories found.");
        return Ok(());
    }
    for line in format_repositories(&repos, current) {
        println!("{line}");
    }
    Ok(())
}

/// Create `name` under the signed-in account and switch to it.
pub async fn create<T: Transport + 'static>(
    session: &Session<T>,
    name: &str,
    private: bool,
) -> Result<()> {
    let repo = session.create_repository_with(name, private).await?;
    let visibility = if repo.private { "private" } else { "public" };
    println!("Created {} ({})", repo.full_name, visibility);
    println!("Using {} (workspace {})", repo.full_name, session.active_workspace());
    Ok(())
}

pub(crate) fn format_user(user: &UserProfile) -> String {
    match user.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => format!("{} ({})", user.login, name),
        None => user.login.clone(),
    }
}

/// One line per repository; the current one is marked with `*`.
pub(crate) fn format_repositories(
    repos: &[RepositorySummary],
    current: Option<&str>,
) -> Vec<String> {
    repos
        .iter()
        .map(|r| {
            let marker = if Some(r.full_name.as_str()) == current {
                "*"
            } else {
                " "
            };
            let suffix = if r.private { " (private)" } else { "" };
            format!("{} {}{}", marker, r.full_name, suffix)
        })
        .collect()
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;
