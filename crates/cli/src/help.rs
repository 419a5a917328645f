// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text styling.

use std::io::IsTerminal;

use anstyle::{Ansi256Color, Color, Style};
use clap::builder::styling::Styles;

use crate::env;

/// Section headers: steel blue.
const HEADER: u8 = 74;
/// Commands and flags: light grey.
const LITERAL: u8 = 250;
/// Placeholders and defaults: medium grey.
const CONTEXT: u8 = 245;

/// Colors are on for a terminal unless `NO_COLOR=1`; `COLOR=1` forces them.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(fg(HEADER))
        .usage(fg(HEADER))
        .literal(fg(LITERAL))
        .placeholder(fg(CONTEXT))
        .valid(fg(CONTEXT))
}

pub fn examples() -> &'static str {
    "\
Examples:
  devhub repos create devhub-data      Create a private data repository and use it
  devhub use me/devhub-data            Use an existing repository
  devhub workspace create side         Add a workspace and switch to it
  devhub export -o backup.json         Save the active workspace to a file
  devhub import backup.json -w side    Restore a workspace from a file"
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
