// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use clap::CommandFactory;
use std::collections::{HashMap, HashSet};

/// Every short flag maps to its agreed long form, and every agreed short
/// form is used somewhere.
#[test]
fn test_flag_consistency() {
    let allowed: HashMap<char, &str> = [
        ('r', "repo"),
        ('v', "verbose"),
        ('w', "workspace"),
        ('o', "output"),
    ]
    .into_iter()
    .collect();

    let mut errors = Vec::new();
    let mut used = HashSet::new();
    check_command_flags(&Cli::command(), &allowed, &mut errors, &mut used);

    for (short, long) in &allowed {
        if !used.contains(short) {
            errors.push(format!("-{} (--{}) is allowed but never used", short, long));
        }
    }
    if !errors.is_empty() {
        panic!("flag consistency violations:\n{}", errors.join("\n"));
    }
}

fn check_command_flags(
    cmd: &clap::Command,
    allowed: &HashMap<char, &str>,
    errors: &mut Vec<String>,
    used: &mut HashSet<char>,
) {
    for arg in cmd.get_arguments() {
        let Some(short) = arg.get_short() else {
            continue;
        };
        let long = arg.get_long();
        if short == 'h' && long == Some("help") {
            continue;
        }
        if short == 'V' && long == Some("version") {
            continue;
        }
        used.insert(short);
        match (allowed.get(&short), long) {
            (Some(expected), Some(actual)) if actual != *expected => errors.push(format!(
                "{}: -{} maps to --{} but should map to --{}",
                cmd.get_name(),
                short,
                actual,
                expected
            )),
            (Some(_), _) => {}
            (None, long) => errors.push(format!(
                "{}: -{} (--{}) is not an allowed short flag",
                cmd.get_name(),
                short,
                long.unwrap_or("(none)")
            )),
        }
    }
    for sub in cmd.get_subcommands() {
        check_command_flags(sub, allowed, errors, used);
    }
}

#[test]
fn test_command_definition_is_valid() {
    Cli::command().debug_assert();
}
