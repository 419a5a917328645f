// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Config and state directories for one test, isolated from the user's.
pub struct Home {
    pub temp: TempDir,
}

impl Home {
    pub fn new() -> Self {
        Home {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn config_dir(&self) -> std::path::PathBuf {
        self.temp.path().join("config")
    }

    pub fn state_dir(&self) -> std::path::PathBuf {
        self.temp.path().join("state")
    }

    /// `devhub` with no token and this home's directories.
    pub fn devhub(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("devhub");
        cmd.env("DEVHUB_CONFIG_DIR", self.config_dir())
            .env("DEVHUB_STATE_DIR", self.state_dir())
            .env_remove("GITHUB_TOKEN")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    pub fn write_config(&self, toml: &str) {
        std::fs::create_dir_all(self.config_dir()).unwrap();
        std::fs::write(self.config_dir().join("config.toml"), toml).unwrap();
    }

    pub fn write_state(&self, json: &str) {
        std::fs::create_dir_all(self.state_dir()).unwrap();
        std::fs::write(self.state_dir().join("state.json"), json).unwrap();
    }
}
