// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dh-core: Shared library for the devhub sync core
//!
//! This crate provides the workspace document model and the naming rules
//! that map documents onto repository files. It is used by both the store
//! client and the session layer.

pub mod error;
pub mod name;
pub mod workspace;

pub use error::{Error, Result};
pub use name::{
    document_file_name, document_name_from_file, validate_document_name, DEFAULT_WORKSPACE,
};
pub use workspace::{AppSettings, Column, Kanban, Note, Priority, Script, Seconds, Task, WorkspaceData};
