// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dh-store: GitHub-backed document store.
//!
//! Persists workspace documents as `<name>.json` files in a GitHub repository.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ GitHubStore  │────►│  Transport  │────►│   GitHub    │
//! │ (documents)  │◄────│   (trait)   │◄────│  REST API   │
//! └──────────────┘     └─────────────┘     └─────────────┘
//!     │      │
//!     ▼      ▼
//! ┌───────┐ ┌──────────────┐
//! │ Write │ │ Revision     │  (name → blob SHA)
//! │ Queue │ │ Cache        │
//! └───────┘ └──────────────┘
//! ```
//!
//! # Features
//!
//! - Serialized writes: one in flight, in call order
//! - Optimistic concurrency with blob SHAs, re-probed before each write
//! - Not-found normalized to `None` / no-op for reads and deletes
//! - Injectable transport trait for testing (`test-support` feature)

pub mod api;
mod error;
mod queue;
mod revisions;
mod store;
mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use api::{RepositorySummary, UserProfile};
pub use error::{Result, StoreError};
pub use queue::WriteQueue;
pub use revisions::RevisionCache;
pub use store::{
    contents_path, Credentials, GitHubStore, LoadedDocument, RevisionProbe, StoreOptions,
    REPOSITORY_DESCRIPTION,
};
pub use transport::{
    ApiRequest, ApiResponse, HttpConfig, HttpTransport, Method, Transport, TransportError,
    TransportResult, GITHUB_API_BASE,
};
