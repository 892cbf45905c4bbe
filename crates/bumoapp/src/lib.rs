//! # Bumo Architecture
//!
//! Bumo is the persistence and upload engine behind the BUMO organization site.
//! Reports, articles, documentation, alumni and structure members all live in a
//! single JSON document; photos and images live as files next to it.
//!
//! It is a library first. The `bumo` binary is one client; an HTTP router is
//! another. Neither owns any storage logic.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (bumo CLI, HTTP handlers)                           │
//! │  - Parses input, renders output, maps errors to statuses    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - RecordService: one facade, shared across threads         │
//! │  - Returns structured Result<CmdResult>                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Record CRUD plus upload ordering and cleanup             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, assets.rs)                          │
//! │  - DocumentStore: locked load-mutate-save of data.json      │
//! │  - AssetManager: validated upload files under uploads/      │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; the client decides whether and
//! where a subscriber prints them.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Document persistence and storage backends
//! - [`assets`]: Upload validation, naming, and cleanup
//! - [`model`]: `Collection`, `Record`, `Document`
//! - [`seed`]: First-run sample content
//! - [`config`]: `bumo.toml` settings
//! - [`init`]: Data root resolution and wiring
//! - [`error`]: Error types

pub mod api;
pub mod assets;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod seed;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
