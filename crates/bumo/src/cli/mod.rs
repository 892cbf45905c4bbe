//! # CLI Behavior
//!
//! This is **one possible client** for bumo, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ## Shape
//!
//! ```text
//! bumo [--data-dir DIR] [-v] <collection> <action>
//! bumo [--data-dir DIR] [-v] doctor
//! bumo [--data-dir DIR] [-v] config
//! ```
//!
//! Collections are `reports`, `articles`, `documentation`, `alumni` and
//! `structure` (the Indonesian names `laporan`, `artikel`, `dokumentasi` and
//! `struktur` also work). Actions are `list`, `get`, `create`, `update` and
//! `delete`.
//!
//! Fields are passed as `--set key=value`, stored as strings, or as
//! `--set key:=json` for typed values (`--set saldo:=6500000`). `--file PATH`
//! attaches an image on the collections that carry one.
//!
//! ## Exit Codes
//!
//! `0` on success, `2` when the store rejects the request (unknown id,
//! oversized or invalid upload), `1` for everything else.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing-subscriber`. `RUST_LOG` wins when
//! set; otherwise the level is `warn`, or `debug` with `-v`.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context wiring and dispatch to the API
//! - `render`: Output formatting (records, styled messages)

mod commands;
mod render;
pub mod setup;

pub use commands::{exit_code, run};
