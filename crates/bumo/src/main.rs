//! # Bumo CLI
//!
//! The `bumo` binary is an admin client for the BUMO content store. It is thin
//! on purpose: everything lives in `src/cli/`, and this file only invokes
//! `cli::run()` and turns errors into an exit code.
//!
//! ## Workspace Structure
//!
//! - `crates/bumoapp/`: the UI-agnostic store, asset lifecycle, and facade
//! - `crates/bumo/`: this CLI, which depends on `bumoapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/bumo/src/cli/)                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering with console styles (render.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/bumoapp/src/api.rs)                      │
//! │  - RecordService facade                                     │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI owns every user-facing concern: argument parsing, the tracing
//! subscriber, rendering, and exit codes. The library never prints.
//!
//! ## Testing Approach
//!
//! - Parsing and rendering are unit tested inside `src/cli/`.
//! - `tests/cli_e2e.rs` drives the real binary against a temp data root with
//!   `assert_cmd`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(cli::exit_code(&e));
    }
}
