//! # Todo CLI
//!
//! The binary is thin: this file only invokes `cli::run()` and turns its result
//! into a process exit code. Everything else lives in the `todoapp` library.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/todo/src/cli/)                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - config + session wiring, dispatch (handlers.rs)          │
//! │  - terminal output (print.rs)                               │
//! └─────────────────────────────────────────────────────────────┘
//!                │ serve                      │ list/add/...
//!                ▼                            ▼
//!   todoapp::server (axum)          todoapp::client sessions
//!                                   (REST, or local storage with --local)
//! ```
//!
//! A client command runs one session from start to finish: load the list,
//! dispatch at most one intent, print the resulting view. A command whose
//! action failed exits with status 1 after printing its notice.

mod cli;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
