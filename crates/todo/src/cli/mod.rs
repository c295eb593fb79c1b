//! # CLI Layer
//!
//! This module is **one possible UI client** for todoapp. It is the only place
//! that knows about arguments, terminal output and exit codes.
//!
//! ## Naked Execution
//!
//! Running `todo` with no arguments is `todo list`.
//!
//! ## Networked vs Local
//!
//! By default client commands go through the REST API at `api_url`. With
//! `--local` they read and write the local storage directory instead, and no
//! server is involved.
//!
//! ## Logging
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` overrides the
//! default filter, which is verbose for `serve` and quiet for client commands.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `handlers`: Server bootstrap and client command execution
//! - `print`: Terminal output

mod handlers;
mod print;
pub mod setup;

use anyhow::Result;
use clap::Parser;
use handlers::ClientCommand;
use setup::{Cli, Commands};
use std::process::ExitCode;
use todoapp::client::{Filter, Intent};
use todoapp::config::TodoConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVE_LOG_FILTER: &str = "todo=info,todoapp=info,tower_http=debug";
const CLIENT_LOG_FILTER: &str = "warn";

pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Some(Commands::Serve { .. }) => SERVE_LOG_FILTER,
        _ => CLIENT_LOG_FILTER,
    };
    init_tracing(default_filter);

    let mut config = TodoConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    let command = match cli.command {
        Some(Commands::Serve {
            backend,
            host,
            port,
            data_file,
        }) => return handlers::serve(config, backend, host, port, data_file).await,
        None => ClientCommand::List(Filter::All),
        Some(Commands::List { filter }) => ClientCommand::List(filter),
        Some(Commands::Add { text }) => ClientCommand::Act(Intent::Add(text.join(" "))),
        Some(Commands::Toggle { id }) => ClientCommand::Act(Intent::Toggle(id)),
        Some(Commands::Delete { id }) => ClientCommand::Act(Intent::Delete(id)),
        Some(Commands::Clear) => ClientCommand::Act(Intent::ClearCompleted),
    };

    handlers::client(&config, cli.local, command).await
}

fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
