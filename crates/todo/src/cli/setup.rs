use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todoapp::client::Filter;
use todoapp::config::Backend;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.4.0" for releases, "0.4.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "todo",
    bin_name = "todo",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Track tasks from the terminal, or serve them over HTTP", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Keep tasks in local storage instead of talking to a server
    #[arg(long, global = true, help_heading = "Options")]
    pub local: bool,

    /// Base URL of the todo API (e.g. http://localhost:3000/api)
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub api_url: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Persistence adapter: file or collection
        #[arg(long)]
        backend: Option<Backend>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(long, short)]
        port: Option<u16>,

        /// JSON file used by the file backend
        #[arg(long, value_name = "PATH")]
        data_file: Option<PathBuf>,
    },

    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Which tasks to show: all, active or completed
        #[arg(long, short, default_value = "all")]
        filter: Filter,
    },

    /// Add a task
    #[command(alias = "a")]
    Add {
        /// Task text (words are joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Toggle a task between active and completed
    Toggle { id: String },

    /// Delete a task
    #[command(alias = "rm")]
    Delete { id: String },

    /// Remove every completed task
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = parse(&["todo"]);
        assert!(cli.command.is_none());
        assert!(!cli.local);
    }

    #[test]
    fn add_joins_words() {
        let cli = parse(&["todo", "add", "Buy", "milk"]);
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                text: vec!["Buy".into(), "milk".into()]
            })
        );
    }

    #[test]
    fn add_requires_text() {
        assert!(Cli::try_parse_from(["todo", "add"]).is_err());
    }

    #[test]
    fn list_filter_defaults_to_all() {
        let cli = parse(&["todo", "ls"]);
        assert_eq!(cli.command, Some(Commands::List { filter: Filter::All }));

        let cli = parse(&["todo", "list", "--filter", "completed"]);
        assert_eq!(
            cli.command,
            Some(Commands::List {
                filter: Filter::Completed
            })
        );
        assert!(Cli::try_parse_from(["todo", "list", "--filter", "done"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["todo", "clear", "--local", "--api-url", "http://x/api"]);
        assert!(cli.local);
        assert_eq!(cli.api_url.as_deref(), Some("http://x/api"));
        assert_eq!(cli.command, Some(Commands::Clear));
    }

    #[test]
    fn serve_flags() {
        let cli = parse(&["todo", "serve", "--backend", "collection", "-p", "8080"]);
        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                backend: Some(Backend::Collection),
                host: None,
                port: Some(8080),
                data_file: None,
            })
        );
        assert!(Cli::try_parse_from(["todo", "serve", "--backend", "mongo"]).is_err());
    }
}
