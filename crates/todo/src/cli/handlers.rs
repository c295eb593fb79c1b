use super::print::{print_notices, print_view};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use std::process::ExitCode;
use todoapp::client::{
    Dispatch, FileLocalStorage, Filter, Intent, LocalSession, RemoteClient, RemoteSession,
    TaskState,
};
use todoapp::config::{Backend, TodoConfig};
use todoapp::store::open_store;
use tracing::info;

pub async fn serve(
    mut config: TodoConfig,
    backend: Option<Backend>,
    host: Option<String>,
    port: Option<u16>,
    data_file: Option<PathBuf>,
) -> Result<ExitCode> {
    if let Some(backend) = backend {
        config.backend = backend;
    }
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if data_file.is_some() {
        config.data_file = data_file;
    }

    let store = open_store(&config).context("failed to open store")?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting todo server");
    todoapp::server::serve(&config, store)
        .await
        .with_context(|| format!("server on {} failed", config.bind_addr()))?;
    Ok(ExitCode::SUCCESS)
}

/// The client a command talks through.
pub enum Frontend {
    Remote(RemoteSession),
    Local(LocalSession<FileLocalStorage>),
}

impl Frontend {
    pub fn open(config: &TodoConfig, local: bool) -> Result<Self> {
        if local {
            let dir = config.local_dir();
            info!(dir = %dir.display(), "using local storage");
            Ok(Frontend::Local(LocalSession::new(FileLocalStorage::new(dir))))
        } else {
            let client = RemoteClient::new(&config.api_url)?;
            Ok(Frontend::Remote(RemoteSession::new(client)))
        }
    }

    pub async fn load(&mut self) -> Result<Dispatch> {
        match self {
            Frontend::Remote(session) => Ok(session.load().await),
            Frontend::Local(session) => {
                session
                    .load()
                    .with_context(|| format!("failed to read {}", session.storage().dir().display()))?;
                Ok(Dispatch::Applied)
            }
        }
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Dispatch {
        match self {
            Frontend::Remote(session) => session.dispatch(intent).await,
            Frontend::Local(session) => session.dispatch(intent, Utc::now()),
        }
    }

    pub fn state(&self) -> &TaskState {
        match self {
            Frontend::Remote(session) => session.state(),
            Frontend::Local(session) => session.state(),
        }
    }
}

/// A client command: the list view, optionally after one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    List(Filter),
    Act(Intent),
}

pub async fn client(config: &TodoConfig, local: bool, command: ClientCommand) -> Result<ExitCode> {
    let mut frontend = Frontend::open(config, local)?;

    if frontend.load().await? == Dispatch::Failed {
        print_notices(&frontend.state().visible_notices(Utc::now()));
        return Ok(ExitCode::FAILURE);
    }

    let result = match command {
        ClientCommand::List(filter) => frontend.dispatch(Intent::SetFilter(filter)).await,
        ClientCommand::Act(intent) => {
            let described = describe_noop(&intent);
            let result = frontend.dispatch(intent).await;
            if result == Dispatch::Ignored {
                if let Some(reason) = described {
                    bail!(reason);
                }
            }
            result
        }
    };

    print_view(frontend.state());
    print_notices(&frontend.state().visible_notices(Utc::now()));

    Ok(if result == Dispatch::Failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Why an intent that was ignored counts as a user error, if it does.
fn describe_noop(intent: &Intent) -> Option<String> {
    match intent {
        Intent::Add(_) => Some("Task text is required".to_string()),
        Intent::Toggle(id) | Intent::Delete(id) => Some(format!("No task with id {}", id)),
        Intent::ClearCompleted | Intent::SetFilter(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_nothing_is_not_an_error() {
        assert_eq!(describe_noop(&Intent::ClearCompleted), None);
    }

    #[test]
    fn unknown_id_is_reported() {
        assert_eq!(
            describe_noop(&Intent::Toggle("7".into())),
            Some("No task with id 7".to_string())
        );
    }

    #[test]
    fn local_frontend_uses_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = TodoConfig {
            local_dir: Some(dir.path().to_path_buf()),
            ..TodoConfig::default()
        };
        match Frontend::open(&config, true).unwrap() {
            Frontend::Local(session) => assert_eq!(session.storage().dir(), dir.path()),
            Frontend::Remote(_) => panic!("expected a local frontend"),
        }
    }

    #[test]
    fn remote_frontend_rejects_bad_url() {
        let config = TodoConfig {
            api_url: "not a url".to_string(),
            ..TodoConfig::default()
        };
        assert!(Frontend::open(&config, false).is_err());
    }
}
