use super::state::{apply_local, Dispatch, Effect, Intent, Operation, TaskState};
use crate::error::{Result, TodoError};
use crate::model::Todo;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key the whole task list is stored under.
pub const STORAGE_KEY: &str = "todos";

/// String key/value storage, the shape of a browser's local storage.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: LocalStorage + ?Sized> LocalStorage for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// One `<key>.json` file per key inside `dir`.
pub struct FileLocalStorage {
    dir: PathBuf,
}

impl FileLocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl LocalStorage for FileLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.item_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let tmp = self
            .dir
            .join(format!(".{}-{}.tmp", key, uuid::Uuid::new_v4()));
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, self.item_path(key)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-memory storage with an optional per-item size limit.
#[derive(Default)]
pub struct MemLocalStorage {
    items: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes whose value is longer than `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }
}

impl LocalStorage for MemLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(TodoError::Store(format!(
                    "quota exceeded: {} bytes over a limit of {}",
                    value.len(),
                    quota
                )));
            }
        }
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Local-only client: mutations apply directly and the list is saved after each one.
pub struct LocalSession<L: LocalStorage> {
    storage: L,
    state: TaskState,
    last_id: i64,
}

impl<L: LocalStorage> LocalSession<L> {
    pub fn new(storage: L) -> Self {
        Self {
            storage,
            state: TaskState::new(),
            last_id: 0,
        }
    }

    pub fn state(&self) -> &TaskState {
        &self.state
    }

    pub fn storage(&self) -> &L {
        &self.storage
    }

    /// Read the persisted list. Nothing stored yet means an empty list.
    pub fn load(&mut self) -> Result<()> {
        let tasks: Vec<Todo> = match self.storage.get_item(STORAGE_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        self.last_id = tasks
            .iter()
            .filter_map(|t| t.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        debug!(count = tasks.len(), "loaded local tasks");
        self.state.tasks = tasks;
        Ok(())
    }

    pub fn dispatch(&mut self, intent: Intent, now: DateTime<Utc>) -> Dispatch {
        self.state.prune_notices(now);
        let is_view_change = matches!(intent, Intent::SetFilter(_));
        let previous = self.state.clone();

        // Millisecond timestamps, bumped past the last one handed out.
        let mut issued = self.last_id;
        let (state, effect) = apply_local(
            std::mem::take(&mut self.state),
            intent,
            || {
                issued = now.timestamp_millis().max(issued + 1);
                issued.to_string()
            },
            now,
        );

        match effect {
            Effect::Persist => match self.persist(&state.tasks) {
                Ok(()) => {
                    self.state = state;
                    self.last_id = issued;
                    Dispatch::Applied
                }
                Err(e) => {
                    let operation = Operation::Save;
                    warn!(error = %e, "{}", operation.failure_message());
                    self.state = previous;
                    self.state.raise(operation.failure_message(), now);
                    Dispatch::Failed
                }
            },
            _ => {
                self.state = state;
                if is_view_change {
                    Dispatch::Applied
                } else {
                    Dispatch::Ignored
                }
            }
        }
    }

    fn persist(&self, tasks: &[Todo]) -> Result<()> {
        let raw = serde_json::to_string_pretty(tasks)?;
        self.storage.set_item(STORAGE_KEY, &raw)
    }
}
