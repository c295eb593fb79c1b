use super::TodoStore;
use crate::error::Result;
use crate::model::Todo;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// File-backed store: one JSON array holds the whole collection.
///
/// The parent directory and an empty `[]` file are created on first access.
/// Writes go to a temp file that is renamed over the data file, so a crash
/// never leaves a half-written array behind. There is no locking between
/// processes or requests.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn data_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_file(&self) -> Result<()> {
        let dir = self.data_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        if !self.path.exists() {
            debug!(path = %self.path.display(), "initializing empty todo file");
            self.save(&[])?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<Todo>> {
        self.ensure_file()?;
        let content = fs::read_to_string(&self.path)?;
        let todos: Vec<Todo> = serde_json::from_str(&content)?;
        Ok(todos)
    }

    fn save(&self, todos: &[Todo]) -> Result<()> {
        let content = serde_json::to_string_pretty(todos)?;

        // Atomic write
        let tmp_path = self.data_dir().join(format!(".todos-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

impl TodoStore for FileStore {
    fn list(&self) -> Result<Vec<Todo>> {
        self.load()
    }

    fn insert(&self, text: &str) -> Result<Todo> {
        let mut todos = self.load()?;
        let todo = Todo::new(Uuid::new_v4().to_string(), text);
        todos.push(todo.clone());
        self.save(&todos)?;
        debug!(id = %todo.id, "inserted todo");
        Ok(todo)
    }

    fn update_completed(&self, id: &str, completed: bool) -> Result<Option<Todo>> {
        let mut todos = self.load()?;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        todo.completed = completed;
        let updated = todo.clone();
        self.save(&todos)?;
        debug!(id, completed, "updated todo");
        Ok(Some(updated))
    }

    fn delete_one(&self, id: &str) -> Result<bool> {
        let mut todos = self.load()?;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        if todos.len() == before {
            return Ok(false);
        }
        self.save(&todos)?;
        debug!(id, "deleted todo");
        Ok(true)
    }

    fn delete_where_completed(&self) -> Result<usize> {
        let mut todos = self.load()?;
        let before = todos.len();
        todos.retain(Todo::is_active);
        let removed = before - todos.len();
        if removed > 0 {
            self.save(&todos)?;
        }
        debug!(removed, "cleared completed todos");
        Ok(removed)
    }
}
