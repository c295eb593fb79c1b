//! # Storage Layer
//!
//! This module defines the persistence abstraction. The [`TodoStore`] trait lets
//! the service run on different storage technologies without branching on them.
//!
//! ## Implementations
//!
//! - [`file::FileStore`]: the whole collection is one pretty-printed JSON array.
//!   Every operation reads the full array, mutates it in memory and writes it
//!   back. Insertion order is preserved.
//!
//! - [`collection::CollectionStore`]: each operation is one call on a
//!   [`collection::DocumentCollection`] (find, insert-one, find-and-update,
//!   find-and-delete, delete-many). Listing is newest first. Identifiers must
//!   have the collection's object-id shape and are checked before any lookup.
//!
//! - [`mem_collection::MemCollection`]: an in-process document collection used
//!   by the `collection` backend and by tests.
//!
//! ## Concurrency
//!
//! All methods take `&self` and stores are `Send + Sync` so one instance can be
//! shared by every request handler. `FileStore` does not lock: two concurrent
//! read-modify-write cycles can race and the last writer wins.
//!
//! ## Selection
//!
//! [`open_store`] picks the implementation from [`TodoConfig::backend`] once, at
//! startup.

use crate::config::{Backend, TodoConfig};
use crate::error::Result;
use crate::model::Todo;
use std::sync::Arc;
use tracing::info;

pub mod collection;
pub mod file;
pub mod mem_collection;

/// Abstract interface for todo persistence.
pub trait TodoStore: Send + Sync {
    /// All todos, in the store's natural order
    fn list(&self) -> Result<Vec<Todo>>;

    /// Persist a new todo with the given (already validated) text
    fn insert(&self, text: &str) -> Result<Todo>;

    /// Set `completed` on one todo. `Ok(None)` when no todo has that id.
    fn update_completed(&self, id: &str, completed: bool) -> Result<Option<Todo>>;

    /// Remove one todo. `Ok(false)` when no todo has that id.
    fn delete_one(&self, id: &str) -> Result<bool>;

    /// Remove every completed todo, returning how many were removed
    fn delete_where_completed(&self) -> Result<usize>;

    /// Whether `id` has the shape this store's identifiers have.
    fn is_valid_id(&self, id: &str) -> bool {
        !id.trim().is_empty()
    }
}

impl<T: TodoStore + ?Sized> TodoStore for Box<T> {
    fn list(&self) -> Result<Vec<Todo>> {
        (**self).list()
    }

    fn insert(&self, text: &str) -> Result<Todo> {
        (**self).insert(text)
    }

    fn update_completed(&self, id: &str, completed: bool) -> Result<Option<Todo>> {
        (**self).update_completed(id, completed)
    }

    fn delete_one(&self, id: &str) -> Result<bool> {
        (**self).delete_one(id)
    }

    fn delete_where_completed(&self) -> Result<usize> {
        (**self).delete_where_completed()
    }

    fn is_valid_id(&self, id: &str) -> bool {
        (**self).is_valid_id(id)
    }
}

impl<T: TodoStore + ?Sized> TodoStore for Arc<T> {
    fn list(&self) -> Result<Vec<Todo>> {
        (**self).list()
    }

    fn insert(&self, text: &str) -> Result<Todo> {
        (**self).insert(text)
    }

    fn update_completed(&self, id: &str, completed: bool) -> Result<Option<Todo>> {
        (**self).update_completed(id, completed)
    }

    fn delete_one(&self, id: &str) -> Result<bool> {
        (**self).delete_one(id)
    }

    fn delete_where_completed(&self) -> Result<usize> {
        (**self).delete_where_completed()
    }

    fn is_valid_id(&self, id: &str) -> bool {
        (**self).is_valid_id(id)
    }
}

/// Build the store selected by `config.backend`.
pub fn open_store(config: &TodoConfig) -> Result<Box<dyn TodoStore>> {
    match config.backend {
        Backend::File => {
            let path = config.data_file();
            info!(path = %path.display(), "using file backend");
            Ok(Box::new(file::FileStore::new(path)))
        }
        Backend::Collection => {
            info!("using in-process document collection backend");
            Ok(Box::new(collection::CollectionStore::new(
                mem_collection::MemCollection::new(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_store_file_backend_uses_data_file() {
        let temp = tempdir().unwrap();
        let config = TodoConfig {
            data_file: Some(temp.path().join("nested").join("todos.json")),
            ..Default::default()
        };
        let store = open_store(&config).unwrap();
        store.insert("Buy milk").unwrap();
        assert!(temp.path().join("nested").join("todos.json").exists());
    }

    #[test]
    fn open_store_collection_backend_checks_id_shape() {
        let config = TodoConfig {
            backend: Backend::Collection,
            ..Default::default()
        };
        let store = open_store(&config).unwrap();
        let todo = store.insert("Buy milk").unwrap();
        assert!(store.is_valid_id(&todo.id));
        assert!(!store.is_valid_id("not-a-real-id"));
    }

    #[test]
    fn boxed_store_delegates_id_check() {
        let store: Box<dyn TodoStore> = Box::new(file::FileStore::new("unused.json"));
        assert!(store.is_valid_id("anything"));
        assert!(!store.is_valid_id("   "));
    }
}
