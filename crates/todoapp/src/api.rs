//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for all todo operations, whichever surface drives it (the HTTP
//! server, tests, or an embedding program).
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<Todo>`, `Result<Vec<Todo>>`, ...)
//!
//! It holds no state besides the store it was built with.
//!
//! ## Generic Over TodoStore
//!
//! `TodoApi<S: TodoStore>` is generic over the storage backend:
//! - Server: `TodoApi<Box<dyn TodoStore>>`, chosen from config at startup
//! - Testing: `TodoApi<CollectionStore<MemCollection>>` or a `FileStore` on a temp dir
//!
//! ## Testing Strategy
//!
//! API tests verify dispatch and argument passing. Command logic is tested in
//! the command modules.

use crate::commands;
use crate::error::Result;
use crate::model::Todo;
use crate::store::TodoStore;

pub struct TodoApi<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> TodoApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_all(&self) -> Result<Vec<Todo>> {
        commands::list::run(&self.store)
    }

    pub fn create(&self, text: Option<&str>) -> Result<Todo> {
        commands::create::run(&self.store, text)
    }

    pub fn set_completed(&self, id: &str, completed: Option<bool>) -> Result<Todo> {
        commands::complete::run(&self.store, id, completed)
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        commands::delete::run(&self.store, id)
    }

    pub fn clear_completed(&self) -> Result<()> {
        commands::clear::run(&self.store).map(|_| ())
    }
}
