//! # Client Layer
//!
//! Everything a todo front end needs, without any UI toolkit:
//!
//! - [`render`]: `(tasks, filter) -> rows`, the remaining count label
//! - [`state`]: the client's state value and its pure transitions
//! - [`remote`]: networked session over the REST contract (reqwest)
//! - [`local`]: local-only session over a key/value storage
//!
//! Sessions own a [`state::TaskState`] and are driven through `&mut self`, so
//! one owner serializes every interaction. The `todo` binary is one such owner.

pub mod local;
pub mod remote;
pub mod render;
pub mod state;

pub use local::{FileLocalStorage, LocalSession, LocalStorage, MemLocalStorage};
pub use remote::{RemoteClient, RemoteSession};
pub use render::{DisplayRow, Filter};
pub use state::{Dispatch, Intent, Notice, TaskState};
