//! # Command Layer
//!
//! This module contains the **business logic** of the todo service. Each
//! operation lives in its own submodule as a plain function over a
//! [`TodoStore`](crate::store::TodoStore).
//!
//! ## Role and Responsibilities
//!
//! - Validate input before any persistence call
//! - Compose store calls and turn store answers (`None`, `false`) into errors
//! - Hold no state of their own
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O** beyond the store: no HTTP, no terminal
//! - **Status codes**: they return [`TodoError`](crate::error::TodoError)
//!   variants and let the caller map them
//!
//! ## Testing Strategy
//!
//! This is where most of the service tests live. They run against the
//! in-memory collection store, plus the file store where ordering matters.
//!
//! ## Command Modules
//!
//! - [`list`]: Return every todo
//! - [`create`]: Add a todo
//! - [`complete`]: Set or clear the completed flag
//! - [`delete`]: Remove one todo
//! - [`clear`]: Remove every completed todo
//! - [`helpers`]: Shared validation

pub mod clear;
pub mod complete;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod list;
