//! # Todoapp Architecture
//!
//! Todoapp is a **UI-agnostic task-tracking library**. The `todo` binary is one client
//! of it; the HTTP server in [`server`] is another surface over the same core.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client Layer (client/)                                     │
//! │  - Pure state transitions + renderer                        │
//! │  - Remote session (REST) or local session (key/value file)  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  HTTP (networked variant)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (server/)                                       │
//! │  - Five REST routes, status code mapping, CORS + tracing    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Command Layer (commands/*.rs)         │
//! │  - Input validation, identity/defaults, composition         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - TodoStore trait                                          │
//! │  - FileStore (JSON array), CollectionStore (document store) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments and returns
//! [`error::Result`]. It never prints, never exits the process and never knows
//! whether it is being driven by HTTP, a terminal, or a test.
//!
//! The client state in [`client::state`] follows the same rule: transitions are
//! pure functions that return the next state plus an [`client::state::Effect`]
//! describing the side effect to perform. Sessions perform the effect.
//!
//! ## Module Overview
//!
//! - [`api`]: The service facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Persistence adapters
//! - [`server`]: REST endpoints
//! - [`client`]: Client state store, renderer and sessions
//! - [`model`]: The [`model::Todo`] record
//! - [`config`]: Configuration loading
//! - [`error`]: Error types

pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod server;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
