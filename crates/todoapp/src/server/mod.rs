//! # HTTP Layer
//!
//! Maps the five REST operations onto [`TodoApi`](crate::api::TodoApi):
//!
//! | Method | Path | Success | Failure |
//! |--------|------|---------|---------|
//! | GET | `/api/todos` | 200 + array | 500 |
//! | POST | `/api/todos` | 201 + todo | 400, 500 |
//! | PUT | `/api/todos/{id}` | 200 + todo | 400, 404, 500 |
//! | DELETE | `/api/todos/{id}` | 204 | 400, 404, 500 |
//! | DELETE | `/api/todos` | 204 | 500 |
//!
//! Handlers are stateless. Required body fields are checked before the service
//! is called; storage failures become a generic 500 and the cause is logged.
//!
//! Stores do blocking I/O, so every service call runs on tokio's blocking pool.
//!
//! The router carries permissive CORS and a request trace layer.

use crate::api::TodoApi;
use crate::config::TodoConfig;
use crate::error::{Result, TodoError};
use crate::store::TodoStore;
use axum::{
    routing::{get, put},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;

pub type SharedApi = TodoApi<Box<dyn TodoStore>>;

#[derive(Clone)]
pub struct AppState {
    api: Arc<SharedApi>,
}

impl AppState {
    pub fn new(store: Box<dyn TodoStore>) -> Self {
        Self {
            api: Arc::new(TodoApi::new(store)),
        }
    }

    /// Run a service call on the blocking pool.
    pub async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&SharedApi) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let api = Arc::clone(&self.api);
        tokio::task::spawn_blocking(move || op(&api))
            .await
            .map_err(|e| TodoError::Store(format!("worker task failed: {}", e)))?
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/todos",
            get(handlers::list_todos)
                .post(handlers::create_todo)
                .delete(handlers::clear_completed),
        )
        .route(
            "/api/todos/",
            put(handlers::missing_id).delete(handlers::missing_id),
        )
        .route(
            "/api/todos/{id}",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl-C / SIGTERM.
pub async fn serve(config: &TodoConfig, store: Box<dyn TodoStore>) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(
        "Server running on http://{} ({} backend)",
        listener.local_addr()?,
        config.backend
    );
    serve_listener(listener, store, shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_listener<F>(
    listener: TcpListener,
    store: Box<dyn TodoStore>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(AppState::new(store));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
