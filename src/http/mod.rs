//! HTTP surface
//!
//! One page at `/` whose view is chosen by the `code` query parameter, plus
//! the form endpoints that mutate the calling browser's session.

mod error;
mod handlers;
mod pages;
pub mod request;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderMap, Uri},
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::KioskConfig;
use crate::session::SessionStore;

pub struct AppState {
    pub config: KioskConfig,
    pub sessions: SessionStore,
    /// Operator-fixed origin; detected per session when unset
    pub public_origin: Option<String>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        config: KioskConfig,
        session_idle: Duration,
        max_sessions: usize,
        public_origin: Option<String>,
    ) -> Self {
        Self {
            config,
            sessions: SessionStore::new(session_idle, max_sessions),
            public_origin,
        }
    }

    /// Origin to build links under for this request
    pub fn origin_for(&self, headers: &HeaderMap, uri: &Uri) -> String {
        match &self.public_origin {
            Some(origin) => origin.clone(),
            None => request::detect_origin(headers, uri),
        }
    }
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/capture", post(handlers::capture))
        .route("/back", post(handlers::go_back))
        .route("/logo", get(handlers::logo))
        .route("/api/records", get(handlers::records))
        .route("/healthz", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(state: SharedState, addr: SocketAddr) -> Result<()> {
    let router = build_router(state);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Kiosk listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Kiosk stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
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
