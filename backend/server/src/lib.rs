//! # Upload Proxy
//!
//! Development proxy between a browser form and the local inference service.
//!
//!
//!
//! # General Infrastructure
//! - Browser posts the chosen photo as multipart field `image`
//! - Proxy re-wraps it as field `file`, the name the inference service expects
//! - Inference service runs on the same machine, `http://localhost:8000/predict` by default
//! - Proxy answers with the service's JSON, or `{ "error": ... }`
//!
//!
//!
//! # Notes
//!
//! ## Analyzer
//! The analyzer talks to its own endpoint directly and does not go through this
//! proxy. Point it here explicitly to use the local service:
//! ```sh
//! analyzer face.jpg --endpoint http://localhost:3000/api/image-analyze
//! ```
//!
//! ## Timeouts
//! None by default. A hung inference service hangs the request with it.
//! Set `ML_TIMEOUT_SECS` to bound it.
//!
//!
//!
//! # Setup
//!
//! Environment
//! - `RUST_PORT`: listen port, default 3000
//! - `ML_URL`: inference endpoint, default `http://localhost:8000/predict`
//! - `MAX_UPLOAD_BYTES`: request body limit, default 10 MiB
//! - `ML_TIMEOUT_SECS`: upstream timeout, unset by default
//! - `RUST_LOG`: log filter, e.g. `server=debug,scores=debug`
//!
//! Run.
//! ```sh
//! RUST_LOG=info cargo run -p backend
//! ```
//!
//! Try it.
//! ```sh
//! curl -F image=@face.jpg localhost:3000/api/image-analyze
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{analyze_handler, health_handler};
use state::State;

pub async fn start_server() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    info!("Starting server...");
    info!("Forwarding uploads to {}", state.config.ml_url);

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/image-analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
