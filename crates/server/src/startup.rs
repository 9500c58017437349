use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use service::{
    storage::{FileStore, StrengthStore},
    strength::{AuthGate, StrengthService},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

// browser dashboards read the record cross-origin
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the service over an arbitrary store. The secret must already be validated.
pub fn build_state(cfg: &AppConfig, store: Arc<dyn StrengthStore>) -> Result<AppState, StartupError> {
    let gate = AuthGate::new(cfg.auth.secret.clone());
    // refuse to serve writes that could never be authorized
    if !gate.is_configured() {
        return Err(StartupError::InvalidConfig("auth secret is not configured".into()));
    }
    Ok(AppState { strength: StrengthService::new(gate, store, cfg.storage.format) })
}

/// Build the router backed by the configured data file.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    // creates the parent directory; the file itself appears on first write
    let store = FileStore::new(cfg.data_file()).await?;
    info!(path = %store.path().display(), format = %cfg.storage.format, "strength store ready");

    let state = build_state(cfg, store)?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server until Ctrl+C or SIGTERM.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    // host may be a name, so let tokio resolve it
    let listener = TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, debug = cfg.server.debug, "daily strength server listening");

    // in-flight requests finish before the listener closes
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        // without a handler, leave shutdown to SIGTERM
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
}
