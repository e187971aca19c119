use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handler::{get_organisation, handle_health, missing_identifier, AppState};
use crate::error::{OrgReadError, Result};
use crate::organisations::OrganisationService;

/// HTTP server for the public organisations read endpoint
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    pub fn new(service: OrganisationService) -> Self {
        Self {
            state: AppState::new(service),
        }
    }

    /// Serve until Ctrl-C or SIGTERM, then drain in-flight requests
    pub async fn run(&self, addr: SocketAddr) -> Result<()> {
        let app = router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            let error_msg = if e.kind() == std::io::ErrorKind::AddrInUse {
                format!(
                    "Port {} is already in use. Stop the other process or pass a different --port",
                    addr.port()
                )
            } else {
                format!("Failed to bind to {}: {}", addr, e)
            };
            OrgReadError::Io(std::io::Error::new(e.kind(), error_msg))
        })?;

        log::info!("listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                OrgReadError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("HTTP server error: {}", e),
                ))
            })?;

        log::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the axum router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/organisations/:uuid", get(get_organisation))
        .route("/organisations/", get(missing_identifier))
        .route("/organisations", get(missing_identifier))
        .route("/health", get(handle_health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
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

    log::info!("Shutdown signal received");
}
