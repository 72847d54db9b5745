//! Web server for anonbbs.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::board::BoardService;
use crate::config::WebConfig;

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Web server for the board API.
pub struct WebServer {
    /// Application state.
    app_state: Arc<AppState>,
    /// Web configuration.
    web_config: WebConfig,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &WebConfig, board: BoardService) -> Self {
        Self {
            app_state: Arc::new(AppState::new(board)),
            web_config: config.clone(),
        }
    }

    /// Build the complete router: API, health check and compression.
    pub fn router(&self) -> Router {
        create_router(self.app_state.clone(), &self.web_config)
            .merge(create_health_router())
            .layer(CompressionLayer::new())
    }

    async fn bind(&self) -> Result<TcpListener, std::io::Error> {
        let host = self.web_config.host.as_str();
        let listener = TcpListener::bind((host, self.web_config.port)).await?;
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);
        Ok(listener)
    }

    /// Run the web server until `shutdown` completes.
    ///
    /// In-flight requests are allowed to finish before this returns.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let listener = self.bind().await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("Web server stopped");
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = self.router();
        let listener = self.bind().await?;
        let local_addr = listener.local_addr()?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

/// Resolves on SIGINT or SIGTERM (ctrl-c only on non-unix platforms).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install ctrl-c handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tracing::debug!("Installed shutdown signal handlers");
    tokio::select! {
        _ = ctrl_c => (),
        _ = terminate => (),
    }
    tracing::info!("Shutdown signal received");
}
