use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::http::HttpTarget;
use crate::routes::build_api;
use api_contract::Api;
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{error, info};

/// The runtime orchestrator for the API server.
///
/// `ApiServer` is responsible for:
/// - **Compiling** the API table (any contract/resolver mismatch fails here)
/// - **Installing** every rule on an axum router
/// - **Serving** until a shutdown signal arrives
///
/// # Example
///
/// ```ignore
/// let server = ApiServer::new(ServerConfig::from_env()?)?;
/// server.start().await?;
/// ```
pub struct ApiServer {
    config: ServerConfig,
    api: Api,
    router: Router,
}

impl ApiServer {
    /// Builds the API and the router. Nothing is bound yet.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let api = build_api()?;

        let mut target = HttpTarget::new();
        api.install(&mut target);
        let router = target.into_router();

        Ok(Self {
            config,
            api,
            router,
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    /// The router with every rule installed. Cheap to clone.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves until Ctrl-C or SIGTERM.
    pub async fn start(self) -> Result<(), ServerError> {
        self.run_until(shutdown_signal()).await
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.addr()).await?;
        self.serve(listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` resolves, then lets
    /// in-flight requests finish.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;

        info!(%addr, environment = %self.config.environment, "Server listening");
        for rule in self.api.rules() {
            info!("   {} http://{}{}", rule.method(), addr, rule.endpoint().api_path());
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server closed");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
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
                error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received, shutting down gracefully");
}
