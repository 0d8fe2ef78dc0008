//! # API Server
//!
//! Serves the route table of [`api_server::routes`] over HTTP.
//!
//! ```bash
//! PORT=3000 cargo run -p api-server
//! curl localhost:3000/api/v1/hello
//! curl -X POST -H 'content-type: application/json' -d '{"name":"Alice"}' localhost:3000/api/v1/user
//! ```

use api_server::config::ServerConfig;
use api_server::error::ServerError;
use api_server::lifecycle::{setup_tracing, ApiServer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;

    // Setup tracing once for the entire application
    setup_tracing(config.environment);

    info!(%config, "Starting API server");

    // Any contract/resolver mismatch stops the process here
    let server = ApiServer::new(config)?;
    server.start().await?;

    info!("Application completed successfully");
    Ok(())
}
