//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber.
//!
//! - Log level comes from `RUST_LOG` (default `info`).
//! - Module paths are hidden (`with_target(false)`); the structured fields
//!   (`method`, `path`, `status`, `endpoint`) carry the context.
//! - **Development** uses the compact format with colors.
//! - **Production** uses the full format without ANSI escapes, for log collectors.
//!
//! ## What Gets Traced
//!
//! - **Boot**: every installed rule (`Installing rule method=POST path=/api/v1/user`)
//! - **Requests**: one `Request` line per request with status and latency
//! - **Failures**: procedure errors and unexpected replies at `ERROR`, inside a
//!   `request{endpoint=...}` span; rejected input at `DEBUG`
//!
//! ```bash
//! RUST_LOG=info PORT=3000 cargo run -p api-server
//! RUST_LOG=debug PORT=3000 cargo run -p api-server   # also shows rejected inputs
//! ```

use crate::config::Environment;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match environment {
        Environment::Development => builder.compact().init(),
        Environment::Production => builder.with_ansi(false).init(),
    }
}
