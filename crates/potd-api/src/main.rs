//! Photo-of-the-day API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p potd-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use potd_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(e) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Initialize tracing (JSON output in production)
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        storage = ?config.storage,
        port = config.api.port,
        "Configuration loaded"
    );

    // Run the server
    if let Err(e) = potd_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
