//! Assistant console server binary.
//! Run with: cargo run --bin assistant-console

use std::process::ExitCode;

use tracing::{error, info};

use assistant_console::config::AppConfig;
use assistant_console::server::{init_tracing, run_with_shutdown, shutdown_signal};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.server);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    info!(
        environment = ?config.server.environment,
        plugin = %config.assistant.default_plugin_name,
        "Starting assistant console"
    );

    match run_with_shutdown(config, shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}
