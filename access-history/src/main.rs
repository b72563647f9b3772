//! Access History Main Entry Point
//!
//! Loads one asset's transaction history, resolves actor names and prints
//! the ranked accessors and chart coordinates as JSON.

use access_history::{build_report, Dependencies, HistoryError, LogFormat};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "access_history=info,access_history_pipeline=info,access_history_resolver=info",
        )
    });

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Pretty => {
            // stdout carries the report, so logs go to stderr
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stderr)
                        .pretty(),
                )
                .init();
        }
    }

    info!(
        service_name = "access-history",
        service_version = env!("CARGO_PKG_VERSION"),
        log_format = ?format,
        "Tracing initialized"
    );
}

fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<(), HistoryError> {
    // Load environment variables from .env file
    dotenv().ok();

    // Read quietly so nothing is logged before the subscriber exists.
    // Settings::from_env parses it again and warns on an invalid value.
    init_tracing(LogFormat::from_env());

    let deps = match Dependencies::new() {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let report = match build_report(&deps, unix_now()).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Failed to build access history report");
            return Err(e);
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
