//! TDS engine HTTP server.
//!
//! Environment:
//! - `TDS_ENGINE_ADDR`: listen address, default `127.0.0.1:3000`
//! - `TDS_CATALOG_PATH`: rule catalog YAML; the built-in catalog when unset
//! - `RUST_LOG`: tracing filter, default `info`

use std::env;

use tds_engine::api::{AppState, create_router};
use tds_engine::config::RuleCatalog;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let catalog = match env::var("TDS_CATALOG_PATH") {
        Ok(path) => RuleCatalog::load(&path),
        Err(_) => RuleCatalog::builtin(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(err) => {
            error!(error = %err, "Failed to load rule catalog");
            std::process::exit(1);
        }
    };

    info!(
        catalog = %catalog.metadata().name,
        version = %catalog.metadata().version,
        rules = catalog.len(),
        "Rule catalog loaded"
    );

    let addr = env::var("TDS_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %addr, error = %err, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "TDS engine listening");
    if let Err(err) = axum::serve(listener, create_router(AppState::new(catalog))).await {
        error!(error = %err, "Server error");
        std::process::exit(1);
    }
}
