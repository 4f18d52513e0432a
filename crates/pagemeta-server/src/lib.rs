//! HTTP server integration for path-based page metadata.
//!
//! This crate wires a [`pagemeta::Resolver`] into an axum application:
//! - Middleware that resolves `{title, description}` for document
//!   requests and stores it in request extensions before handlers run
//! - A page handler that renders the resolved metadata into HTML
//! - A JSON API endpoint for explicit lookups
//!
//! # Quick Start
//!
//! ```ignore
//! use std::collections::BTreeMap;
//! use pagemeta_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut pages = BTreeMap::new();
//!     pages.insert("/".to_owned(), serde_json::json!(["Home", "Welcome"]));
//!
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 8080,
//!         pages,
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Failure policy
//!
//! The core resolver reports misses as typed errors and never substitutes
//! a default on its own. This crate owns the recovery policy: a miss is
//! logged at the configured severity and answered with the root entry.
//! Only a genuinely broken configuration surfaces as a 500.

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use pagemeta::{MetaStore, Resolver};
use pagemeta_config::MissingLevel;
use state::AppState;

pub use middleware::meta::{PathWithoutLocale, RequestTranslator, ResponseStatus};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Raw page metadata entries, validated at startup.
    pub pages: BTreeMap<String, serde_json::Value>,
    /// Severity for logging recoverable metadata misses.
    pub missing_level: MissingLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            pages: BTreeMap::new(),
            missing_level: MissingLevel::default(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the page entries fail validation or the server
/// fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Entry validation happens here, once; an invalid config aborts
    // startup instead of surfacing during request handling.
    let store = MetaStore::from_raw(config.pages)?;

    let state = Arc::new(AppState {
        resolver: Resolver::new(store),
        missing_level: config.missing_level,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from a loaded config file.
#[must_use]
pub fn server_config_from_config(config: &pagemeta_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        pages: config.metadata.pages.clone(),
        missing_level: config.metadata.missing_level,
    }
}
