mod handlers;
pub mod routes;
mod state;
mod v1;


use std::net::IpAddr;

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

pub use state::AppState;

/// API server errors
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(agenda::api::bind),
        help("Is another process already listening on this port? Try --port.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(agenda::api::serve))]
    Serve(#[from] std::io::Error),
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log verbosity (0 = info, 1 = debug, 2+ = trace)
    pub verbosity: u8,
    /// Serve the OpenAPI documentation UI at /docs
    pub enable_docs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            verbosity: 0,
            enable_docs: true,
        }
    }
}

/// Default log filter for a verbosity level.
pub(crate) fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "agenda=info,tower_http=info",
        1 => "agenda=debug,tower_http=debug",
        _ => "agenda=trace,tower_http=trace,sqlx=debug",
    }
}

/// Initialize tracing subscriber with env filter
///
/// `RUST_LOG` takes precedence over the verbosity level.
fn init_tracing(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbosity).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Run the API server with the given configuration and database.
///
/// Serves until Ctrl-C, then returns so the caller can close the database.
pub async fn run<D: Database + 'static>(
    config: Config,
    db: std::sync::Arc<D>,
) -> Result<(), ApiError> {
    init_tracing(config.verbosity);

    let state = AppState::from_arc(db);
    let app = routes::create_router(state, config.enable_docs).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; serve until the process is killed.
        std::future::pending::<()>().await;
    }
}
