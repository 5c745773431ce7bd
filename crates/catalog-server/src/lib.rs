//! The HTTP face of the item catalog: the GraphQL endpoint, the explorer page and the
//! CORS policy, served with graceful shutdown.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod cors;
mod error;
mod explorer;

use std::{net::SocketAddr, time::Duration};

use async_graphql_axum::GraphQL;
use axum::Router;
use catalog_upstream::{Fetcher, NativeFetcher};
use gateway_config::Config;
use tokio::signal;

pub use error::{Error, Result};

const EXPLORER_PATH: &str = "/";
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(3);

/// Start parameters for the catalog server.
pub struct ServeConfig {
    /// The address the server listens on.
    pub listen_address: SocketAddr,
    /// The gateway configuration, with command line overrides already applied.
    pub config: Config,
}

/// Starts the server and serves requests until a termination signal arrives.
pub async fn serve(ServeConfig { listen_address, config }: ServeConfig) -> crate::Result<()> {
    let upstream = config.upstream.url();
    tracing::info!("Forwarding catalog requests to {upstream}");

    let router = router(&config, NativeFetcher::runtime_fetcher(upstream))?;

    bind(listen_address, &config, router).await
}

/// The application routes: the GraphQL endpoint (GET and POST) at the configured path,
/// the explorer page at `/` if enabled, all behind the CORS layer.
pub fn router(config: &Config, fetcher: Fetcher) -> crate::Result<Router> {
    let path = config.graph.path();

    if !path.starts_with('/') {
        return Err(Error::GraphPath {
            path: path.to_string(),
            reason: "must start with a slash",
        });
    }

    if let Some(reason) = invalid_route(path) {
        return Err(Error::GraphPath {
            path: path.to_string(),
            reason,
        });
    }

    if config.graph.explorer && path == EXPLORER_PATH {
        return Err(Error::GraphPath {
            path: path.to_string(),
            reason: "the explorer is served at /, disable it or move the endpoint",
        });
    }

    let mut schema = catalog_schema::schema_builder(fetcher);

    if !config.graph.introspection {
        schema = schema.disable_introspection();
    }

    let mut router = Router::new().route_service(path, GraphQL::new(schema.finish()));

    if config.graph.explorer {
        router = router.route(EXPLORER_PATH, explorer::route(path));
    }

    Ok(router.layer(cors::generate(config.cors.clone())?))
}

/// Paths axum would read as a pattern or refuse to route.
fn invalid_route(path: &str) -> Option<&'static str> {
    if path.contains("//") {
        return Some("must not contain empty segments");
    }

    if path.contains(['*', ':', '{', '}']) {
        return Some("must be a literal path without `*`, `:`, `{` or `}`");
    }

    None
}

async fn bind(addr: SocketAddr, config: &Config, router: Router) -> crate::Result<()> {
    let app = router.into_make_service();

    let handle = axum_server::Handle::new();

    // Spawn a task to gracefully shutdown server.
    tokio::spawn(graceful_shutdown(handle.clone()));

    tracing::info!("GraphQL endpoint exposed at http://{addr}{}", config.graph.path());

    if config.graph.explorer {
        tracing::info!("Explorer available at http://{addr}{EXPLORER_PATH}");
    }

    axum_server::bind(addr)
        .handle(handle)
        .serve(app)
        .await
        .map_err(crate::Error::Server)
}

/// Waits for Ctrl+C or SIGTERM, then lets in-flight requests finish before stopping.
async fn graceful_shutdown(handle: axum_server::Handle) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
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

    tracing::info!("Shutting down gracefully...");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}
