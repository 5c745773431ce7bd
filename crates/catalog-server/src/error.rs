/// The catalog server error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The `[graph]` path cannot be routed
    #[error("invalid graph path {path:?}: {reason}")]
    GraphPath { path: String, reason: &'static str },
    /// The CORS settings cannot be combined
    #[error("invalid CORS configuration: {0}")]
    Cors(String),
    /// Cannot start the HTTP server
    #[error("starting server: {0}")]
    Server(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
