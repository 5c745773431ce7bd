use http::StatusCode;

/// Message surfaced when the upstream cannot be reached or fails internally.
pub const NETWORK_ERROR_MESSAGE: &str = "Cannot connect with server, please try again later";

/// Message surfaced when the call fails on our side before anything reached the upstream.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected server error, please try again later";

/// What went wrong while talking to the upstream, before classification.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be built or handed over to the HTTP client.
    #[error("could not send request: {0}")]
    Request(String),
    /// The request was sent but no response came back.
    #[error("no response from upstream: {0}")]
    NoResponse(String),
    /// The upstream responded with a non-success status.
    #[error("upstream responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The upstream responded successfully, but the body was not the JSON we expected.
    #[error("invalid upstream response body: {0}")]
    InvalidBody(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The upstream is unreachable or answered with a 500.
    NetworkError,
    /// The upstream answered with any other error status.
    GraphqlError,
    /// The call failed locally, or the upstream answer could not be used.
    Unexpected,
}

impl ErrorKind {
    /// The `code` error extension for this kind, if it carries one.
    ///
    /// Only network errors are tagged. Upstream error responses and local failures are
    /// reported with their message alone.
    pub fn extension_code(self) -> Option<&'static str> {
        match self {
            ErrorKind::NetworkError => Some(self.into()),
            ErrorKind::GraphqlError | ErrorKind::Unexpected => None,
        }
    }
}

/// A failed upstream call, in the shape it is reported to GraphQL clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClassifiedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ClassifiedError {
            kind,
            message: message.into(),
        }
    }

    pub fn network() -> Self {
        Self::new(ErrorKind::NetworkError, NETWORK_ERROR_MESSAGE)
    }

    pub fn unexpected() -> Self {
        Self::new(ErrorKind::Unexpected, UNEXPECTED_ERROR_MESSAGE)
    }
}

impl From<&FetchError> for ClassifiedError {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::Status { status, .. } if *status == StatusCode::INTERNAL_SERVER_ERROR => Self::network(),
            FetchError::Status { body, .. } => Self::new(ErrorKind::GraphqlError, body.as_str()),
            FetchError::NoResponse(_) => Self::network(),
            FetchError::Request(_) | FetchError::InvalidBody(_) => Self::unexpected(),
        }
    }
}

impl From<FetchError> for ClassifiedError {
    fn from(error: FetchError) -> Self {
        Self::from(&error)
    }
}

/// Renders an upstream error body as the message of a [`ClassifiedError`].
///
/// JSON bodies are re-serialized in compact form, anything else is passed through as text.
/// An empty body falls back to the canonical reason of the status.
pub(crate) fn error_body_message(status: StatusCode, bytes: &[u8]) -> String {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return status.canonical_reason().unwrap_or(status.as_str()).to_string();
    }

    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(value) => value.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).trim().to_string(),
    }
}
