use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{error_body_message, ClassifiedError, FetchError, FetchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum UpstreamMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl From<UpstreamMethod> for http::Method {
    fn from(value: UpstreamMethod) -> Self {
        match value {
            UpstreamMethod::Get => http::Method::GET,
            UpstreamMethod::Post => http::Method::POST,
            UpstreamMethod::Patch => http::Method::PATCH,
            UpstreamMethod::Delete => http::Method::DELETE,
        }
    }
}

/// A single call to the upstream. The path is appended to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: UpstreamMethod,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub json_body: Option<serde_json::Value>,
}

impl FetchRequest {
    pub fn new(method: UpstreamMethod, path: impl Into<String>) -> Self {
        FetchRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            json_body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(UpstreamMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(UpstreamMethod::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(UpstreamMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(UpstreamMethod::Delete, path)
    }

    #[must_use]
    pub fn with_query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// Attaches a JSON body. Serialization happens here, so a payload that cannot be
    /// represented as JSON fails before anything is sent.
    pub fn with_json(mut self, body: &impl Serialize) -> Result<Self, ClassifiedError> {
        let body = serde_json::to_value(body).map_err(|error| {
            let error = FetchError::Request(error.to_string());
            tracing::warn!(method = %self.method, path = %self.path, "{error}");
            ClassifiedError::from(error)
        })?;

        self.json_body = Some(body);
        Ok(self)
    }
}

/// The raw upstream answer, whatever its status.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub bytes: Bytes,
}

#[async_trait::async_trait]
pub trait FetcherInner: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> FetchResult<FetchResponse>;
}

/// Shared handle to the upstream transport.
#[derive(Clone)]
pub struct Fetcher {
    inner: Arc<dyn FetcherInner>,
}

impl Fetcher {
    pub fn new(fetcher: impl FetcherInner + 'static) -> Fetcher {
        Fetcher {
            inner: Arc::new(fetcher),
        }
    }

    /// Sends the request and returns the response body as JSON.
    pub async fn call(&self, request: FetchRequest) -> Result<serde_json::Value, ClassifiedError> {
        self.call_as(request).await
    }

    /// Sends the request and deserializes the response body into `T`.
    ///
    /// An empty success body is read as JSON `null`. Every failure is logged and
    /// classified; the caller only ever sees the [`ClassifiedError`].
    pub async fn call_as<T>(&self, request: FetchRequest) -> Result<T, ClassifiedError>
    where
        T: DeserializeOwned,
    {
        let method = request.method;
        let path = request.path.clone();

        tracing::debug!(%method, %path, "calling upstream");

        self.execute(request).await.map_err(|error| {
            let classified = ClassifiedError::from(&error);
            tracing::warn!(%method, %path, kind = %classified.kind, "upstream call failed: {error}");
            classified
        })
    }

    async fn execute<T>(&self, request: FetchRequest) -> FetchResult<T>
    where
        T: DeserializeOwned,
    {
        let FetchResponse { status, bytes } = self.inner.fetch(request).await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: error_body_message(status, &bytes),
            });
        }

        decode_body(&bytes)
    }
}

fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> FetchResult<T> {
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        bytes
    };

    serde_json::from_slice(bytes).map_err(|error| FetchError::InvalidBody(error.to_string()))
}
