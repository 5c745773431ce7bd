use url::Url;

use crate::{
    error::{FetchError, FetchResult},
    fetch::{FetchRequest, FetchResponse, Fetcher, FetcherInner},
};

/// Talks to the upstream over HTTP with a single shared reqwest client.
///
/// One attempt per call, the client's default timeouts and connection pool.
pub struct NativeFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl NativeFetcher {
    pub fn runtime_fetcher(base_url: Url) -> Fetcher {
        Fetcher::new(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    fn url(&self, path: &str) -> FetchResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');

        Url::parse(&format!("{base}{path}")).map_err(|e| FetchError::Request(e.to_string()))
    }
}

#[async_trait::async_trait]
impl FetcherInner for NativeFetcher {
    async fn fetch(&self, request: FetchRequest) -> FetchResult<FetchResponse> {
        let url = self.url(&request.path)?;
        let mut request_builder = self.client.request(request.method.into(), url);

        if !request.query.is_empty() {
            request_builder = request_builder.query(&request.query);
        }

        if let Some(body) = &request.json_body {
            request_builder = request_builder.json(body);
        }

        let response = request_builder.send().await.map_err(|e| {
            if e.is_builder() {
                FetchError::Request(e.to_string())
            } else {
                FetchError::NoResponse(e.to_string())
            }
        })?;

        let status = response.status();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::NoResponse(e.to_string()))?;

        Ok(FetchResponse { status, bytes })
    }
}
