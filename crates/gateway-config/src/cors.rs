use std::time::Duration;

use ascii::AsciiString;
use duration_str::deserialize_option_duration;
use http::{header::InvalidHeaderName, HeaderName, HeaderValue};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, ExposeHeaders};
use url::Url;

#[derive(Clone, Default, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// If false (or not defined), credentials are not allowed in requests
    pub allow_credentials: bool,
    /// Origins from which we allow requests.
    ///
    /// This can be:
    /// - `{ allow_origins = "any" }` - Allows any origin (equivalent to "*")
    /// - `{ allow_origins = ["http://localhost:3000"] }` - Allows specific origins
    /// - `{ allow_origins = { wildcard = ["*.example.com"] } }` - Allows subdomains of a domain
    pub allow_origins: Option<AnyOrUrlArray>,
    /// Maximum time between OPTIONS and the next request
    #[serde(deserialize_with = "deserialize_option_duration")]
    pub max_age: Option<Duration>,
    /// HTTP methods allowed to the endpoint.
    pub allow_methods: Option<AnyOrHttpMethodArray>,
    /// Headers allowed in incoming requests
    pub allow_headers: Option<AnyOrAsciiStringArray>,
    /// Headers exposed to the browser in responses
    pub expose_headers: Option<AnyOrAsciiStringArray>,
    /// If set, allows browsers from private network to connect
    pub allow_private_network: bool,
}

#[derive(Debug, PartialEq, Clone, Copy, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Connect,
    Patch,
    Trace,
}

impl From<HttpMethod> for http::Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Options => http::Method::OPTIONS,
            HttpMethod::Connect => http::Method::CONNECT,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Trace => http::Method::TRACE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[serde(expecting = "expecting string \"any\", an array of urls, or wildcard patterns like \"*.example.com\"")]
pub enum AnyOrUrlArray {
    Any,
    /// Subdomain patterns such as `*.example.com`. The apex domain itself does not match.
    Wildcard(Vec<String>),
    #[serde(untagged)]
    Explicit(Vec<Url>),
}

impl AnyOrUrlArray {
    /// Whether a request `Origin` header value is allowed.
    pub fn matches(&self, origin: &str) -> bool {
        match self {
            AnyOrUrlArray::Any => true,
            AnyOrUrlArray::Explicit(origins) => origins.iter().any(|url| origin == origin_of(url)),
            AnyOrUrlArray::Wildcard(patterns) => {
                let Some(host) = Url::parse(origin).ok().and_then(|url| url.host_str().map(str::to_owned)) else {
                    return false;
                };

                patterns.iter().any(|pattern| match pattern.strip_prefix("*.") {
                    Some(domain) => host
                        .strip_suffix(domain)
                        .is_some_and(|subdomain| subdomain.len() > 1 && subdomain.ends_with('.')),
                    None if pattern.contains("://") => origin == pattern,
                    None => host == *pattern,
                })
            }
        }
    }
}

/// Browsers send origins without the trailing slash `Url` adds to an empty path.
fn origin_of(url: &Url) -> &str {
    url.as_str().strip_suffix('/').unwrap_or(url.as_str())
}

impl From<AnyOrUrlArray> for AllowOrigin {
    fn from(value: AnyOrUrlArray) -> Self {
        match value {
            AnyOrUrlArray::Any => AllowOrigin::any(),
            AnyOrUrlArray::Explicit(ref origins) => {
                // serialized urls are always ascii
                let origins = origins
                    .iter()
                    .filter_map(|url| HeaderValue::from_str(origin_of(url)).ok())
                    .collect::<Vec<_>>();

                AllowOrigin::list(origins)
            }
            AnyOrUrlArray::Wildcard(_) => AllowOrigin::predicate(move |origin: &HeaderValue, _: &http::request::Parts| {
                origin.to_str().is_ok_and(|origin| value.matches(origin))
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[serde(expecting = "expecting string \"any\", or an array of capitalized HTTP methods")]
pub enum AnyOrHttpMethodArray {
    Any,
    #[serde(untagged)]
    Explicit(Vec<HttpMethod>),
}

impl From<AnyOrHttpMethodArray> for AllowMethods {
    fn from(value: AnyOrHttpMethodArray) -> Self {
        match value {
            AnyOrHttpMethodArray::Any => AllowMethods::any(),
            AnyOrHttpMethodArray::Explicit(methods) => {
                AllowMethods::list(methods.into_iter().map(http::Method::from))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[serde(expecting = "expecting string \"any\", or an array of ASCII strings")]
pub enum AnyOrAsciiStringArray {
    Any,
    #[serde(untagged)]
    Explicit(Vec<AsciiString>),
}

impl AnyOrAsciiStringArray {
    fn header_names(headers: &[AsciiString]) -> Result<Vec<HeaderName>, InvalidHeaderName> {
        headers
            .iter()
            .map(|header| HeaderName::from_bytes(header.as_bytes()))
            .collect()
    }
}

impl TryFrom<AnyOrAsciiStringArray> for AllowHeaders {
    type Error = InvalidHeaderName;

    fn try_from(value: AnyOrAsciiStringArray) -> Result<Self, Self::Error> {
        Ok(match value {
            AnyOrAsciiStringArray::Any => AllowHeaders::any(),
            AnyOrAsciiStringArray::Explicit(headers) => {
                AllowHeaders::list(AnyOrAsciiStringArray::header_names(&headers)?)
            }
        })
    }
}

impl TryFrom<AnyOrAsciiStringArray> for ExposeHeaders {
    type Error = InvalidHeaderName;

    fn try_from(value: AnyOrAsciiStringArray) -> Result<Self, Self::Error> {
        Ok(match value {
            AnyOrAsciiStringArray::Any => ExposeHeaders::any(),
            AnyOrAsciiStringArray::Explicit(headers) => {
                ExposeHeaders::list(AnyOrAsciiStringArray::header_names(&headers)?)
            }
        })
    }
}
