use gateway_config::{AnyOrAsciiStringArray, AnyOrHttpMethodArray, AnyOrUrlArray, CorsConfig};
use http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer, ExposeHeaders};

const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Builds the CORS layer. Without configuration the catalog front end on
/// `http://localhost:3000` may call the endpoint with credentials.
pub(crate) fn generate(config: Option<CorsConfig>) -> crate::Result<CorsLayer> {
    let Some(config) = config else {
        return Ok(default_layer());
    };

    if config.allow_credentials {
        reject_wildcards_with_credentials(&config)?;
    }

    let CorsConfig {
        allow_credentials,
        allow_origins,
        max_age,
        allow_methods,
        allow_headers,
        expose_headers,
        allow_private_network,
    } = config;

    let mut cors_layer = CorsLayer::new()
        .allow_credentials(allow_credentials)
        .allow_private_network(allow_private_network);

    if let Some(allow_origins) = allow_origins {
        cors_layer = cors_layer.allow_origin(AllowOrigin::from(allow_origins));
    }

    if let Some(max_age) = max_age {
        cors_layer = cors_layer.max_age(max_age);
    }

    if let Some(allow_methods) = allow_methods {
        cors_layer = cors_layer.allow_methods(allow_methods);
    }

    if let Some(allow_headers) = allow_headers {
        let allow_headers = AllowHeaders::try_from(allow_headers).map_err(|e| crate::Error::Cors(e.to_string()))?;
        cors_layer = cors_layer.allow_headers(allow_headers);
    }

    if let Some(expose_headers) = expose_headers {
        let expose_headers = ExposeHeaders::try_from(expose_headers).map_err(|e| crate::Error::Cors(e.to_string()))?;
        cors_layer = cors_layer.expose_headers(expose_headers);
    }

    Ok(cors_layer)
}

fn default_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([HeaderValue::from_static(DEFAULT_ORIGIN)]))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Browsers refuse `*` together with credentials, and tower-http panics on it.
fn reject_wildcards_with_credentials(config: &CorsConfig) -> crate::Result<()> {
    let wildcard = if matches!(config.allow_origins, Some(AnyOrUrlArray::Any)) {
        Some("allow_origins")
    } else if matches!(config.allow_methods, Some(AnyOrHttpMethodArray::Any)) {
        Some("allow_methods")
    } else if matches!(config.allow_headers, Some(AnyOrAsciiStringArray::Any)) {
        Some("allow_headers")
    } else if matches!(config.expose_headers, Some(AnyOrAsciiStringArray::Any)) {
        Some("expose_headers")
    } else {
        None
    };

    match wildcard {
        Some(setting) => Err(crate::Error::Cors(format!(
            "{setting} cannot be \"any\" when allow_credentials is set"
        ))),
        None => Ok(()),
    }
}
