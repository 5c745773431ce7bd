//! Configuration of the item catalog gateway, read from an optional TOML file.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod cors;

use std::{
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use url::Url;

pub use cors::{AnyOrAsciiStringArray, AnyOrHttpMethodArray, AnyOrUrlArray, CorsConfig, HttpMethod};

pub const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 4000);
pub const DEFAULT_GRAPH_PATH: &str = "/graphql";
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read the configuration at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub network: NetworkConfig,
    pub graph: GraphConfig,
    pub upstream: UpstreamConfig,
    /// Without a `[cors]` section the server applies its built-in policy.
    pub cors: Option<CorsConfig>,
}

impl Config {
    /// Reads the configuration file. A missing file is not an error and returns `None`.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Config>, ConfigError> {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&content).map(Some).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    pub listen_address: Option<SocketAddr>,
}

impl NetworkConfig {
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address.unwrap_or(DEFAULT_LISTEN_ADDRESS)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    pub path: Option<String>,
    /// Serve the GraphiQL explorer at `/`
    pub explorer: bool,
    pub introspection: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: None,
            explorer: true,
            introspection: true,
        }
    }
}

impl GraphConfig {
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(DEFAULT_GRAPH_PATH)
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL of the item REST API
    pub url: Option<Url>,
}

impl UpstreamConfig {
    pub fn url(&self) -> Url {
        match self.url {
            Some(ref url) => url.clone(),
            None => Url::parse(DEFAULT_UPSTREAM_URL).unwrap_or_else(|_| unreachable!("static url is valid")),
        }
    }
}
