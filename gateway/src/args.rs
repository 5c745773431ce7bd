use std::{io::IsTerminal, net::SocketAddr, path::PathBuf};

use clap::Parser;
use tracing::Subscriber;
use tracing_subscriber::{registry::LookupSpan, Layer};
use url::Url;

mod log;

pub(crate) use log::{LogLevel, LogStyle};

pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Parser)]
#[command(name = "item-catalog-gateway", version)]
/// A GraphQL gateway in front of the item catalog REST service
pub(crate) struct Args {
    /// IP address on which the server will listen for incoming connections. Defaults to 127.0.0.1:4000.
    #[arg(short, long, env = "CATALOG_LISTEN_ADDRESS")]
    pub listen_address: Option<SocketAddr>,
    /// Base URL of the item REST service. Defaults to http://localhost:8080.
    #[arg(short, long, env = "CATALOG_UPSTREAM_URL")]
    pub upstream_url: Option<Url>,
    /// Path to the TOML configuration file
    #[arg(long, short, env = "CATALOG_CONFIG_PATH", default_value = "./item-catalog.toml")]
    pub config: PathBuf,
    /// Set the logging level
    #[arg(long = "log", env = "CATALOG_LOG", default_value_t = LogLevel::default())]
    pub log_level: LogLevel,
    /// Set the style of log output
    #[arg(long, env = "CATALOG_LOG_STYLE", default_value_t = LogStyle::Text)]
    pub log_style: LogStyle,
}

impl Args {
    pub fn log_format<S>(&self) -> BoxedLayer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
    {
        let layer = tracing_subscriber::fmt::layer();

        match self.log_style {
            // for interactive terminals we provide colored output
            LogStyle::Text if std::io::stdout().is_terminal() => layer.with_ansi(true).boxed(),
            // for server logs, colors are off
            LogStyle::Text => layer.with_ansi(false).boxed(),
            LogStyle::Json => layer.json().boxed(),
        }
    }
}

pub(crate) fn parse() -> Args {
    Args::parse()
}
