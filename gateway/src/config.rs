use anyhow::Context;
use gateway_config::Config;

use crate::args::Args;

/// Reads the configuration file, then applies the command line on top of it.
pub(crate) fn load(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::load(&args.config)
        .context("loading the gateway configuration")?
        .unwrap_or_default();

    if let Some(listen_address) = args.listen_address {
        config.network.listen_address = Some(listen_address);
    }

    if let Some(ref upstream_url) = args.upstream_url {
        config.upstream.url = Some(upstream_url.clone());
    }

    Ok(config)
}
