#![cfg_attr(test, allow(unused_crate_dependencies))]

use args::Args;
use catalog_server::ServeConfig;
use clap::crate_version;
use mimalloc::MiMalloc;
use tokio::runtime;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod args;
mod config;
mod telemetry;

const THREAD_NAME: &str = "item-catalog-gateway";

fn main() -> anyhow::Result<()> {
    let args: Args = self::args::parse();
    let config = self::config::load(&args)?;

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name(THREAD_NAME)
        .build()?;

    runtime.block_on(async move {
        match std::env::var("__CATALOG_RUST_LOG") {
            Ok(filter) => telemetry::init_development(&filter),
            Err(_) => telemetry::init(&args),
        }

        let crate_version = crate_version!();
        tracing::info!("Item Catalog Gateway {crate_version}");

        let config = ServeConfig {
            listen_address: config.network.listen_address(),
            config,
        };

        catalog_server::serve(config).await?;

        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}
