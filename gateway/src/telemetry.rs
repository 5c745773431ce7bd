use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::args::Args;

/// Installs the global subscriber: the chosen log style, filtered by the log level.
pub(crate) fn init(args: &Args) {
    let env_filter = EnvFilter::new(args.log_level.as_filter_str());

    tracing_subscriber::registry()
        .with(args.log_format())
        .with(env_filter)
        .init();
}

/// Human friendly logs for local development, filtered by `__CATALOG_RUST_LOG`.
pub(crate) fn init_development(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_default();

    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .without_time()
        .init();
}
