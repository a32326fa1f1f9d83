use crate::config::LogFormat;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "entity_pages=debug,info"
    } else {
        "entity_pages=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Compact lines for terminals; JSON lines for deployed instances, so log
/// collectors can index span fields. Both share one filter.
pub fn init_logger(format: LogFormat, verbose: bool) {
    fn layer<S>() -> fmt::Layer<S> {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
    }

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with((format == LogFormat::Compact).then(|| layer().compact()))
        .with((format == LogFormat::Json).then(|| layer().json()))
        .init();
}
