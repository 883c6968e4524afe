use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "WISHLIST_LOG";

fn build_env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "wishlist=debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber; diagnostics go to stderr so stdout stays
/// clean for list output and `--json`.
///
/// Calling it twice is harmless.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
