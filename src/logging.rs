//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set (always the case in the browser)
pub const DEFAULT_DIRECTIVE: &str = "portfolio_site=info";

/// Install the global subscriber.
///
/// Natively log lines go to stderr. In the browser they go to the devtools
/// console, without timestamps since the wasm target has no system clock.
/// Calling this more than once is harmless.
pub fn init(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());
    let registry = tracing_subscriber::registry().with(filter);

    #[cfg(not(target_arch = "wasm32"))]
    let result = registry
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    #[cfg(target_arch = "wasm32")]
    let result = registry
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_ansi(false)
                .with_writer(crate::web::ConsoleWriter::default),
        )
        .try_init();

    if let Err(err) = result {
        tracing::debug!("subscriber already installed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(DEFAULT_DIRECTIVE);
        init("debug");
        tracing::info!("logging initialised");
    }
}
