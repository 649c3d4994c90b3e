//! Diagnostic logging for the command-line front end.
//!
//! The engine modules never log; the binary records what it resolved and
//! decided through these macros. User-facing output goes through `ui`.

pub use tracing::{debug, warn};

/// Install a stderr subscriber.
///
/// Defaults to `warn`, or `debug` when `verbose` is set. `RUST_LOG` takes
/// precedence over both:
///
/// ```bash
/// RUST_LOG=hooksync=trace hooksync install
/// ```
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}
