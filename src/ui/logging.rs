//! ui::logging
//!
//! Installs the `tracing` subscriber for the binary.
//!
//! Events go to stderr. The filter comes from `TWIG_LOG` (same syntax as
//! `RUST_LOG`) and defaults to `warn`; `--debug` raises Twig's own events
//! to `debug`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TWIG_LOG";

/// Build the filter for the given `--debug` setting.
pub fn filter(debug: bool) -> EnvFilter {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    if debug {
        match "twig=debug".parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    } else {
        filter
    }
}

/// Install the global subscriber.
///
/// Installing twice is harmless; the first subscriber stays.
pub fn init(debug: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter(debug))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
