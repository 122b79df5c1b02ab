//! Diagnostic logging to stderr.
//!
//! The library only emits [`tracing`] events; this module installs the subscriber that prints them. Standard output is
//! left to the report alone.
//!
//! Levels in use:
//! - `info`: run start and finish
//! - `debug`: balks, customers joining the line, report emission, completion of the driver loop
//! - `trace`: every dispatched event and every service start
//!
//! `RUST_LOG` takes precedence over the level passed to [`init()`], so for example
//! `RUST_LOG=forecourt::engine=trace` shows the dispatch log without the station's own messages.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a stderr subscriber filtered at `level` ("trace", "debug", "info", "warn", "error" or any `EnvFilter`
/// directive), unless `RUST_LOG` says otherwise.
///
/// Does nothing if a global subscriber is already installed, so calling it more than once is harmless.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .try_init();

    if installed.is_ok() {
        tracing::debug!(level, "logging initialized");
    }
}
