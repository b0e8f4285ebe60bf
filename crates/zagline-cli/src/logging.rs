//! Tracing subscriber setup.
//!
//! Logs go to stderr so `generate -o -` keeps stdout clean. `RUST_LOG`
//! overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// The TUI owns the terminal, so in that mode nothing is logged unless
/// `RUST_LOG` asks for it.
pub fn init_tracing(interactive: bool) {
    let default = if interactive { "off" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
