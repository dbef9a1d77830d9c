//! Diagnostic logging for the CLI.
//!
//! Warnings and progress from the core go to stderr through `tracing`;
//! reports meant for the user are printed to stdout by the commands.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default level (`info`, or `debug` when verbose).
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "powermap=debug,powermap_core=debug" } else { "info" })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
