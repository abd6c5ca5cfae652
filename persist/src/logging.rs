//! Diagnostic tracing for the `persist` binary.
//!
//! User-facing results go to stdout; tracing output goes to stderr so that
//! `persist list` stays pipe-friendly.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
fn fallback_directive(verbose: bool) -> &'static str {
    if verbose { "persist=debug,warn" } else { "warn" }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` turns on this crate's
/// debug events (read/write paths, entry counts).
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
