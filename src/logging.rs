//! Opt-in diagnostic logging.
//!
//! The library itself only emits `tracing` events; hosts that want them on a
//! console call `init()` once at startup. Verbosity follows the standard
//! `RUST_LOG` environment variable.

use tracing_subscriber::EnvFilter;

/// Install a console subscriber for this process. Safe to call more than
/// once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pdflight=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
