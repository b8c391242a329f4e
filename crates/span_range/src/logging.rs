//! Tracing subscriber setup for tests and tools built on this crate.
//!
//! The filter comes from `RUST_LOG` and defaults to `off`, so decode
//! diagnostics only show up when asked for, e.g.
//! `RUST_LOG=span_range=debug`.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Installs a global subscriber with:
/// - Env filter from RUST_LOG (defaults to "off")
/// - Compact `fmt` layer with targets, writing through the test writer
///
/// Later calls do nothing, and so does a call made after the host program
/// installed its own subscriber.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(true).with_test_writer())
            .try_init();
    });
}
