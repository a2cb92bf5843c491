//! Log output for the `vnpay` binary.
//!
//! Library code only emits `tracing` events. Payment audit events use the
//! `vnpay::audit` target and operational diagnostics use `vnpay::diagnostics`,
//! so the two can be routed separately with `RUST_LOG` directives.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a stderr formatter. `RUST_LOG` wins when set; otherwise `verbose`
/// selects `debug` and the default is `info`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests driving `run`) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();
}
