//! Log subscriber setup for the Lambda runtime.
//!
//! Everything written to stdout lands in the function's own `CloudWatch` log
//! group, which already timestamps each line, so the `fmt` layer skips
//! timestamps and ANSI colours.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber. Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
