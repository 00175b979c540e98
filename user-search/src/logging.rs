//! Tracing subscriber setup.

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Local timestamp layout, e.g. `2024-05-01 03:04:05 pm`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S %P";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let timer = ChronoLocal::new(TIMESTAMP_FORMAT.to_string());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
