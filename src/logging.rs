//! Logging initialiser.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Install the global subscriber: `RUST_LOG` filter + compact formatter.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt = fmt::layer().with_target(true).compact();

    let _ = tracing_subscriber::registry().with(filter).with(fmt).try_init();
}
