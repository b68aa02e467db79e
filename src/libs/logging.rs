use std::sync::Once;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "mobile_chat_lib=info";

static INIT: Once = Once::new();

/// Installs the fmt subscriber once per process. `RUST_LOG` wins over
/// `filter`, which wins over the crate default.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_LOG_FILTER)));

        // Another subscriber may already be set by the host process.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .try_init();
    });
}
