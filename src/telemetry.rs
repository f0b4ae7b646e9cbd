//! Logging setup for hosts embedding the core.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "petriboard=info";

static INSTALLED: OnceCell<bool> = OnceCell::new();

/// Install a `tracing` fmt subscriber honoring `RUST_LOG`.
///
/// Safe to call more than once. Returns false if another global subscriber
/// was already set by the host.
pub fn init() -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .is_ok()
    })
}
