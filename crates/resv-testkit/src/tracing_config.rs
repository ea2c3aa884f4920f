//! Opt-in tracing for test runs.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a compact subscriber capturing client and testkit debug logs.
///
/// Safe to call from every test; only the first call installs anything.
/// `RUST_LOG` overrides the default filter.
pub fn init_test_tracing() {
    init_test_tracing_with_filter("info,resv_client=debug,resv_testkit=debug");
}

/// Like [`init_test_tracing`] with an explicit default filter.
pub fn init_test_tracing_with_filter(filter: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .with_ansi(true)
            .compact()
            .init();
    });
}
