//! Test support shared by unit and integration tests.

use std::sync::Once;

use tracing::trace;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset.
const DEFAULT_TEST_FILTER: &str = "looptree=trace";

static INIT: Once = Once::new();

/// Send `tracing` output of the code under test to the harness's captured output.
///
/// Only the first call per test binary installs a subscriber. If one is
/// already installed it is left alone.
pub fn init_test_setup() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));
        let installed = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .without_time()
            .with_span_events(FmtSpan::CLOSE)
            .try_init();
        if installed.is_ok() {
            trace!("test logging installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_repeated_calls_when_initialising_then_subscriber_is_set_once() {
        init_test_setup();
        init_test_setup();

        assert!(tracing::dispatcher::has_been_set());
    }
}
