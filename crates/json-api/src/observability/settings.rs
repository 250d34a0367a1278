//! Process-global observability runtime settings.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ServerConfig;

const DEFAULT_SLOW_REQUEST_THRESHOLD_MS: u64 = 1_000;

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(DEFAULT_SLOW_REQUEST_THRESHOLD_MS);

pub(super) fn apply_runtime_config(config: &ServerConfig) {
    SLOW_REQUEST_THRESHOLD_MS.store(
        config.observability.slow_request_threshold_ms,
        Ordering::Relaxed,
    );
}

pub(super) fn slow_request_threshold_ms() -> u64 {
    SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn applies_slow_request_threshold_from_config() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "alero-json",
            "--catalog-base-url",
            "https://tienda.example.cl",
            "--payments-endpoint",
            "https://pagos.example.cl/orders",
            "--slow-request-threshold-ms",
            "250",
        ])?;

        apply_runtime_config(&config);

        assert_eq!(slow_request_threshold_ms(), 250);

        Ok(())
    }
}
