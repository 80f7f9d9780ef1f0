//! Console logging setup.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset. Verbose mode surfaces reqwest's
/// connection-level traffic log.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,reqwest::connect::verbose=trace,hyper_util=debug"
    } else {
        "info"
    }
}

/// Install the global fmt subscriber writing to stdout.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_enables_transport_trace() {
        assert_eq!(default_filter(false), "info");
        assert!(default_filter(true).contains("reqwest::connect::verbose=trace"));
        assert!(EnvFilter::try_new(default_filter(true)).is_ok());
    }
}
