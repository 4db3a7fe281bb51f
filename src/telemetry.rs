//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Filter directive for the configured level. `verbose` forces debug output.
#[must_use]
pub fn filter_directive(logging: &LoggingConfig, verbose: bool) -> String {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    format!("aerosight={level},tower_http={level}")
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the config.
pub fn init(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(logging, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match logging.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    result.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        let logging = LoggingConfig {
            level: "warn".to_string(),
            format: "json".to_string(),
        };
        assert_eq!(filter_directive(&logging, false), "aerosight=warn,tower_http=warn");
        assert_eq!(filter_directive(&logging, true), "aerosight=debug,tower_http=debug");
    }
}
