//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used when RUST_LOG is not set
pub fn default_filter(config: &LoggingConfig) -> String {
    format!("book_library={},tower_http={}", config.level, config.level)
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_targets_crate_and_http() {
        let cfg = LoggingConfig {
            level: "debug".into(),
            format: "pretty".into(),
        };
        assert_eq!(default_filter(&cfg), "book_library=debug,tower_http=debug");
    }
}
