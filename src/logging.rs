//! # Logging
//!
//! Installs the global `tracing` subscriber.
//!
//! Output goes through a non-blocking stdout writer so a slow terminal never
//! stalls the sampler or writer tasks. `RUST_LOG` takes precedence over the
//! configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Build the filter for `config`, preferring `RUST_LOG` when it is set.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    env_filter_with(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), config)
}

/// Build the filter from an explicit `RUST_LOG` value.
///
/// An unset or unparsable directive falls back to the configured level.
pub fn env_filter_with(rust_log: Option<&str>, config: &LoggingConfig) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(&config.level))
}

/// Install the subscriber.
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes and stops the background writer.
pub fn init(config: &LoggingConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(writer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    fn config(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
        }
    }

    #[test]
    fn test_filter_uses_configured_level() {
        let filter = env_filter_with(None, &config("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_rust_log_overrides_configured_level() {
        let filter = env_filter_with(Some("trace"), &config("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_invalid_rust_log_falls_back_to_config() {
        let filter = env_filter_with(Some("joystick_bridge=notalevel"), &config("error"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }
}
