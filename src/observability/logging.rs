//! Logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter. Falls back to `RUST_LOG`.
pub const LOG_FILTER_ENV: &str = "SESSION_JOURNAL_LOG";

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, defaulting to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Event filter.
    pub filter: EnvFilter,
    /// Output format.
    pub format: LogFormat,
    /// Log file; stderr when absent.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds the logging config from file settings and the verbose flag.
    ///
    /// Precedence for the filter: `SESSION_JOURNAL_LOG`, then `RUST_LOG`,
    /// then `debug` if verbose, then the configured level, then `warn`.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let env_directive = std::env::var(LOG_FILTER_ENV)
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .filter(|v| !v.trim().is_empty());
        let configured = settings.and_then(|s| s.level.clone());
        let directive = resolve_directive(env_directive, verbose, configured);

        let format = settings
            .and_then(|s| s.format.as_deref())
            .map(LogFormat::parse)
            .unwrap_or_default();

        Self {
            filter: build_filter(&directive),
            format,
            file: settings.and_then(|s| s.file.clone()),
        }
    }
}

fn resolve_directive(env: Option<String>, verbose: bool, configured: Option<String>) -> String {
    if let Some(directive) = env {
        return directive;
    }
    if verbose {
        return VERBOSE_LEVEL.to_string();
    }
    configured.unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter {directive:?}: {e}");
        EnvFilter::new(DEFAULT_LEVEL)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("json", LogFormat::Json; "json")]
    #[test_case("JSON ", LogFormat::Json; "json uppercase")]
    #[test_case("pretty", LogFormat::Pretty; "pretty")]
    #[test_case("xml", LogFormat::Pretty; "unknown falls back")]
    fn test_log_format_parse(input: &str, expected: LogFormat) {
        assert_eq!(LogFormat::parse(input), expected);
    }

    #[test]
    fn test_resolve_directive_precedence() {
        let env = Some("trace".to_string());
        let configured = Some("info".to_string());
        assert_eq!(resolve_directive(env, true, configured.clone()), "trace");
        assert_eq!(resolve_directive(None, true, configured.clone()), "debug");
        assert_eq!(resolve_directive(None, false, configured), "info");
        assert_eq!(resolve_directive(None, false, None), "warn");
    }

    #[test]
    fn test_settings_format_and_file() {
        let settings = LoggingSettings {
            level: Some("info".to_string()),
            format: Some("json".to_string()),
            file: Some(PathBuf::from("/tmp/journal.log")),
        };
        let config = LoggingConfig::from_settings(Some(&settings), false);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/journal.log")));
    }
}
