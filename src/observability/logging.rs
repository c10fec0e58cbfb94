//! Logging setup.
//!
//! `folio` logs through `tracing` to stderr, so `show` and
//! `validate --format json` keep stdout clean. `FOLIO_LOG` takes standard
//! `EnvFilter` directives and replaces the level chosen with `-v`.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::args::ColorChoice;

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "FOLIO_LOG";

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

/// Level for the `folio` target at a given `-v` count. Saturates at trace.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Directives used when `FOLIO_LOG` is unset.
///
/// The HTTP stack stays at `warn` until `-vvv`; below that its per-connection
/// debug output drowns out request handling.
#[must_use]
pub fn default_directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    if verbosity >= 3 {
        level.to_string()
    } else {
        format!("warn,folio={level}")
    }
}

fn use_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    }
}

/// Installs the global subscriber.
///
/// Repeated calls are ignored, which keeps tests that log from racing.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));
    let show_target = verbosity >= 2;
    let registry = tracing_subscriber::registry().with(filter);

    let _ = match format {
        LogFormat::Human => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi(color))
                    .with_target(show_target),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false)
                    .with_target(show_target),
            )
            .try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_saturate_at_trace() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(200), "trace");
    }

    #[test]
    fn dependencies_stay_quiet_below_trace() {
        assert_eq!(default_directives(0), "warn,folio=warn");
        assert_eq!(default_directives(2), "warn,folio=debug");
        assert_eq!(default_directives(3), "trace");
    }

    #[test]
    fn directives_are_valid_filters() {
        for v in 0..4 {
            assert!(EnvFilter::try_new(default_directives(v)).is_ok());
        }
    }

    #[test]
    fn log_format_parses_from_cli_value() {
        assert_eq!(LogFormat::from_str("json", true).unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml", true).is_err());
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LogFormat::Human, 0, ColorChoice::Never);
        init_logging(LogFormat::Json, 3, ColorChoice::Never);
    }
}
