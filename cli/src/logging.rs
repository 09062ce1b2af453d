//! # Structured Logging
//!
//! Initializes the `tracing` subscriber with a pretty or JSON format and
//! `RUST_LOG` filtering.
//!
//! All log output goes to stderr so stdout carries only the command's JSON.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output.
    Pretty,
    /// JSON lines, for log aggregation.
    Json,
}

/// Filter directives for a `-v` count: 0 is `warn`, 1 `debug`, 2+ `trace`.
pub fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "catapult_tx=warn,catapult_sdk=warn",
        1 => "catapult_tx=debug,catapult_sdk=debug",
        _ => "catapult_tx=trace,catapult_sdk=trace",
    }
}

/// Installs the global subscriber. Call once, early in `main()`.
///
/// `RUST_LOG`, when set, replaces `default_level` entirely:
///
/// ```text
/// RUST_LOG=catapult_sdk=trace catapult-tx decode <payload>
/// ```
pub fn init_logging(default_level: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(false),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
                .init();
        }
    }

    tracing::debug!(?format, "logging initialized");
}
