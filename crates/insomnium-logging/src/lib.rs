//! # insomnium-logging
//!
//! Tracing setup shared by the insomnium binaries.
//!
//! ## Log Formats
//!
//! - `Pretty` - Human-readable multi-field output
//! - `JSON` - Structured JSON lines
//! - `Compact` - Minimal single-line output
//!
//! All output goes to stderr so stdout stays free for command results.

use serde::Deserialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else if s.eq_ignore_ascii_case("compact") {
            Ok(LogFormat::Compact)
        } else {
            Err(format!(
                "unknown log format `{}` (expected pretty, json or compact)",
                s
            ))
        }
    }
}

/// Build the filter for `level`, letting `RUST_LOG` override it.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize tracing for the application
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter = env_filter(level);

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .without_time()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
