//! Logging infrastructure.
//!
//! Logs always go to stderr; stdout carries answers only.

use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Initialize the tracing subscriber with stderr output.
///
/// # Arguments
/// * `log_level` - Filter directive (e.g., "debug", "zodiac_consult=trace"); defaults to `RUST_LOG` or "info"
/// * `format` - Pretty or JSON lines
/// * `no_color` - Disable colored output
///
/// # Example
/// ```no_run
/// use zodiac_core::logging::{init_logging, LogFormat};
///
/// init_logging(None, LogFormat::Pretty, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, format: LogFormat, no_color: bool) -> AppResult<()> {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_str = log_level.unwrap_or(&default_level);

    let env_filter = EnvFilter::try_new(filter_str)
        .map_err(|e| AppError::Config(format!("Invalid log filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(!no_color && supports_color()),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true),
            )
            .try_init(),
    };

    result.map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))
}

/// Color only when stderr is a terminal and `NO_COLOR` is unset.
fn supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}
