//! Tracing initialization utilities.

use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines (default).
    #[default]
    Pretty,
    /// One JSON object per event, for log collectors.
    Json,
}

impl LogFormat {
    /// Read the format from `LOG_FORMAT`, falling back to [`LogFormat::Pretty`].
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Parse a format name. Anything other than `json` is `Pretty`.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Initialize tracing with the given default filter.
///
/// Call this before [`Settings::load`](crate::Settings::load) so warnings
/// about insecure defaults or unreadable env files are not lost. The filter
/// can be overridden by `RUST_LOG`, and `LOG_FORMAT=json` switches to JSON
/// output. Events are written to stderr.
///
/// Returns an error if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,no_run
/// use lexiconnect_config::init_tracing;
///
/// // Debug for the settings loader, info for everything else
/// init_tracing("lexiconnect_config=debug,info").ok();
/// ```
pub fn init_tracing(default_filter: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
    }
}
