//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Filter after applying `-v` flags: one asks for debug, two or more for
    /// trace. The flags never lower a more verbose configured level.
    ///
    /// A configured directive list such as `rulelens=trace,info` is kept and
    /// the requested level is appended as the new default.
    #[must_use]
    pub fn effective_level(&self, verbosity: u8) -> String {
        let requested = match verbosity {
            0 => return self.level.clone(),
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        let requested_name = requested.to_string().to_lowercase();

        match self.level.trim().parse::<LevelFilter>() {
            Ok(configured) if configured >= requested => configured.to_string().to_lowercase(),
            Ok(_) => requested_name,
            Err(_) => format!("{},{requested_name}", self.level),
        }
    }

    /// Initialize the tracing subscriber. `RUST_LOG` wins over the config.
    ///
    /// Logs go to stderr so report output on stdout stays machine-readable.
    pub fn init(&self, verbosity: u8) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.effective_level(verbosity)));

        match self.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}
