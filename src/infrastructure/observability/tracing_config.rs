use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
}

pub const DEFAULT_FILTER: &str = "info,quizcraft=debug,tower_http=debug";

impl TracingConfig {
    pub fn new(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment: environment.to_string(),
            json_format: logging.enable_json,
            filter: if logging.level.trim().is_empty() {
                DEFAULT_FILTER.to_string()
            } else {
                logging.level.clone()
            },
        }
    }
}
