//! Configuration for processes that host herald as a sidecar agent.

use std::ffi::OsString;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;

use crate::defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_SERVICE_FILE, default_log_filter, default_log_format,
    default_service_file,
};
use crate::error::ConfigError;
use crate::logging::LogFormat;
use crate::selectors::Selectors;

/// Agent configuration assembled from flags with environment fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "heraldd",
    args_override_self = true,
    about = "Announce a microservice to its pool and declaration backends."
)]
pub struct HeraldConfig {
    /// Tracing filter expression applied to log output.
    #[arg(long, env = "HERALD_LOG_FILTER", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
    /// Log output format.
    #[arg(long, env = "HERALD_LOG_FORMAT", default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
    /// JSON service definition describing this microservice.
    #[arg(long, env = "HERALD_SERVICE_FILE", default_value = DEFAULT_SERVICE_FILE)]
    pub service_file: Utf8PathBuf,
    /// Backend selectors.
    #[command(flatten)]
    pub selectors: Selectors,
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter().to_owned(),
            log_format: default_log_format(),
            service_file: default_service_file(),
            selectors: Selectors::default(),
        }
    }
}

impl HeraldConfig {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the arguments are malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_iter(std::env::args_os())
    }

    /// Loads configuration from an explicit argument list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the arguments are malformed.
    pub fn load_from_iter<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = OsString>,
    {
        Ok(Self::try_parse_from(args)?)
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Path of the JSON service definition.
    #[must_use]
    pub fn service_file(&self) -> &Utf8Path {
        self.service_file.as_path()
    }

    /// Backend selectors supplied alongside the agent settings.
    #[must_use]
    pub const fn selectors(&self) -> &Selectors {
        &self.selectors
    }
}
