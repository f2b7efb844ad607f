//! Failures that stop the agent.

use thiserror::Error;

use herald::{BindError, HeraldError};
use herald_config::ConfigError;

use crate::shutdown::ShutdownError;
use crate::telemetry::TelemetryError;

/// Errors surfaced while running the agent.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Config {
        /// Underlying parse error.
        #[from]
        source: ConfigError,
    },
    /// Telemetry could not be installed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[from]
        source: TelemetryError,
    },
    /// The configured backends or service identity could not be bound.
    #[error(transparent)]
    Bind(#[from] BindError),
    /// A backend lifecycle call failed.
    #[error("service announcement failed: {source}")]
    Lifecycle {
        /// Error returned by the coordinator.
        #[from]
        source: HeraldError,
    },
    /// Waiting for shutdown failed.
    #[error("failed to wait for shutdown: {source}")]
    Shutdown {
        /// Underlying listener error.
        #[from]
        source: ShutdownError,
    },
}

impl AgentError {
    /// Process exit code reported for this error.
    ///
    /// Configuration errors follow clap's convention: `0` after printing
    /// help or version output and `2` for usage errors. Everything else
    /// exits with `1`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config {
                source: ConfigError::Parse(parse),
            } => u8::try_from(parse.exit_code()).unwrap_or(2),
            _ => 1,
        }
    }
}
