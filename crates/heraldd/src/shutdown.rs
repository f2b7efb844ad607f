//! Waiting for the agent to be asked to stop.
//!
//! The agent holds its pool membership while blocked here; returning lets
//! it withdraw the service before exiting.

use std::io;

use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::Signals;
use thiserror::Error;
use tracing::info;

use crate::agent::AGENT_TARGET;

/// Decides when an announced service should be withdrawn.
pub trait ShutdownSignal: Send + Sync {
    /// Blocks until the agent should leave its pool and exit.
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError`] when the notification cannot be awaited.
    fn wait(&self) -> Result<(), ShutdownError>;
}

/// Errors reported by shutdown listeners.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// The agent could not register for termination signals.
    #[error("failed to install signal handlers: {source}")]
    Install {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Waits for SIGTERM, SIGINT, SIGQUIT or SIGHUP from the supervisor.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShutdownSignal;

impl SystemShutdownSignal {
    /// Builds the listener; handlers are installed when waiting starts.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ShutdownSignal for SystemShutdownSignal {
    fn wait(&self) -> Result<(), ShutdownError> {
        let mut signals = Signals::new([SIGTERM, SIGINT, SIGQUIT, SIGHUP])
            .map_err(|source| ShutdownError::Install { source })?;
        if let Some(signal) = signals.forever().next() {
            info!(target: AGENT_TARGET, signal, "termination signal received; withdrawing service");
        }
        Ok(())
    }
}
