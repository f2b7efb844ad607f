//! Domain errors raised by the herald coordinator.
//!
//! Backend failures are carried through unchanged: [`HeraldError::Backend`]
//! is transparent, so its message and source are exactly those the backend
//! produced.

use thiserror::Error;

use herald_config::ConfigError;

use crate::coordinator::Herald;
use crate::service::IdentityError;

/// Failure reported by a backend implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
    /// Optional source error reported by the backend implementation.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BackendError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-readable message describing the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Errors arising from coordinator operations.
#[derive(Debug, Error)]
pub enum HeraldError {
    /// Selector configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The resolved pool name has no registered implementation.
    #[error("attempt to utilize unrecognized pooling mechanism {name}")]
    UnrecognizedPool {
        /// Name that was looked up.
        name: String,
    },

    /// The resolved declaration name has no registered implementation.
    #[error("attempt to utilize unrecognized declaration mechanism {name}")]
    UnrecognizedDeclaration {
        /// Name that was looked up.
        name: String,
    },

    /// The service identity provider failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// A bound backend failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A lookup was requested but no declaration backend is bound.
    #[error("no declaration mechanism is bound; cannot look up services")]
    NoDeclaration,
}

/// Failure to bind a coordinator by name.
///
/// Carries the first error encountered and, when the service descriptor was
/// obtained, the coordinator bound to whichever roles did resolve. The
/// partial coordinator is for inspection only; it does not repair itself.
#[derive(Debug, Error)]
#[error("failed to bind herald backends: {source}")]
pub struct BindError {
    #[source]
    source: HeraldError,
    partial: Option<Herald>,
}

impl BindError {
    pub(crate) const fn new(source: HeraldError, partial: Option<Herald>) -> Self {
        Self { source, partial }
    }

    /// The first error encountered while binding.
    #[must_use]
    pub const fn error(&self) -> &HeraldError {
        &self.source
    }

    /// The partially bound coordinator, if a descriptor was obtained.
    #[must_use]
    pub const fn partial(&self) -> Option<&Herald> {
        self.partial.as_ref()
    }

    /// Splits the error into its cause and the partial coordinator.
    #[must_use]
    pub fn into_parts(self) -> (HeraldError, Option<Herald>) {
        (self.source, self.partial)
    }
}
