//! Errors raised while loading herald configuration.

use std::sync::Arc;

use thiserror::Error;

/// Errors encountered while reading selectors or agent configuration.
///
/// The clap error is held behind an `Arc` so resolution outcomes can be
/// cached and handed out repeatedly.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The argument list could not be parsed.
    #[error("failed to parse herald configuration: {0}")]
    Parse(#[source] Arc<clap::Error>),
}

impl From<clap::Error> for ConfigError {
    fn from(error: clap::Error) -> Self {
        Self::Parse(Arc::new(error))
    }
}
