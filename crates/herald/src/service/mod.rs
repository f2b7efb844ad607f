//! Description of the local microservice and the providers that supply it.
//!
//! Herald never interprets a [`ServiceDescriptor`]; it only forwards it to
//! the bound backends. Backends may use the identity fields to index what
//! they store.

use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record describing one microservice instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceDescriptor {
    /// Human-facing service name.
    pub title: String,
    /// Domain the service belongs to.
    pub domain: String,
    /// Service version.
    pub version: String,
    /// Host the service listens on.
    pub host: String,
    /// Port the service listens on.
    pub port: u16,
    /// Free-form metadata published alongside the service.
    pub metadata: BTreeMap<String, String>,
}

impl ServiceDescriptor {
    /// Creates a descriptor from the identity triple.
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        title: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            domain: domain.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Sets the network address.
    #[must_use]
    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Adds one metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Identity key in the form `domain/title/version`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.domain, self.title, self.version)
    }
}

/// Errors raised while describing the current service.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The service definition could not be read.
    #[error("failed to read service definition '{path}': {source}")]
    Read {
        /// File that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
    /// The service definition is not valid JSON for a descriptor.
    #[error("failed to parse service definition '{path}': {source}")]
    Parse {
        /// File that was parsed.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: Arc<serde_json::Error>,
    },
}

/// Provider of the descriptor for the currently running service.
pub trait ServiceIdentity {
    /// Describes the current service.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] when the description cannot be produced.
    fn describe(&self) -> Result<ServiceDescriptor, IdentityError>;
}

/// Identity backed by a descriptor supplied up front.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    descriptor: ServiceDescriptor,
}

impl StaticIdentity {
    /// Wraps an existing descriptor.
    #[must_use]
    pub const fn new(descriptor: ServiceDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ServiceIdentity for StaticIdentity {
    fn describe(&self) -> Result<ServiceDescriptor, IdentityError> {
        Ok(self.descriptor.clone())
    }
}

/// Identity read from a JSON service definition on disk.
///
/// The file is read on every call to [`ServiceIdentity::describe`].
#[derive(Debug, Clone)]
pub struct JsonFileIdentity {
    path: Utf8PathBuf,
}

impl JsonFileIdentity {
    /// Creates a provider for the given definition file.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the definition file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.path.as_path()
    }
}

impl ServiceIdentity for JsonFileIdentity {
    fn describe(&self) -> Result<ServiceDescriptor, IdentityError> {
        let text = fs::read_to_string(&self.path).map_err(|source| IdentityError::Read {
            path: self.path.clone(),
            source: Arc::new(source),
        })?;
        serde_json::from_str(&text).map_err(|source| IdentityError::Parse {
            path: self.path.clone(),
            source: Arc::new(source),
        })
    }
}
