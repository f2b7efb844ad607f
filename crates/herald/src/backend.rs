//! Capability sets implemented by discovery backends.
//!
//! A backend plugs into herald by implementing [`Pool`], [`Declaration`], or
//! both, and registering itself by name in a
//! [`Registry`](crate::registry::Registry). Every call is synchronous and
//! single-attempt from herald's point of view; retries and timeouts are the
//! backend's own concern.

use std::fmt;

use crate::error::BackendError;
use crate::service::ServiceDescriptor;

/// Backend that adds the local service to, or removes it from, a live
/// request-routing set.
pub trait Pool: Send + Sync {
    /// Prepares the backend for use.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the backend cannot be prepared.
    fn init(&self) -> Result<(), BackendError>;

    /// Joins the routing pool as `service`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the service cannot join the pool.
    fn start(&self, service: &ServiceDescriptor) -> Result<(), BackendError>;

    /// Leaves the routing pool.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the service cannot leave the pool.
    fn stop(&self, service: &ServiceDescriptor) -> Result<(), BackendError>;
}

/// Backend that publishes and retrieves machine-readable service
/// descriptions.
pub trait Declaration: Send + Sync {
    /// Prepares the backend for use.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the backend cannot be prepared.
    fn init(&self) -> Result<(), BackendError>;

    /// Publishes `service`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the description cannot be published.
    fn declare(&self, service: &ServiceDescriptor) -> Result<(), BackendError>;

    /// Fills `target` with the published description of a foreign service.
    ///
    /// Implementations locate the service from the identity fields already
    /// present in `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the service is unknown or the lookup
    /// fails.
    fn get(&self, target: &mut ServiceDescriptor) -> Result<(), BackendError>;
}

/// Role a backend plays for the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Request-routing pool membership.
    Pool,
    /// Service description broadcast.
    Declaration,
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pool => "pool",
            Self::Declaration => "declaration",
        };
        formatter.write_str(label)
    }
}

/// Lifecycle call forwarded to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Backend initialisation.
    Init,
    /// Joining a pool.
    Start,
    /// Leaving a pool.
    Stop,
    /// Publishing the local description.
    Declare,
    /// Looking up a foreign description.
    Get,
}

impl fmt::Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Init => "init",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Declare => "declare",
            Self::Get => "get",
        };
        formatter.write_str(label)
    }
}
