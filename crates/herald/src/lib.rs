//! Pluggable service announcement for microservices.
//!
//! Herald lets a process take part in service discovery through two
//! independent, swappable mechanisms:
//!
//! - a **pool**, which adds the service to a live request-routing set, and
//! - a **declaration**, which publishes a machine-readable description of
//!   the service for other services to consume.
//!
//! A process may use neither, either, or both. Concrete backends (etcd,
//! consul, vulcand, ...) live in separate plugin crates that register
//! themselves by name in a [`Registry`] during startup. Which names are used
//! is decided at runtime by [`herald_config`].
//!
//! # Example
//!
//! ```rust,no_run
//! use herald::{Herald, JsonFileIdentity, Registry};
//! use herald_config::Resolver;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::new();
//! // plugin_crate::register(&registry);
//!
//! let herald = Herald::this(
//!     &registry,
//!     &Resolver::default(),
//!     &JsonFileIdentity::new("service.json"),
//! )?;
//! herald.init()?;
//! herald.declare()?;
//! herald.start_pool()?;
//! // ... serve traffic ...
//! herald.stop_pool()?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod coordinator;
pub mod error;
pub mod registry;
pub mod service;

#[cfg(test)]
mod tests;

pub use self::backend::{Declaration, Operation, Pool, Role};
pub use self::coordinator::Herald;
pub use self::error::{BackendError, BindError, HeraldError};
pub use self::registry::Registry;
pub use self::service::{
    IdentityError, JsonFileIdentity, ServiceDescriptor, ServiceIdentity, StaticIdentity,
};
